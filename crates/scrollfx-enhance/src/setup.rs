//! Page setup
//!
//! Resolves the navbar and reveal targets once, installs the handlers and
//! hands back a handle that can tear everything down again.

use std::cell::RefCell;
use std::rc::Rc;

use scrollfx_dom::Document;
use scrollfx_host::{
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverOptions, ObserverId,
    Page, ScrollContext, SubscriptionId,
};

use crate::{
    DetectionMode, EnhanceConfig, NavbarShadow, ObserverReveal, PollingReveal, RevealClasses,
    RevealStats, Result, collect_targets, select_threshold,
};

#[derive(Debug)]
enum RevealState {
    Polling(Rc<RefCell<PollingReveal>>),
    Observer(Rc<RefCell<ObserverReveal>>),
}

/// Installed enhancements
#[derive(Debug)]
pub struct EnhancementHandle {
    subscription: SubscriptionId,
    observer: Option<ObserverId>,
    navbar: NavbarShadow,
    reveal: RevealState,
}

impl EnhancementHandle {
    pub fn navbar(&self) -> &NavbarShadow {
        &self.navbar
    }

    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    /// Shared observer, present in observer mode only
    pub fn observer(&self) -> Option<ObserverId> {
        self.observer
    }

    pub fn is_polling(&self) -> bool {
        matches!(self.reveal, RevealState::Polling(_))
    }

    pub fn stats(&self) -> RevealStats {
        match &self.reveal {
            RevealState::Polling(reveal) => reveal.borrow().stats(),
            RevealState::Observer(reveal) => reveal.borrow().stats(),
        }
    }

    /// Remove the scroll handler and the observer from the page.
    ///
    /// Classes already written stay on their elements.
    pub fn dispose(self, page: &mut Page) {
        page.unsubscribe_scroll(self.subscription);
        if let Some(id) = self.observer {
            page.disconnect_observer(id);
        }
        tracing::debug!("Disposed enhancements ({})", self.subscription);
    }
}

/// Install the navbar shadow and scroll reveal on a page
pub fn enhance(page: &mut Page, config: &EnhanceConfig) -> Result<EnhancementHandle> {
    config.validate()?;

    let navbar = NavbarShadow::locate(page.document(), &config.navbar);
    let targets = collect_targets(page.document(), &config.reveal);
    let classes = RevealClasses::from_config(&config.reveal);

    let (subscription, observer, reveal) = match config.reveal.detection {
        DetectionMode::Polling { policy } => {
            let polling = Rc::new(RefCell::new(PollingReveal::new(targets, policy, classes)));

            let shadow = navbar.clone();
            let shared = Rc::clone(&polling);
            let subscription = page.subscribe_scroll(Box::new(
                move |document: &mut Document, ctx: &ScrollContext| {
                    shadow.update(document, ctx.scroll_y());
                    shared.borrow_mut().apply(document, ctx);
                },
            ));

            // Elements already in view on page load
            let ctx = page.scroll_context();
            polling.borrow_mut().apply(page.document_mut(), &ctx);

            (subscription, None, RevealState::Polling(polling))
        }
        DetectionMode::Observer => {
            let threshold = select_threshold(page.viewport().width, &config.observer);
            let options = IntersectionObserverOptions::with_threshold(threshold)?;
            let observed = Rc::new(RefCell::new(ObserverReveal::new(
                targets,
                classes,
                config.observer.stagger_groups,
            )));

            let shared = Rc::clone(&observed);
            let id = page.observe_intersections(
                options,
                Box::new(
                    move |document: &mut Document,
                          entries: &[IntersectionObserverEntry],
                          observer: &mut IntersectionObserver| {
                        shared.borrow_mut().handle_entries(document, entries, observer);
                    },
                ),
            );
            observed.borrow().register(page.observer_mut(id)?);

            let shadow = navbar.clone();
            let subscription = page.subscribe_scroll(Box::new(
                move |document: &mut Document, ctx: &ScrollContext| {
                    shadow.update(document, ctx.scroll_y());
                },
            ));

            (subscription, Some(id), RevealState::Observer(observed))
        }
    };

    let scroll_y = page.scroll_y();
    navbar.update(page.document_mut(), scroll_y);

    let handle = EnhancementHandle {
        subscription,
        observer,
        navbar,
        reveal,
    };
    tracing::debug!(
        "Enhanced page: {:?} detection, {} reveal targets",
        config.reveal.detection,
        handle.stats().tracked
    );
    Ok(handle)
}

/// Jump straight to the top of the page.
///
/// Scroll handlers run as for any other scroll, so the navbar shadow goes
/// away in the same step. Returns false if the page was already at the top.
pub fn scroll_to_top(page: &mut Page) -> bool {
    let moved = page.scroll_to(0.0);
    tracing::trace!("scroll_to_top (moved: {})", moved);
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VisibilityPolicy;
    use scrollfx_dom::DOMRect;

    #[test]
    fn test_polling_setup_checks_on_load() {
        let mut doc = Document::new();
        let el = doc.create_element("section");
        doc.append_child(doc.body(), el).unwrap();
        doc.class_list_mut(el).unwrap().add("aos");
        doc.set_layout(el, DOMRect::from_xywh(0.0, 100.0, 400.0, 100.0)).unwrap();

        let mut page = Page::new(doc, Default::default());
        let mut config = EnhanceConfig::default();
        config.reveal.detection = DetectionMode::Polling { policy: VisibilityPolicy::Bottom };

        let handle = enhance(&mut page, &config).unwrap();
        assert!(handle.is_polling());
        assert!(page.document().has_class(el, "animated"));
        assert_eq!(handle.stats(), RevealStats { tracked: 1, animated: 1 });
    }

    #[test]
    fn test_observer_setup_registers_targets() {
        let mut doc = Document::new();
        let el = doc.create_element("section");
        doc.append_child(doc.body(), el).unwrap();
        doc.class_list_mut(el).unwrap().add("aos");

        let mut page = Page::new(doc, Default::default());
        let handle = enhance(&mut page, &EnhanceConfig::default()).unwrap();

        let id = handle.observer().unwrap();
        let observer = page.observer(id).unwrap();
        assert!(observer.is_observing(el));
        assert_eq!(observer.options().thresholds(), &[0.6]);
        // Nothing happens until the host runs its rendering step
        assert!(!page.document().has_class(el, "animated"));
    }

    #[test]
    fn test_invalid_config_installs_nothing() {
        let mut page = Page::default();
        let mut config = EnhanceConfig::default();
        config.observer.narrow_threshold = -0.5;

        assert!(enhance(&mut page, &config).is_err());
        assert_eq!(page.scroll_listener_count(), 0);
        assert_eq!(page.observer_count(), 0);
    }

    #[test]
    fn test_scroll_to_top_at_top() {
        let mut page = Page::default();
        assert!(!scroll_to_top(&mut page));
        page.scroll_to(300.0);
        assert!(scroll_to_top(&mut page));
        assert_eq!(page.scroll_y(), 0.0);
    }
}
