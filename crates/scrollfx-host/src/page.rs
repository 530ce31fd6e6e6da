//! Page Representation
//!
//! A loaded page: document, viewport, scroll position and the event sources
//! scripts hook into.

use scrollfx_dom::Document;

use crate::{
    HostError, IntersectionHandler, IntersectionObserver, IntersectionObserverManager,
    IntersectionObserverOptions, ObserverId, ScrollContext, ScrollHandler, ScrollListeners,
    ScrollPosition, ScrollState, SubscriptionId, Viewport,
};

/// A loaded page
#[derive(Debug)]
pub struct Page {
    document: Document,
    viewport: Viewport,
    scroll: ScrollState,
    scroll_listeners: ScrollListeners,
    observers: IntersectionObserverManager,
}

impl Page {
    pub fn new(document: Document, viewport: Viewport) -> Self {
        Self {
            document,
            viewport,
            scroll: ScrollState::new(),
            scroll_listeners: ScrollListeners::new(),
            observers: IntersectionObserverManager::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current scroll position
    pub fn scroll_position(&self) -> ScrollPosition {
        self.scroll.position()
    }

    /// `window.scrollY`
    pub fn scroll_y(&self) -> f64 {
        self.scroll.position().y
    }

    /// Snapshot passed to scroll handlers
    pub fn scroll_context(&self) -> ScrollContext {
        ScrollContext {
            viewport: self.viewport,
            scroll: self.scroll.position(),
        }
    }

    /// Resize the viewport. Observers pick the change up on the next step.
    pub fn resize(&mut self, viewport: Viewport) {
        tracing::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
    }

    // ---- Scrolling ---------------------------------------------------------

    /// Jump to a vertical offset, firing a scroll event if it changed.
    ///
    /// Returns true if the position changed.
    pub fn scroll_to(&mut self, y: f64) -> bool {
        let x = self.scroll.position().x;
        self.scroll_to_xy(x, y)
    }

    /// Jump to a position, firing a scroll event if it changed
    pub fn scroll_to_xy(&mut self, x: f64, y: f64) -> bool {
        if !self.scroll.scroll_to(x, y) {
            return false;
        }
        self.dispatch_scroll();
        true
    }

    /// Scroll by delta, firing a scroll event if the position changed
    pub fn scroll_by(&mut self, dy: f64) -> bool {
        if !self.scroll.scroll_by(0.0, dy) {
            return false;
        }
        self.dispatch_scroll();
        true
    }

    /// Fire a scroll event at the current position
    pub fn dispatch_scroll(&mut self) {
        let ctx = self.scroll_context();
        self.scroll_listeners.dispatch(&mut self.document, &ctx);
    }

    pub fn subscribe_scroll(&mut self, handler: Box<dyn ScrollHandler>) -> SubscriptionId {
        self.scroll_listeners.subscribe(handler)
    }

    pub fn unsubscribe_scroll(&mut self, id: SubscriptionId) -> bool {
        self.scroll_listeners.unsubscribe(id)
    }

    pub fn scroll_listener_count(&self) -> usize {
        self.scroll_listeners.len()
    }

    // ---- Intersection observers --------------------------------------------

    /// Create an intersection observer rooted at the viewport
    pub fn observe_intersections(
        &mut self,
        options: IntersectionObserverOptions,
        handler: Box<dyn IntersectionHandler>,
    ) -> ObserverId {
        self.observers.create(options, handler)
    }

    pub fn observer(&self, id: ObserverId) -> Option<&IntersectionObserver> {
        self.observers.get(id)
    }

    pub fn observer_mut(&mut self, id: ObserverId) -> crate::Result<&mut IntersectionObserver> {
        self.observers.get_mut(id).ok_or(HostError::UnknownObserver(id))
    }

    /// Disconnect and drop an observer
    pub fn disconnect_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Rendering step: evaluate observers and deliver their notifications.
    ///
    /// Returns the number of entries delivered.
    pub fn run_intersection_step(&mut self, time: f64) -> usize {
        let viewport = self.viewport.rect();
        let scroll = self.scroll.position();
        self.observers.process(viewport, &mut self.document, scroll, time)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Document::new(), Viewport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_scroll_fires_only_on_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut page = Page::default();

        let log = Rc::clone(&seen);
        page.subscribe_scroll(Box::new(move |_: &mut Document, ctx: &ScrollContext| {
            log.borrow_mut().push(ctx.scroll_y());
        }));

        assert!(page.scroll_to(150.0));
        assert!(!page.scroll_to(150.0));
        assert!(page.scroll_by(-200.0));
        assert_eq!(*seen.borrow(), vec![150.0, 0.0]);
    }

    #[test]
    fn test_unknown_observer() {
        let mut page = Page::default();
        let id = page.observe_intersections(
            IntersectionObserverOptions::default(),
            Box::new(|_: &mut Document, _: &[crate::IntersectionObserverEntry], _: &mut IntersectionObserver| {}),
        );
        assert!(page.observer_mut(id).is_ok());
        assert!(page.disconnect_observer(id));
        assert_eq!(page.observer_mut(id).err(), Some(HostError::UnknownObserver(id)));
    }
}
