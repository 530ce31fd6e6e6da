//! Scroll events
//!
//! Replaces the single page-wide `onscroll` slot with a list of
//! subscriptions. Each subscription gets an id that can be handed back to
//! remove it.

use scrollfx_dom::Document;

use crate::{ScrollPosition, Viewport};

/// Subscription identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scroll-sub-{}", self.0)
    }
}

/// Read-only state passed to scroll handlers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollContext {
    pub viewport: Viewport,
    pub scroll: ScrollPosition,
}

impl ScrollContext {
    /// Vertical scroll offset (`window.scrollY`)
    pub fn scroll_y(&self) -> f64 {
        self.scroll.y
    }
}

/// Scroll notification handler
pub trait ScrollHandler {
    fn on_scroll(&mut self, document: &mut Document, ctx: &ScrollContext);
}

impl<F> ScrollHandler for F
where
    F: FnMut(&mut Document, &ScrollContext),
{
    fn on_scroll(&mut self, document: &mut Document, ctx: &ScrollContext) {
        self(document, ctx)
    }
}

/// Registered scroll handlers, invoked in registration order
#[derive(Default)]
pub struct ScrollListeners {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Box<dyn ScrollHandler>)>,
}

impl ScrollListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler
    pub fn subscribe(&mut self, handler: Box<dyn ScrollHandler>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, handler));
        tracing::debug!("Subscribed {} ({} active)", id, self.listeners.len());
        id
    }

    /// Remove a handler. Returns false if the id was unknown or already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        let removed = self.listeners.len() != before;
        if removed {
            tracing::debug!("Unsubscribed {}", id);
        }
        removed
    }

    /// Invoke every handler
    pub fn dispatch(&mut self, document: &mut Document, ctx: &ScrollContext) {
        tracing::trace!("Dispatching scroll y={} to {} handlers", ctx.scroll.y, self.listeners.len());
        for (_, handler) in &mut self.listeners {
            handler.on_scroll(document, ctx);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for ScrollListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollListeners")
            .field("active", &self.listeners.len())
            .finish()
    }
}
