//! scrollfx Host - headless page environment
//!
//! Everything a page script would normally get from the browser:
//! - viewport dimensions and the scroll position
//! - scroll notifications with explicit subscribe / unsubscribe
//! - intersection observers driven by a rendering step
//!
//! All dispatch is synchronous and single-threaded. Handlers receive the
//! document mutably, so they never need to hold a reference to the page.

pub mod events;
pub mod intersection;
pub mod page;
pub mod scroll;

pub use events::{ScrollContext, ScrollHandler, ScrollListeners, SubscriptionId};
pub use intersection::{
    IntersectionHandler, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverManager, IntersectionObserverOptions, ObserverId,
};
pub use page::Page;
pub use scroll::{ScrollPosition, ScrollState, Viewport};

/// Host errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("Threshold {0} is outside 0.0..=1.0")]
    InvalidThreshold(f64),

    #[error("Unknown intersection observer: {0}")]
    UnknownObserver(ObserverId),
}

pub type Result<T> = std::result::Result<T, HostError>;
