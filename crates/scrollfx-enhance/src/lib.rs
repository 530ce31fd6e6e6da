//! scrollfx Enhance - scroll-driven page enhancements
//!
//! Two behaviors wired together by [`enhance`]:
//! - the navbar gets `has-shadow` while the page is scrolled away from the top
//! - revealable elements get `animated` (once) when they enter the viewport
//!
//! Reveal detection either re-measures on every scroll event
//! ([`PollingReveal`]) or rides on an intersection observer
//! ([`ObserverReveal`]).

pub mod config;
pub mod error;
pub mod navbar;
pub mod observer;
pub mod reveal;
pub mod setup;

pub use config::{
    DetectionMode, EnhanceConfig, NavbarConfig, NavbarLocator, ObserverConfig, RevealConfig,
    VisibilityPolicy,
};
pub use error::{EnhanceError, Result};
pub use navbar::NavbarShadow;
pub use observer::{ObserverReveal, select_threshold};
pub use reveal::{PollingReveal, RevealClasses, RevealStats, RevealTarget, collect_targets};
pub use setup::{EnhancementHandle, enhance, scroll_to_top};
