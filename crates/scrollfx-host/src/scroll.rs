//! Viewport and scroll position
//!
//! Scrolling is always an instant jump; there is no smooth-scroll animation.

use scrollfx_dom::DOMRect;

/// Inner viewport size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Viewport rect in client coordinates
    pub fn rect(&self) -> DOMRect {
        DOMRect::from_xywh(0.0, 0.0, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Scroll position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}

/// Scroll state of the page
#[derive(Debug, Default)]
pub struct ScrollState {
    position: ScrollPosition,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current scroll position
    pub fn position(&self) -> ScrollPosition {
        self.position
    }

    /// Jump to a position. Negative offsets clamp to 0.
    ///
    /// Returns true if the position changed.
    pub fn scroll_to(&mut self, x: f64, y: f64) -> bool {
        let target = ScrollPosition {
            x: x.max(0.0),
            y: y.max(0.0),
        };
        if target == self.position {
            return false;
        }
        self.position = target;
        true
    }

    /// Scroll by delta
    pub fn scroll_by(&mut self, dx: f64, dy: f64) -> bool {
        self.scroll_to(self.position.x + dx, self.position.y + dy)
    }
}
