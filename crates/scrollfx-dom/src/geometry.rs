//! Geometry APIs
//!
//! DOMRect and the rect arithmetic used for viewport visibility checks.

/// DOMRect - rectangle geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top edge (same as y)
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Left edge (same as x)
    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Same rect moved by (dx, dy)
    pub fn translate(&self, dx: f64, dy: f64) -> DOMRect {
        DOMRect::from_xywh(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Check if rects touch or overlap. Edge-adjacent rects intersect.
    pub fn intersects(&self, other: &DOMRect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }

    /// Get intersection rect (may have zero area for edge-adjacent rects)
    pub fn intersection(&self, other: &DOMRect) -> Option<DOMRect> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(DOMRect::from_xywh(x, y, right - x, bottom - y))
    }

    /// Fraction of this rect's area that lies inside `container`.
    ///
    /// A zero-area rect counts as fully visible when it touches the container.
    pub fn visible_ratio(&self, container: &DOMRect) -> f64 {
        let Some(overlap) = self.intersection(container) else {
            return 0.0;
        };
        let area = self.area();
        if area <= 0.0 {
            return 1.0;
        }
        (overlap.area() / area).clamp(0.0, 1.0)
    }

    /// Like [`visible_ratio`](Self::visible_ratio), but each axis is measured
    /// against the smaller of the two extents.
    ///
    /// An element taller or wider than the container reaches 1.0 once it
    /// spans the container on that axis.
    pub fn coverage_ratio(&self, container: &DOMRect) -> f64 {
        let Some(overlap) = self.intersection(container) else {
            return 0.0;
        };
        let axis = |overlap: f64, own: f64, other: f64| {
            let extent = own.min(other);
            if extent <= 0.0 {
                1.0
            } else {
                (overlap / extent).clamp(0.0, 1.0)
            }
        };
        axis(overlap.width, self.width, container.width)
            * axis(overlap.height, self.height, container.height)
    }
}
