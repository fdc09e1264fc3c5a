//! Document-space geometry
//!
//! All coordinates are document space: `y` grows downward and does not move
//! when the page scrolls. The viewport is a window onto that space (see
//! [`crate::stage::Viewport`]), so visibility checks reduce to rectangle
//! intersection.

// ─────────────────────────────────────────────────────────────────────────────
// Point / Size
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rect
// ─────────────────────────────────────────────────────────────────────────────

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn area(&self) -> f32 {
        self.size.area()
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.right()
            && point.y >= self.origin.y
            && point.y <= self.bottom()
    }

    /// Shrink the rect by `amount` on its bottom edge only.
    ///
    /// A negative amount grows the rect instead. Height never goes below
    /// zero. This is what root-margin style visibility windows are built
    /// from: the trigger region is the viewport with its bottom pulled up.
    pub fn shrink_bottom(&self, amount: f32) -> Self {
        Rect {
            origin: self.origin,
            size: Size::new(self.size.width, (self.size.height - amount).max(0.0)),
        }
    }

    /// Check if this rect intersects with another
    pub fn intersects(&self, other: &Rect) -> bool {
        self.origin.x < other.right()
            && self.right() > other.origin.x
            && self.origin.y < other.bottom()
            && self.bottom() > other.origin.y
    }

    /// Get the intersection of two rects (if they overlap)
    pub fn intersection(&self, other: &Rect) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.origin.x.max(other.origin.x);
        let y = self.origin.y.max(other.origin.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// Fraction of this rect's area that lies inside `window`, in `0.0..=1.0`.
    ///
    /// Zero-area rects report 0.0: a degenerate node can never satisfy a
    /// positive visibility threshold.
    pub fn visible_fraction(&self, window: &Rect) -> f32 {
        let own = self.area();
        if own <= 0.0 {
            return 0.0;
        }
        match self.intersection(window) {
            Some(overlap) => (overlap.area() / own).clamp(0.0, 1.0),
            None => 0.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_accessors() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.center(), Point::new(60.0, 45.0));
        assert_eq!(r.area(), 5000.0);
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        let i = a.intersection(&b).unwrap();
        assert_eq!(i, Rect::new(50.0, 50.0, 50.0, 50.0));

        let far = Rect::new(500.0, 500.0, 10.0, 10.0);
        assert!(a.intersection(&far).is_none());
    }

    #[test]
    fn test_visible_fraction() {
        let window = Rect::new(0.0, 0.0, 100.0, 100.0);

        // Fully inside
        let inside = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(inside.visible_fraction(&window), 1.0);

        // Half visible (bottom half below the window)
        let half = Rect::new(0.0, 50.0, 100.0, 100.0);
        assert!((half.visible_fraction(&window) - 0.5).abs() < 1e-6);

        // Fully outside
        let outside = Rect::new(0.0, 200.0, 100.0, 100.0);
        assert_eq!(outside.visible_fraction(&window), 0.0);
    }

    #[test]
    fn test_visible_fraction_zero_area() {
        let window = Rect::new(0.0, 0.0, 100.0, 100.0);
        let degenerate = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(degenerate.visible_fraction(&window), 0.0);
    }

    #[test]
    fn test_shrink_bottom() {
        let r = Rect::new(0.0, 100.0, 50.0, 80.0);
        let shrunk = r.shrink_bottom(30.0);
        assert_eq!(shrunk, Rect::new(0.0, 100.0, 50.0, 50.0));

        // Never below zero height
        let tiny = r.shrink_bottom(200.0);
        assert_eq!(tiny.height(), 0.0);

        // Negative amount grows
        let grown = r.shrink_bottom(-20.0);
        assert_eq!(grown.height(), 100.0);
    }
}
