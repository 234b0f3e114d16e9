//! Bounding boxes in scene space and in pixel space.

use glam::{DVec2, dvec2};

/// Axis-aligned bounding box in (fractional) scene coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: dvec2(f64::MAX, f64::MAX),
            max: dvec2(f64::MIN, f64::MIN),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Self {
        let mut bbox = Self::new();
        for p in points {
            bbox.expand_point(p);
        }
        bbox
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn expand_point(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Snap to the pixel grid: `[floor(min), floor(max))` on each axis.
    pub fn to_pixels(&self) -> PixelRect {
        if self.is_empty() {
            return PixelRect::EMPTY;
        }
        PixelRect {
            x0: self.min.x.floor() as i64,
            y0: self.min.y.floor() as i64,
            x1: self.max.x.floor() as i64,
            y1: self.max.y.floor() as i64,
        }
    }
}

/// Half-open integer pixel rectangle `[x0, x1) × [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl PixelRect {
    pub const EMPTY: PixelRect = PixelRect { x0: 0, y0: 0, x1: 0, y1: 0 };

    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    pub fn width(&self) -> i64 {
        (self.x1 - self.x0).max(0)
    }

    pub fn height(&self) -> i64 {
        (self.y1 - self.y0).max(0)
    }

    /// Grow outward by `n` pixels on every side (shrink when negative).
    pub fn grow(&self, n: i64) -> PixelRect {
        PixelRect {
            x0: self.x0.saturating_sub(n),
            y0: self.y0.saturating_sub(n),
            x1: self.x1.saturating_add(n),
            y1: self.y1.saturating_add(n),
        }
    }

    /// Intersection with `[0, width) × [0, height)`.
    pub fn clip(&self, width: u32, height: u32) -> PixelRect {
        PixelRect {
            x0: self.x0.max(0),
            y0: self.y0.max(0),
            x1: self.x1.min(width as i64),
            y1: self.y1.min(height as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_until_expanded() {
        let mut b = BBox::new();
        assert!(b.is_empty());
        b.expand_point(dvec2(3.0, 4.0));
        assert!(!b.is_empty());
        assert_eq!(b.width(), 0.0);
    }

    #[test]
    fn from_points_encloses_all() {
        let b = BBox::from_points([dvec2(5.0, -1.0), dvec2(-2.0, 7.0), dvec2(0.0, 0.0)]);
        assert_eq!(b.min, dvec2(-2.0, -1.0));
        assert_eq!(b.max, dvec2(5.0, 7.0));
        assert_eq!((b.width(), b.height()), (7.0, 8.0));
    }

    #[test]
    fn pixels_floor_both_edges() {
        let b = BBox::from_points([dvec2(10.7, -0.5), dvec2(30.2, 19.9)]);
        assert_eq!(
            b.to_pixels(),
            PixelRect { x0: 10, y0: -1, x1: 30, y1: 19 }
        );
        assert_eq!(BBox::new().to_pixels(), PixelRect::EMPTY);
    }

    #[test]
    fn grow_and_clip() {
        let r = PixelRect { x0: 2, y0: 2, x1: 5, y1: 4 };
        assert_eq!(r.grow(3), PixelRect { x0: -1, y0: -1, x1: 8, y1: 7 });
        assert_eq!(r.grow(3).clip(6, 6), PixelRect { x0: 0, y0: 0, x1: 6, y1: 6 });
        assert!(r.grow(-1).is_empty());
        assert_eq!((r.width(), r.height()), (3, 2));
    }
}
