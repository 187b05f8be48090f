//! Axis-aligned bounding boxes.
//!
//! A `BBox` is a plain value: every operation returns a new box. Missing boxes
//! (paths that draw nothing) are modelled as `Option<BBox>`, and only
//! [`union`] accepts them directly.

use super::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    /// Builds a box from two opposite corners in any order.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        BBox {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    pub fn from_point(p: Point) -> Self {
        BBox { min_x: p.x, min_y: p.y, max_x: p.x, max_y: p.y }
    }

    pub fn from_points(a: Point, b: Point) -> Self {
        BBox::new(a.x, a.y, b.x, b.y)
    }

    /// The box covering a viewport of the given size anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        BBox::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn max_dimension(&self) -> f64 {
        self.width().max(self.height())
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn include(self, p: Point) -> Self {
        BBox {
            min_x: self.min_x.min(p.x),
            min_y: self.min_y.min(p.y),
            max_x: self.max_x.max(p.x),
            max_y: self.max_y.max(p.y),
        }
    }

    pub fn union(self, other: BBox) -> Self {
        BBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        BBox {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    /// Scales all four edges about the origin. `k` must be positive.
    pub fn scale(self, k: f64) -> Self {
        debug_assert!(k > 0.0);
        BBox {
            min_x: self.min_x * k,
            min_y: self.min_y * k,
            max_x: self.max_x * k,
            max_y: self.max_y * k,
        }
    }

    /// Gap between the nearest edges; zero when the boxes overlap or touch.
    pub fn distance(&self, other: &BBox) -> f64 {
        let dx = (other.min_x - self.max_x).max(self.min_x - other.max_x).max(0.0);
        let dy = (other.min_y - self.max_y).max(self.min_y - other.max_y).max(0.0);
        dx.hypot(dy)
    }
}

/// Union where `None` is the identity.
pub fn union(a: Option<BBox>, b: Option<BBox>) -> Option<BBox> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.union(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_corners() {
        let b = BBox::new(10.0, 2.0, 0.0, 8.0);
        assert_eq!(b, BBox { min_x: 0.0, min_y: 2.0, max_x: 10.0, max_y: 8.0 });
    }

    #[test]
    fn test_union_with_none_is_identity() {
        let b = BBox::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(union(None, Some(b)), Some(b));
        assert_eq!(union(Some(b), None), Some(b));
        assert_eq!(union(None, None), None);
    }

    #[test]
    fn test_union() {
        let a = BBox::new(0.0, 0.0, 2.0, 2.0);
        let b = BBox::new(1.0, -1.0, 5.0, 1.0);
        assert_eq!(a.union(b), BBox::new(0.0, -1.0, 5.0, 2.0));
    }

    #[test]
    fn test_translate_and_scale() {
        let b = BBox::new(2.0, 2.0, 10.0, 10.0).scale(0.5).translate(1.0, -1.0);
        assert_eq!(b, BBox::new(2.0, 0.0, 6.0, 4.0));
    }

    #[test]
    fn test_distance_overlap_and_touch_is_zero() {
        let a = BBox::new(0.0, 0.0, 4.0, 4.0);
        assert_eq!(a.distance(&BBox::new(2.0, 2.0, 6.0, 6.0)), 0.0);
        assert_eq!(a.distance(&BBox::new(4.0, 0.0, 6.0, 4.0)), 0.0);
    }

    #[test]
    fn test_distance_diagonal() {
        let a = BBox::new(0.0, 0.0, 1.0, 1.0);
        let b = BBox::new(4.0, 5.0, 6.0, 6.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_center_and_dimensions() {
        let b = BBox::new(2.0, 4.0, 6.0, 12.0);
        assert_eq!(b.center(), Point::new(4.0, 8.0));
        assert_eq!(b.max_dimension(), 8.0);
    }
}
