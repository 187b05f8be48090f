//! # Geometry primitives
//!
//! Points, axis-aligned boxes and the closed-form curve math used to measure
//! path segments.

pub mod bbox;
pub mod curve;

pub use bbox::BBox;

/// A point in user space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Mirror `self` through `center`. Used for shorthand curve commands.
    pub fn reflect_about(self, center: Point) -> Point {
        Point::new(2.0 * center.x - self.x, 2.0 * center.y - self.y)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_about() {
        let p = Point::new(8.0, 2.0).reflect_about(Point::new(10.0, 10.0));
        assert_eq!(p, Point::new(12.0, 18.0));
    }

    #[test]
    fn test_reflect_about_self_is_identity() {
        let c = Point::new(10.0, 10.0);
        assert_eq!(c.reflect_about(c), c);
    }
}
