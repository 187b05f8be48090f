//! # Curve math
//!
//! Closed-form extrema for Bézier curves and the endpoint-to-center
//! conversion for elliptical arcs.
//!
//! Bézier boxes are exact: the derivative of each coordinate is solved for
//! roots in (0, 1) and the curve is evaluated there. Arc boxes sample the
//! swept angle and then add the ellipse's axis-aligned extrema that fall
//! inside the sweep, so the result never under-sizes the true curve.

use std::f64::consts::TAU;

use super::{BBox, Point};

/// Below this magnitude a polynomial coefficient is treated as zero.
pub const EPSILON: f64 = 1e-8;

/// Uniform angle steps used when sampling an arc (21 samples).
pub const ARC_SAMPLE_STEPS: usize = 20;

pub fn cubic_point(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
}

pub fn quad_point(p0: f64, p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * p0 + 2.0 * mt * t * p1 + t * t * p2
}

/// Parameters in (0, 1) where one coordinate of a cubic has a local extremum.
pub fn cubic_extrema(p0: f64, p1: f64, p2: f64, p3: f64) -> Vec<f64> {
    let a = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
    let b = 2.0 * (p0 - 2.0 * p1 + p2);
    let c = p1 - p0;

    let mut roots = Vec::with_capacity(2);
    if a.abs() < EPSILON {
        if b.abs() > EPSILON {
            roots.push(-c / b);
        }
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            let root = disc.sqrt();
            roots.push((-b + root) / (2.0 * a));
            roots.push((-b - root) / (2.0 * a));
        }
    }

    roots.retain(|&t| t > 0.0 && t < 1.0);
    roots
}

/// The parameter in (0, 1) where one coordinate of a quadratic turns, if any.
pub fn quad_extremum(p0: f64, p1: f64, p2: f64) -> Option<f64> {
    let denom = p0 - 2.0 * p1 + p2;
    if denom.abs() < EPSILON {
        return None;
    }
    let t = (p0 - p1) / denom;
    (t > 0.0 && t < 1.0).then_some(t)
}

pub fn eval_cubic(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    Point::new(
        cubic_point(p0.x, p1.x, p2.x, p3.x, t),
        cubic_point(p0.y, p1.y, p2.y, p3.y, t),
    )
}

pub fn eval_quad(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    Point::new(
        quad_point(p0.x, p1.x, p2.x, t),
        quad_point(p0.y, p1.y, p2.y, t),
    )
}

pub fn cubic_bbox(p0: Point, p1: Point, p2: Point, p3: Point) -> BBox {
    let mut bbox = BBox::from_points(p0, p3);
    for t in cubic_extrema(p0.x, p1.x, p2.x, p3.x) {
        let x = cubic_point(p0.x, p1.x, p2.x, p3.x, t);
        bbox = bbox.include(Point::new(x, bbox.min_y));
    }
    for t in cubic_extrema(p0.y, p1.y, p2.y, p3.y) {
        let y = cubic_point(p0.y, p1.y, p2.y, p3.y, t);
        bbox = bbox.include(Point::new(bbox.min_x, y));
    }
    bbox
}

pub fn quad_bbox(p0: Point, p1: Point, p2: Point) -> BBox {
    let mut bbox = BBox::from_points(p0, p2);
    if let Some(t) = quad_extremum(p0.x, p1.x, p2.x) {
        bbox = bbox.include(Point::new(quad_point(p0.x, p1.x, p2.x, t), bbox.min_y));
    }
    if let Some(t) = quad_extremum(p0.y, p1.y, p2.y) {
        bbox = bbox.include(Point::new(bbox.min_x, quad_point(p0.y, p1.y, p2.y, t)));
    }
    bbox
}

/// An elliptical arc in SVG endpoint form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgArc {
    pub from: Point,
    pub to: Point,
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse's x axis, in degrees.
    pub x_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// An elliptical arc in center form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterArc {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
    pub cos_phi: f64,
    pub sin_phi: f64,
    pub start_angle: f64,
    /// Signed; negative sweeps run clockwise in a y-up frame.
    pub sweep_angle: f64,
}

impl SvgArc {
    /// Converts to center form.
    ///
    /// Returns `None` when the arc is degenerate: a zero radius (which SVG
    /// draws as a straight line) or coincident endpoints (which draw nothing).
    /// Radii too small to span the endpoints are scaled up uniformly, as the
    /// SVG arc implementation notes prescribe.
    pub fn to_center(&self) -> Option<CenterArc> {
        if self.rx == 0.0 || self.ry == 0.0 || self.from == self.to {
            return None;
        }

        let phi = self.x_rotation.rem_euclid(360.0).to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();

        let dx = (self.from.x - self.to.x) / 2.0;
        let dy = (self.from.y - self.to.y) / 2.0;
        let x1p = cos_phi * dx + sin_phi * dy;
        let y1p = -sin_phi * dx + cos_phi * dy;

        let mut rx = self.rx.abs();
        let mut ry = self.ry.abs();
        let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
        if lambda > 1.0 {
            let s = lambda.sqrt();
            rx *= s;
            ry *= s;
        }

        let sign = if self.large_arc == self.sweep { -1.0 } else { 1.0 };
        let num = rx * rx * ry * ry - rx * rx * y1p * y1p - ry * ry * x1p * x1p;
        let den = rx * rx * y1p * y1p + ry * ry * x1p * x1p;
        let coef = if den != 0.0 {
            sign * (num / den).max(0.0).sqrt()
        } else {
            0.0
        };
        let cxp = coef * (rx * y1p / ry);
        let cyp = coef * (-ry * x1p / rx);

        let center = Point::new(
            cos_phi * cxp - sin_phi * cyp + (self.from.x + self.to.x) / 2.0,
            sin_phi * cxp + cos_phi * cyp + (self.from.y + self.to.y) / 2.0,
        );

        let v1 = ((x1p - cxp) / rx, (y1p - cyp) / ry);
        let v2 = ((-x1p - cxp) / rx, (-y1p - cyp) / ry);
        let start_angle = angle_between((1.0, 0.0), v1);
        let mut sweep_angle = angle_between(v1, v2);
        if !self.sweep && sweep_angle > 0.0 {
            sweep_angle -= TAU;
        }
        if self.sweep && sweep_angle < 0.0 {
            sweep_angle += TAU;
        }

        Some(CenterArc {
            center,
            rx,
            ry,
            cos_phi,
            sin_phi,
            start_angle,
            sweep_angle,
        })
    }

    /// Bounding box of the arc. Degenerate arcs measure as the straight line
    /// between their endpoints.
    pub fn bbox(&self) -> BBox {
        let line = BBox::from_points(self.from, self.to);
        match self.to_center() {
            Some(arc) => arc.bbox().union(line),
            None => line,
        }
    }
}

impl CenterArc {
    /// Point at `angle` on the full ellipse.
    pub fn point_at_angle(&self, angle: f64) -> Point {
        let (sin_t, cos_t) = angle.sin_cos();
        Point::new(
            self.center.x + self.rx * self.cos_phi * cos_t - self.ry * self.sin_phi * sin_t,
            self.center.y + self.rx * self.sin_phi * cos_t + self.ry * self.cos_phi * sin_t,
        )
    }

    /// Point at parameter `t` in [0, 1] along the swept range.
    pub fn point_at(&self, t: f64) -> Point {
        self.point_at_angle(self.start_angle + self.sweep_angle * t)
    }

    fn sweeps_through(&self, angle: f64) -> bool {
        let offset = if self.sweep_angle >= 0.0 {
            angle - self.start_angle
        } else {
            self.start_angle - angle
        };
        offset.rem_euclid(TAU) <= self.sweep_angle.abs()
    }

    pub fn bbox(&self) -> BBox {
        let mut bbox = BBox::from_point(self.point_at(0.0));
        for i in 1..=ARC_SAMPLE_STEPS {
            bbox = bbox.include(self.point_at(i as f64 / ARC_SAMPLE_STEPS as f64));
        }

        // Angles where dx/dθ = 0 and dy/dθ = 0 on the rotated ellipse.
        let theta_x = (-self.ry * self.sin_phi).atan2(self.rx * self.cos_phi);
        let theta_y = (self.ry * self.cos_phi).atan2(self.rx * self.sin_phi);
        for angle in [theta_x, theta_x + TAU / 2.0, theta_y, theta_y + TAU / 2.0] {
            if self.sweeps_through(angle) {
                bbox = bbox.include(self.point_at_angle(angle));
            }
        }
        bbox
    }
}

fn angle_between(u: (f64, f64), v: (f64, f64)) -> f64 {
    (u.0 * v.1 - u.1 * v.0).atan2(u.0 * v.0 + u.1 * v.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn assert_box(b: BBox, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
        assert!(
            approx(b.min_x, min_x) && approx(b.min_y, min_y) && approx(b.max_x, max_x) && approx(b.max_y, max_y),
            "got {:?}, expected ({}, {}, {}, {})",
            b, min_x, min_y, max_x, max_y
        );
    }

    fn sampled_cubic(p: [Point; 4], n: usize) -> BBox {
        let mut b = BBox::from_point(p[0]);
        for i in 0..=n {
            b = b.include(eval_cubic(p[0], p[1], p[2], p[3], i as f64 / n as f64));
        }
        b
    }

    fn sampled_quad(p: [Point; 3], n: usize) -> BBox {
        let mut b = BBox::from_point(p[0]);
        for i in 0..=n {
            b = b.include(eval_quad(p[0], p[1], p[2], i as f64 / n as f64));
        }
        b
    }

    /// Small deterministic generator so the randomized checks are repeatable.
    struct XorShift(u64);

    impl XorShift {
        fn next(&mut self) -> f64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            (self.0 % 20_000) as f64 / 100.0 - 100.0
        }

        fn point(&mut self) -> Point {
            Point::new(self.next(), self.next())
        }
    }

    #[test]
    fn test_cubic_extrema_symmetric_hump() {
        let ts = cubic_extrema(0.0, 10.0, 10.0, 0.0);
        assert_eq!(ts.len(), 1);
        assert!(approx(ts[0], 0.5));
    }

    #[test]
    fn test_cubic_extrema_linear_fallback() {
        // a == 0: p0 - 3p1 + 3p2 - p3 vanishes for evenly spaced controls
        assert!(cubic_extrema(0.0, 1.0, 2.0, 3.0).is_empty());
        let ts = cubic_extrema(0.0, 3.0, 3.0, 0.0);
        assert_eq!(ts.len(), 1);
    }

    #[test]
    fn test_quad_extremum() {
        assert!(approx(quad_extremum(0.0, 10.0, 0.0).unwrap(), 0.5));
        assert!(quad_extremum(0.0, 5.0, 10.0).is_none());
    }

    #[test]
    fn test_cubic_bbox_hump() {
        let b = cubic_bbox(
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        );
        assert_box(b, 0.0, 0.0, 10.0, 7.5);
    }

    #[test]
    fn test_cubic_bbox_encloses_dense_samples() {
        let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
        for _ in 0..200 {
            let p = [rng.point(), rng.point(), rng.point(), rng.point()];
            let exact = cubic_bbox(p[0], p[1], p[2], p[3]);
            let sampled = sampled_cubic(p, 1000);
            assert!(exact.min_x <= sampled.min_x + 1e-9 && exact.max_x >= sampled.max_x - 1e-9);
            assert!(exact.min_y <= sampled.min_y + 1e-9 && exact.max_y >= sampled.max_y - 1e-9);
            assert!((exact.min_x - sampled.min_x).abs() < 0.01);
            assert!((exact.max_x - sampled.max_x).abs() < 0.01);
            assert!((exact.min_y - sampled.min_y).abs() < 0.01);
            assert!((exact.max_y - sampled.max_y).abs() < 0.01);
        }
    }

    #[test]
    fn test_quad_bbox_encloses_dense_samples() {
        let mut rng = XorShift(0x2545_F491_4F6C_DD1D);
        for _ in 0..200 {
            let p = [rng.point(), rng.point(), rng.point()];
            let exact = quad_bbox(p[0], p[1], p[2]);
            let sampled = sampled_quad(p, 1000);
            assert!(exact.min_x <= sampled.min_x + 1e-9 && exact.max_x >= sampled.max_x - 1e-9);
            assert!(exact.min_y <= sampled.min_y + 1e-9 && exact.max_y >= sampled.max_y - 1e-9);
            assert!((exact.min_x - sampled.min_x).abs() < 0.01);
            assert!((exact.max_y - sampled.max_y).abs() < 0.01);
        }
    }

    #[test]
    fn test_arc_quarter_circle() {
        let arc = SvgArc {
            from: Point::new(10.0, 0.0),
            to: Point::new(0.0, 10.0),
            rx: 10.0,
            ry: 10.0,
            x_rotation: 0.0,
            large_arc: false,
            sweep: true,
        };
        let center = arc.to_center().unwrap();
        assert!(approx(center.center.x, 0.0) && approx(center.center.y, 0.0));
        assert_box(arc.bbox(), 0.0, 0.0, 10.0, 10.0);
    }

    #[test]
    fn test_arc_large_sweep_reaches_exact_extrema() {
        let arc = SvgArc {
            from: Point::new(10.0, 0.0),
            to: Point::new(0.0, 10.0),
            rx: 10.0,
            ry: 10.0,
            x_rotation: 0.0,
            large_arc: true,
            sweep: true,
        };
        let center = arc.to_center().unwrap();
        assert!(approx(center.center.x, 10.0) && approx(center.center.y, 10.0));
        assert!(approx(center.sweep_angle, 1.5 * std::f64::consts::PI));
        assert_box(arc.bbox(), 0.0, 0.0, 20.0, 20.0);
    }

    #[test]
    fn test_arc_radii_scaled_up_when_too_small() {
        let arc = SvgArc {
            from: Point::new(0.0, 0.0),
            to: Point::new(10.0, 0.0),
            rx: 1.0,
            ry: 1.0,
            x_rotation: 0.0,
            large_arc: false,
            sweep: true,
        };
        let center = arc.to_center().unwrap();
        assert!(approx(center.rx, 5.0) && approx(center.ry, 5.0));
        assert_box(arc.bbox(), 0.0, -5.0, 10.0, 0.0);

        let flipped = SvgArc { sweep: false, ..arc };
        assert_box(flipped.bbox(), 0.0, 0.0, 10.0, 5.0);
    }

    #[test]
    fn test_arc_zero_radius_is_a_line() {
        let arc = SvgArc {
            from: Point::new(1.0, 2.0),
            to: Point::new(5.0, -3.0),
            rx: 0.0,
            ry: 4.0,
            x_rotation: 30.0,
            large_arc: true,
            sweep: false,
        };
        assert!(arc.to_center().is_none());
        assert_box(arc.bbox(), 1.0, -3.0, 5.0, 2.0);
    }

    #[test]
    fn test_rotated_arc_encloses_samples() {
        let arc = SvgArc {
            from: Point::new(0.0, 0.0),
            to: Point::new(7.0, 3.0),
            rx: 6.0,
            ry: 2.0,
            x_rotation: 35.0,
            large_arc: true,
            sweep: false,
        };
        let center = arc.to_center().unwrap();
        let b = arc.bbox();
        for i in 0..=2000 {
            let p = center.point_at(i as f64 / 2000.0);
            assert!(p.x >= b.min_x - 1e-9 && p.x <= b.max_x + 1e-9);
            assert!(p.y >= b.min_y - 1e-9 && p.y <= b.max_y + 1e-9);
        }
    }

    #[test]
    fn test_arc_endpoints_match() {
        let arc = SvgArc {
            from: Point::new(3.0, 4.0),
            to: Point::new(-2.0, 8.0),
            rx: 5.0,
            ry: 3.0,
            x_rotation: -20.0,
            large_arc: false,
            sweep: false,
        };
        let c = arc.to_center().unwrap();
        let start = c.point_at(0.0);
        let end = c.point_at(1.0);
        assert!(start.distance(arc.from) < 1e-6);
        assert!(end.distance(arc.to) < 1e-6);
    }
}
