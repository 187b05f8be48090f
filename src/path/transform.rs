//! Rewriting path data under a uniform scale plus translation.
//!
//! Output is always absolute. `H`/`V` become `L`, shorthand curves become
//! explicit `C`/`Q` with the reflected control point written out, and arc
//! radii are multiplied by the scale while rotation and flags pass through.

use crate::error::PathError;
use crate::geometry::Point;
use crate::number::fmt_number;

use super::interpreter::{interpret, PathSink, Segment};

/// The map `p ↦ p * scale + (tx, ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine { scale: 1.0, tx: 0.0, ty: 0.0 };

    pub fn new(scale: f64, tx: f64, ty: f64) -> Self {
        Affine { scale, tx, ty }
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Affine { scale: 1.0, tx, ty }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.scale + self.tx, p.y * self.scale + self.ty)
    }
}

/// Emits each segment as an absolute command string.
pub struct TransformSink {
    affine: Affine,
    out: Vec<String>,
}

impl TransformSink {
    pub fn new(affine: Affine) -> Self {
        TransformSink { affine, out: Vec::new() }
    }

    pub fn finish(self) -> String {
        self.out.join(" ")
    }

    fn pt(&self, p: Point) -> String {
        let p = self.affine.apply(p);
        format!("{} {}", fmt_number(p.x), fmt_number(p.y))
    }
}

impl PathSink for TransformSink {
    fn segment(&mut self, _from: Point, segment: &Segment) {
        let cmd = match *segment {
            Segment::MoveTo(p) => format!("M{}", self.pt(p)),
            Segment::LineTo(p) => format!("L{}", self.pt(p)),
            Segment::CubicTo { ctrl1, ctrl2, to } => {
                format!("C{} {} {}", self.pt(ctrl1), self.pt(ctrl2), self.pt(to))
            }
            Segment::QuadTo { ctrl, to } => format!("Q{} {}", self.pt(ctrl), self.pt(to)),
            Segment::ArcTo { rx, ry, x_rotation, large_arc, sweep, to } => format!(
                "A{} {} {} {} {} {}",
                fmt_number(rx * self.affine.scale),
                fmt_number(ry * self.affine.scale),
                fmt_number(x_rotation),
                large_arc as u8,
                sweep as u8,
                self.pt(to)
            ),
            Segment::ClosePath { .. } => "Z".to_string(),
        };
        self.out.push(cmd);
    }
}

/// Rewrites `data` under `affine`. Empty data yields an empty string.
pub fn transform_path_data(data: &str, affine: Affine) -> Result<String, PathError> {
    let mut sink = TransformSink::new(affine);
    interpret(data, &mut sink)?;
    Ok(sink.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::measure::path_bbox;

    #[test]
    fn test_identity_canonicalizes() {
        let out = transform_path_data("M 1,2 l 3 4 h 1 v -1 z", Affine::IDENTITY).unwrap();
        assert_eq!(out, "M1 2 L4 6 L5 6 L5 5 Z");
    }

    #[test]
    fn test_identity_round_trip_is_stable() {
        let data = "M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zm0 18c-4.41 0-8-3.59-8-8s3.59-8 8-8 8 3.59 8 8-3.59 8-8 8z";
        let once = transform_path_data(data, Affine::IDENTITY).unwrap();
        let twice = transform_path_data(&once, Affine::IDENTITY).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_shorthand_written_explicitly() {
        let out = transform_path_data("C 0,0 10,0 10,10 S 10,20 0,20", Affine::IDENTITY).unwrap();
        assert_eq!(out, "C0 0 10 0 10 10 C10 20 10 20 0 20");

        let out = transform_path_data("M0 0 Q5 10 10 0 t10 0", Affine::IDENTITY).unwrap();
        assert_eq!(out, "M0 0 Q5 10 10 0 Q15 -10 20 0");
    }

    #[test]
    fn test_scale_and_translate() {
        let out = transform_path_data("M2 2 L10 10", Affine::new(0.5, 19.0, -1.0)).unwrap();
        assert_eq!(out, "M20 0 L24 4");
    }

    #[test]
    fn test_arc_radii_scale_flags_pass_through() {
        let out = transform_path_data("M0 0 a4 2 30 1 0 8 0", Affine::new(0.5, 1.0, 1.0)).unwrap();
        assert_eq!(out, "M1 1 A2 1 30 1 0 5 1");
    }

    #[test]
    fn test_bbox_commutes_with_transform() {
        let paths = [
            "M 100 100 L 300 100 L 200 300 z",
            "M0 0 C0 10 10 10 10 0 S 20 -10 20 0",
            "M3 3 Q9 12 15 3 T 27 3 z",
            "M-5 2 h4 v-7 l2 3 c1 1 2 -3 4 0 z",
        ];
        let affine = Affine::new(0.375, 7.25, -3.5);
        for data in paths {
            let original = path_bbox(data).unwrap().unwrap();
            let moved = path_bbox(&transform_path_data(data, affine).unwrap()).unwrap().unwrap();
            let expected = original.scale(affine.scale).translate(affine.tx, affine.ty);
            // Output is rounded to four decimals.
            assert!((moved.min_x - expected.min_x).abs() < 1e-3, "{}", data);
            assert!((moved.min_y - expected.min_y).abs() < 1e-3, "{}", data);
            assert!((moved.max_x - expected.max_x).abs() < 1e-3, "{}", data);
            assert!((moved.max_y - expected.max_y).abs() < 1e-3, "{}", data);
        }
    }

    #[test]
    fn test_arc_bbox_commutes_within_tolerance() {
        let data = "M12 2a10 10 0 1 1 0 20a10 10 0 1 1 0-20z";
        let affine = Affine::new(0.5, 12.0, 0.0);
        let original = path_bbox(data).unwrap().unwrap();
        let moved = path_bbox(&transform_path_data(data, affine).unwrap()).unwrap().unwrap();
        let expected = original.scale(0.5).translate(12.0, 0.0);
        assert!((moved.min_x - expected.min_x).abs() < 1e-3);
        assert!((moved.max_y - expected.max_y).abs() < 1e-3);
    }

    #[test]
    fn test_empty() {
        assert_eq!(transform_path_data("", Affine::IDENTITY).unwrap(), "");
    }
}
