//! Sampling path data into closed polygons.
//!
//! Only the rounded cut-out needs this: polygon booleans work on rings of
//! points, not on curves.

use crate::error::PathError;
use crate::geometry::curve::{self, SvgArc};
use crate::geometry::Point;

use super::interpreter::{interpret, PathSink, Segment};

/// Samples every drawing segment at `t = i / samples` for `i in 0..samples`
/// and collects one ring per subpath.
pub struct FlattenSink {
    samples: usize,
    rings: Vec<Vec<Point>>,
    current: Vec<Point>,
    length: f64,
    last: Point,
}

impl FlattenSink {
    pub fn new(samples: usize) -> Self {
        FlattenSink {
            samples: samples.max(1),
            rings: Vec::new(),
            current: Vec::new(),
            length: 0.0,
            last: Point::default(),
        }
    }

    pub fn finish(mut self) -> Vec<Vec<Point>> {
        self.end_subpath();
        self.rings
    }

    fn sample(&mut self, from: Point, to: Point, eval: impl Fn(f64) -> Point) {
        let mut prev = from;
        for i in 0..self.samples {
            let p = eval(i as f64 / self.samples as f64);
            self.length += prev.distance(p);
            self.current.push(p);
            prev = p;
        }
        self.length += prev.distance(to);
        self.last = to;
    }

    fn end_subpath(&mut self) {
        let mut ring = std::mem::take(&mut self.current);
        let length = std::mem::replace(&mut self.length, 0.0);
        if ring.is_empty() || length == 0.0 {
            return;
        }
        ring.push(self.last);
        if ring.len() < 3 {
            return;
        }
        if ring.first() != ring.last() {
            ring.push(ring[0]);
        }
        self.rings.push(ring);
    }
}

impl PathSink for FlattenSink {
    fn segment(&mut self, from: Point, segment: &Segment) {
        match *segment {
            Segment::MoveTo(_) => self.end_subpath(),
            Segment::LineTo(to) => self.sample(from, to, |t| {
                Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
            }),
            Segment::CubicTo { ctrl1, ctrl2, to } => {
                self.sample(from, to, |t| curve::eval_cubic(from, ctrl1, ctrl2, to, t))
            }
            Segment::QuadTo { ctrl, to } => self.sample(from, to, |t| curve::eval_quad(from, ctrl, to, t)),
            Segment::ArcTo { rx, ry, x_rotation, large_arc, sweep, to } => {
                let arc = SvgArc { from, to, rx, ry, x_rotation, large_arc, sweep };
                match arc.to_center() {
                    Some(center) => self.sample(from, to, |t| center.point_at(t)),
                    None => self.sample(from, to, |t| {
                        Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
                    }),
                }
            }
            Segment::ClosePath { to } => {
                if from != to {
                    self.sample(from, to, |t| {
                        Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
                    });
                }
                self.end_subpath();
            }
        }
    }
}

/// Flattens `data` into closed rings, one per subpath that has length.
/// Rings with fewer than three points are dropped.
pub fn sample_subpaths(data: &str, samples_per_segment: usize) -> Result<Vec<Vec<Point>>, PathError> {
    let mut sink = FlattenSink::new(samples_per_segment);
    interpret(data, &mut sink)?;
    Ok(sink.finish())
}
