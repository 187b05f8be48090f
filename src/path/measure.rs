//! Bounding boxes of path data.

use crate::error::PathError;
use crate::geometry::curve::{self, SvgArc};
use crate::geometry::{bbox, BBox, Point};

use super::interpreter::{interpret, PathSink, Segment};

/// Accumulates the exact bounding box of every segment it receives.
///
/// Move-to points are counted, but a path made only of move-tos draws
/// nothing and measures as `None`.
#[derive(Debug, Default)]
pub struct BoundsSink {
    bbox: Option<BBox>,
    drawn: bool,
}

impl BoundsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> Option<BBox> {
        if self.drawn {
            self.bbox
        } else {
            None
        }
    }

    fn add(&mut self, b: BBox) {
        self.bbox = bbox::union(self.bbox, Some(b));
    }
}

impl PathSink for BoundsSink {
    fn segment(&mut self, from: Point, segment: &Segment) {
        match *segment {
            Segment::MoveTo(p) => {
                self.add(BBox::from_point(p));
                return;
            }
            Segment::LineTo(to) => self.add(BBox::from_points(from, to)),
            Segment::CubicTo { ctrl1, ctrl2, to } => self.add(curve::cubic_bbox(from, ctrl1, ctrl2, to)),
            Segment::QuadTo { ctrl, to } => self.add(curve::quad_bbox(from, ctrl, to)),
            Segment::ArcTo { rx, ry, x_rotation, large_arc, sweep, to } => {
                let arc = SvgArc { from, to, rx, ry, x_rotation, large_arc, sweep };
                self.add(arc.bbox());
            }
            Segment::ClosePath { to } => self.add(BBox::from_point(to)),
        }
        self.drawn = true;
    }
}

/// Computes the bounding box of a path-data string.
///
/// Returns `Ok(None)` for empty data and for data that never draws.
pub fn path_bbox(data: &str) -> Result<Option<BBox>, PathError> {
    let mut sink = BoundsSink::new();
    interpret(data, &mut sink)?;
    Ok(sink.finish())
}
