//! [`PolygonOps`] on top of the `clipper2` crate.
//!
//! Coordinates go through clipper2's `Centi` scaler, so results are exact to
//! 0.01 viewBox units. That is far below what a drawable can show.

use clipper2::{difference, inflate, union, xor, Centi, EndType, FillRule, JoinType, Paths};

use crate::error::GeometryError;
use crate::geometry::Point;

use super::{PolygonOps, Ring, Shape};

const FILL_RULE: FillRule = FillRule::NonZero;
const MITER_LIMIT: f64 = 2.0;

/// Polygon booleans backed by Clipper2.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClipperOps;

fn to_paths(rings: &[Ring]) -> Paths<Centi> {
    let raw: Vec<Vec<(f64, f64)>> = rings
        .iter()
        .filter(|ring| ring.len() >= 3)
        .map(|ring| ring.iter().map(|p| (p.x, p.y)).collect())
        .collect();
    Paths::from(raw)
}

fn from_paths(paths: &Paths<Centi>) -> Shape {
    Shape::new(
        paths
            .iter()
            .map(|path| path.iter().map(|pt| Point::new(pt.x(), pt.y())).collect::<Ring>())
            .filter(|ring| ring.len() >= 3)
            .collect(),
    )
}

fn op_error(op: &str, err: impl std::fmt::Debug) -> GeometryError {
    GeometryError::Operation(format!("{op}: {err:?}"))
}

impl PolygonOps for ClipperOps {
    fn name(&self) -> &'static str {
        "clipper2"
    }

    fn from_outlines(&self, rings: &[Ring]) -> Result<Shape, GeometryError> {
        // Each ring is resolved on its own first, so a counter-wound inner
        // subpath adds area instead of cutting a hole.
        let mut acc: Option<Paths<Centi>> = None;
        for ring in rings.iter().filter(|ring| ring.len() >= 3) {
            let empty: Vec<Vec<(f64, f64)>> = Vec::new();
            let single = union::<Centi>(to_paths(std::slice::from_ref(ring)), empty, FILL_RULE)
                .map_err(|e| op_error("union", e))?;
            acc = Some(match acc {
                Some(prev) => union::<Centi>(prev, single, FILL_RULE).map_err(|e| op_error("union", e))?,
                None => single,
            });
        }
        Ok(acc.map(|paths| from_paths(&paths)).unwrap_or_default())
    }

    fn union(&self, a: &Shape, b: &Shape) -> Result<Shape, GeometryError> {
        let result = union::<Centi>(to_paths(&a.rings), to_paths(&b.rings), FILL_RULE)
            .map_err(|e| op_error("union", e))?;
        Ok(from_paths(&result))
    }

    fn buffer(&self, shape: &Shape, distance: f64) -> Result<Shape, GeometryError> {
        let result = inflate(to_paths(&shape.rings), distance, JoinType::Round, EndType::Polygon, MITER_LIMIT);
        Ok(from_paths(&result))
    }

    fn difference(&self, a: &Shape, b: &Shape) -> Result<Shape, GeometryError> {
        let result = difference::<Centi>(to_paths(&a.rings), to_paths(&b.rings), FILL_RULE)
            .map_err(|e| op_error("difference", e))?;
        Ok(from_paths(&result))
    }

    fn symmetric_difference(&self, a: &Shape, b: &Shape) -> Result<Shape, GeometryError> {
        let result = xor::<Centi>(to_paths(&a.rings), to_paths(&b.rings), FILL_RULE)
            .map_err(|e| op_error("xor", e))?;
        Ok(from_paths(&result))
    }

    fn simplify(&self, shape: &Shape, tolerance: f64) -> Result<Shape, GeometryError> {
        let result = to_paths(&shape.rings).simplify(tolerance, false);
        Ok(from_paths(&result))
    }
}
