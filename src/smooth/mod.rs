//! # Rounded Cut-out
//!
//! The even-odd cut-out is a scaled copy of the overlay, so its corners are
//! as sharp as the overlay's. The rounded cut-out instead buffers the placed
//! overlay outline outward by the gap with round joins, then subtracts that
//! region from the base. This needs real polygon booleans, which live behind
//! the [`PolygonOps`] capability.
//!
//! ```text
//! overlay paths ─ sample ─ place ─ union ─ buffer(gap) ─ simplify ─→ hole
//! base paths ─── sample ─ centre ─ xor-fold ─ minus hole ─ simplify ─→ base
//! ```
//!
//! When no capability is compiled in, [`Smoothing::detect`] returns
//! [`Smoothing::Unavailable`] and the composer keeps the even-odd cut-out.

#[cfg(feature = "clipper")]
pub mod clipper;

use std::fmt;

use crate::error::GeometryError;
use crate::geometry::Point;
use crate::layout::LayoutPlan;
use crate::number::fmt_number;
use crate::path::flatten::sample_subpaths;
use crate::svg::ParsedIcon;

/// A closed ring of points. The closing edge back to the first point is
/// implied.
pub type Ring = Vec<Point>;

/// A planar region described by its boundary rings, filled with the
/// non-zero rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub rings: Vec<Ring>,
}

impl Shape {
    pub fn new(rings: Vec<Ring>) -> Self {
        Shape { rings }
    }

    pub fn is_empty(&self) -> bool {
        self.rings.iter().all(|r| r.is_empty())
    }

    pub fn translate(mut self, dx: f64, dy: f64) -> Self {
        for p in self.rings.iter_mut().flatten() {
            *p = p.offset(dx, dy);
        }
        self
    }

    /// Scales about the origin.
    pub fn scale(mut self, k: f64) -> Self {
        for p in self.rings.iter_mut().flatten() {
            *p = Point::new(p.x * k, p.y * k);
        }
        self
    }

    /// One `M x y L x y … Z` string per non-empty ring.
    pub fn to_path_data(&self) -> Vec<String> {
        self.rings
            .iter()
            .filter_map(|ring| {
                let (first, rest) = ring.split_first()?;
                let mut parts = vec![format!("M{} {}", fmt_number(first.x), fmt_number(first.y))];
                parts.extend(rest.iter().map(|p| format!("L{} {}", fmt_number(p.x), fmt_number(p.y))));
                parts.push("Z".to_string());
                Some(parts.join(" "))
            })
            .collect()
    }
}

/// Polygon booleans needed by the rounded cut-out.
///
/// Implementations are stateless; translation and scaling are plain
/// [`Shape`] methods.
pub trait PolygonOps: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// The filled region covered by any of `rings`. Each ring fills its own
    /// interior whatever its winding, so an inner ring never cuts a hole.
    fn from_outlines(&self, rings: &[Ring]) -> Result<Shape, GeometryError>;

    fn union(&self, a: &Shape, b: &Shape) -> Result<Shape, GeometryError>;

    /// Grows `shape` outward by `distance` with round joins.
    fn buffer(&self, shape: &Shape, distance: f64) -> Result<Shape, GeometryError>;

    fn difference(&self, a: &Shape, b: &Shape) -> Result<Shape, GeometryError>;

    fn symmetric_difference(&self, a: &Shape, b: &Shape) -> Result<Shape, GeometryError>;

    /// Drops vertices closer than `tolerance` to the boundary without
    /// introducing self-intersections.
    fn simplify(&self, shape: &Shape, tolerance: f64) -> Result<Shape, GeometryError>;
}

/// Whether a polygon capability is present.
pub enum Smoothing {
    Unavailable,
    Available(Box<dyn PolygonOps>),
}

impl Smoothing {
    /// The best capability compiled into this build.
    pub fn detect() -> Self {
        #[cfg(feature = "clipper")]
        {
            Smoothing::Available(Box::new(clipper::ClipperOps::default()))
        }
        #[cfg(not(feature = "clipper"))]
        {
            Smoothing::Unavailable
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Smoothing::Available(_))
    }

    pub fn ops(&self) -> Option<&dyn PolygonOps> {
        match self {
            Smoothing::Available(ops) => Some(ops.as_ref()),
            Smoothing::Unavailable => None,
        }
    }
}

impl fmt::Debug for Smoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Smoothing::Unavailable => write!(f, "Unavailable"),
            Smoothing::Available(ops) => write!(f, "Available({})", ops.name()),
        }
    }
}

/// Result of the rounded cut-out pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothCutout {
    /// The buffered overlay silhouette, in base viewport coordinates.
    pub hole: Shape,
    /// The centred base minus the hole. `None` when no base path encloses
    /// any area.
    pub base: Option<Shape>,
}

/// Runs the rounded cut-out pipeline for an already planned layout.
///
/// Returns `Ok(None)` when no overlay path encloses any area, in which case
/// the caller keeps the even-odd cut-out.
pub fn smooth_cutout(
    ops: &dyn PolygonOps,
    base: &ParsedIcon,
    overlay: &ParsedIcon,
    plan: &LayoutPlan,
    sample_points: usize,
) -> Result<Option<SmoothCutout>, GeometryError> {
    let mut hole: Option<Shape> = None;
    for path in &overlay.paths {
        let rings = sample_subpaths(&path.data, sample_points)?;
        if rings.is_empty() {
            continue;
        }
        let shape = ops
            .from_outlines(&rings)?
            .translate(plan.overlay_offset.x, plan.overlay_offset.y)
            .scale(plan.overlay_scale)
            .translate(plan.overlay_translate.x, plan.overlay_translate.y);
        hole = Some(match hole {
            Some(acc) => ops.union(&acc, &shape)?,
            None => shape,
        });
    }
    let Some(hole) = hole else {
        return Ok(None);
    };

    let mut hole = ops.buffer(&hole, plan.gap_in_view_units)?;
    if plan.simplify_in_view_units > 0.0 {
        hole = ops.simplify(&hole, plan.simplify_in_view_units)?;
    }

    let mut base_rings = Vec::new();
    for path in &base.paths {
        base_rings.extend(sample_subpaths(&path.data, sample_points)?);
    }
    let mut folded: Option<Shape> = None;
    for ring in base_rings {
        let poly = Shape::new(vec![ring]).translate(plan.base_translate.x, plan.base_translate.y);
        folded = Some(match folded {
            Some(acc) => ops.symmetric_difference(&acc, &poly)?,
            None => ops.from_outlines(&poly.rings)?,
        });
    }

    let base = match folded {
        Some(shape) => {
            let mut cut = ops.difference(&shape, &hole)?;
            if plan.simplify_in_view_units > 0.0 {
                cut = ops.simplify(&cut, plan.simplify_in_view_units)?;
            }
            Some(cut)
        }
        None => None,
    };

    Ok(Some(SmoothCutout { hole, base }))
}
