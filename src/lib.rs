//! # badgecut
//!
//! Composes two SVG icons into one Android vector drawable: the base icon
//! fills the viewport, and a smaller overlay sits in its top-right corner.
//! A gap is carved out of the base around the overlay so the two stay
//! legible when drawn in one colour.
//!
//! Nothing is rasterized. Path data is read, measured exactly (curve extrema
//! included), and rewritten under affine maps, so the output stays a pure
//! vector document.
//!
//! ## Architecture
//!
//! ```text
//! SVG text (base, overlay)
//!       ↓
//!   [svg]       — quick-xml reader, one PathRecord per <path>
//!       ↓
//!   [path]      — tokenizer → interpreter → measure / transform / flatten
//!       ↓
//!   [layout]    — LayoutPlan: centring, corner anchoring, cut-out scale
//!       ↓
//!   [smooth]    — optional rounded cut-out via polygon booleans
//!       ↓
//!   [drawable]  — Android <vector> XML
//! ```

pub mod drawable;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod number;
pub mod options;
pub mod path;
pub mod smooth;
pub mod svg;

#[cfg(feature = "wasm")]
pub mod wasm;

use log::warn;

use drawable::Drawable;
use error::{ComposeError, IconRole};
use layout::LayoutPlan;
use smooth::Smoothing;
use svg::ParsedIcon;

pub use error::{GeometryError, IconError, PathError};
pub use options::ComposeOptions;

/// Something the caller should know about a composition that still
/// succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The rounded cut-out was requested but no polygon capability is
    /// present. The even-odd cut-out was used instead.
    SmoothingUnavailable,
    /// The polygon capability failed. The even-odd cut-out was used instead.
    SmoothingFailed(String),
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::SmoothingUnavailable => write!(
                f,
                "Smooth gap requested but polygon operations are not available; falling back to sharp gap."
            ),
            Notice::SmoothingFailed(reason) => {
                write!(f, "Smooth gap failed ({}); falling back to sharp gap.", reason)
            }
        }
    }
}

/// The output of a successful composition.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub drawable: Drawable,
    pub plan: LayoutPlan,
    pub notices: Vec<Notice>,
}

impl Composition {
    pub fn to_xml(&self) -> String {
        self.drawable.to_xml()
    }
}

/// Compose two SVG documents using the polygon capability compiled into
/// this build.
///
/// This is the primary entry point.
pub fn compose(base_svg: &str, overlay_svg: &str, options: &ComposeOptions) -> Result<Composition, ComposeError> {
    compose_with(base_svg, overlay_svg, options, &Smoothing::detect())
}

/// Compose two SVG documents with an explicit polygon capability.
pub fn compose_with(
    base_svg: &str,
    overlay_svg: &str,
    options: &ComposeOptions,
    smoothing: &Smoothing,
) -> Result<Composition, ComposeError> {
    options.validate()?;
    let base = svg::parse_icon(base_svg).map_err(ComposeError::icon(IconRole::Base))?;
    let overlay = svg::parse_icon(overlay_svg).map_err(ComposeError::icon(IconRole::Overlay))?;
    compose_icons(&base, &overlay, options, smoothing)
}

/// Compose two already parsed icons.
pub fn compose_icons(
    base: &ParsedIcon,
    overlay: &ParsedIcon,
    options: &ComposeOptions,
    smoothing: &Smoothing,
) -> Result<Composition, ComposeError> {
    options.validate()?;
    let plan = layout::plan(base, overlay, options, smoothing.is_available());
    let mut notices = Vec::new();

    if options.smooth && plan.gap_in_view_units > 0.0 && !smoothing.is_available() {
        notices.push(Notice::SmoothingUnavailable);
    }

    let cutout = match smoothing.ops() {
        Some(ops) if plan.use_smooth_cutout => {
            match smooth::smooth_cutout(ops, base, overlay, &plan, options.sample_points) {
                Ok(cutout) => cutout,
                Err(e) => {
                    notices.push(Notice::SmoothingFailed(e.to_string()));
                    None
                }
            }
        }
        _ => None,
    };

    for notice in &notices {
        warn!("{}", notice);
    }

    let drawable = drawable::assemble(base, overlay, &plan, cutout.as_ref(), &options.fill_color)?;
    Ok(Composition { drawable, plan, notices })
}

/// Compose two SVG documents, reading options from JSON, and return the
/// drawable XML.
pub fn compose_json(base_svg: &str, overlay_svg: &str, options_json: &str) -> Result<String, ComposeError> {
    let options = ComposeOptions::from_json(options_json)?;
    Ok(compose(base_svg, overlay_svg, &options)?.to_xml())
}
