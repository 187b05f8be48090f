//! # Composition Layout
//!
//! Decides where everything goes, without touching any path data:
//!
//! - the base content is recentred on its own viewport;
//! - the overlay is scaled and pinned to the base viewport's top-right corner;
//! - the cut-out is a slightly larger copy of the overlay, concentric with the
//!   placed overlay, enlarged so its edge sits `gap` away from the overlay's.
//!
//! All numbers in a [`LayoutPlan`] are in the base icon's viewBox units.

use log::debug;

use crate::geometry::{BBox, Point};
use crate::number::fmt_number;
use crate::options::ComposeOptions;
use crate::path::Affine;
use crate::svg::ParsedIcon;

/// The complete placement of base, overlay and cut-out.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    /// Applied to base paths at scale 1. Includes the viewport offset.
    pub base_translate: Point,
    /// Moves the base's viewBox origin to (0, 0).
    pub base_offset: Point,
    /// Moves the overlay's viewBox origin to (0, 0) before scaling.
    pub overlay_offset: Point,
    pub overlay_scale: f64,
    /// Applied after the overlay has been normalized and scaled.
    pub overlay_translate: Point,
    pub cutout_scale: f64,
    pub cutout_translate: Point,
    pub gap_in_view_units: f64,
    pub simplify_in_view_units: f64,
    /// The rounded cut-out will be attempted.
    pub use_smooth_cutout: bool,
    /// Overlay content box, viewport-local, unscaled.
    pub overlay_content: BBox,
    /// Base content box, viewport-local, before centering.
    pub base_content: BBox,
}

impl LayoutPlan {
    pub fn base_transform(&self) -> Affine {
        Affine::translate(self.base_translate.x, self.base_translate.y)
    }

    /// Maps raw overlay path coordinates to their placed position.
    pub fn overlay_transform(&self) -> Affine {
        placed(self.overlay_offset, self.overlay_scale, self.overlay_translate)
    }

    /// Maps raw overlay path coordinates to the enlarged cut-out silhouette.
    pub fn cutout_transform(&self) -> Affine {
        placed(self.overlay_offset, self.cutout_scale, self.cutout_translate)
    }

    /// The overlay content box after placement.
    pub fn placed_overlay_box(&self) -> BBox {
        self.overlay_content
            .scale(self.overlay_scale)
            .translate(self.overlay_translate.x, self.overlay_translate.y)
    }

    /// The base content box after centering.
    pub fn placed_base_box(&self) -> BBox {
        self.base_content.translate(
            self.base_translate.x - self.base_offset.x,
            self.base_translate.y - self.base_offset.y,
        )
    }
}

fn placed(offset: Point, scale: f64, translate: Point) -> Affine {
    Affine::new(scale, offset.x * scale + translate.x, offset.y * scale + translate.y)
}

/// Computes the layout for `overlay` placed on `base`.
///
/// `options` must already be validated. `smoothing_available` says whether a
/// polygon capability is present; it only affects `use_smooth_cutout`.
pub fn plan(
    base: &ParsedIcon,
    overlay: &ParsedIcon,
    options: &ComposeOptions,
    smoothing_available: bool,
) -> LayoutPlan {
    let vb = base.view_box;
    let scale = options.scale;

    // dp → viewBox units. Without a declared width the two coincide.
    let width_dp = base.physical_width();
    let units_per_dp = if width_dp > 0.0 { vb.width / width_dp } else { 1.0 };
    let gap = options.gap * units_per_dp;
    let simplify = options.smooth_simplify * units_per_dp;

    let (bx, by) = base.offset();
    let base_content = base.content_box();
    let base_center = base_content.center();
    let base_translate = Point::new(
        bx + vb.width / 2.0 - base_center.x,
        by + vb.height / 2.0 - base_center.y,
    );

    let (ox, oy) = overlay.offset();
    let overlay_content = overlay.content_box();
    let scaled = overlay_content.scale(scale);
    let overlay_translate = Point::new(vb.width - scaled.max_x, -scaled.min_y);

    let max_dim = overlay_content.max_dimension();
    let cutout_scale = if gap <= 0.0 || max_dim <= 0.0 {
        scale
    } else {
        scale * (1.0 + 2.0 * gap / max_dim)
    };
    let center = overlay_content.center();
    let placed_center = Point::new(
        center.x * scale + overlay_translate.x,
        center.y * scale + overlay_translate.y,
    );
    let cutout_translate = Point::new(
        placed_center.x - center.x * cutout_scale,
        placed_center.y - center.y * cutout_scale,
    );

    let use_smooth_cutout = options.smooth && gap > 0.0 && smoothing_available;

    let plan = LayoutPlan {
        base_translate,
        base_offset: Point::new(bx, by),
        overlay_offset: Point::new(ox, oy),
        overlay_scale: scale,
        overlay_translate,
        cutout_scale,
        cutout_translate,
        gap_in_view_units: gap,
        simplify_in_view_units: simplify,
        use_smooth_cutout,
        overlay_content,
        base_content,
    };

    debug!(
        "Base translate=({}, {}), overlay translate=({}, {})",
        fmt_number(base_translate.x),
        fmt_number(base_translate.y),
        fmt_number(overlay_translate.x),
        fmt_number(overlay_translate.y)
    );
    debug!(
        "Overlay scale={}, cutout scale={}",
        fmt_number(scale),
        fmt_number(cutout_scale)
    );
    debug!(
        "Overlay bbox norm=({}, {}, {}, {})",
        fmt_number(overlay_content.min_x),
        fmt_number(overlay_content.min_y),
        fmt_number(overlay_content.max_x),
        fmt_number(overlay_content.max_y)
    );
    debug!(
        "Gap={} dp -> {} viewBox units",
        fmt_number(options.gap),
        fmt_number(gap)
    );
    debug!(
        "Smooth cut-out={} (sample points={}, simplify={})",
        if use_smooth_cutout { "on" } else { "off" },
        options.sample_points,
        fmt_number(simplify)
    );
    debug!(
        "Clearance between base content and overlay={}",
        fmt_number(plan.placed_base_box().distance(&plan.placed_overlay_box()))
    );

    plan
}
