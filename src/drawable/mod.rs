//! # Drawable Emitter
//!
//! Builds the Android `<vector>` document. The first shape is always the base
//! outline (with the cut-out folded in), followed by one shape per overlay
//! path. Every coordinate has already been mapped into the base viewport by
//! the time it gets here.

use quick_xml::escape::escape;

use crate::error::{ComposeError, IconError, IconRole};
use crate::layout::LayoutPlan;
use crate::number::fmt_number;
use crate::path::{transform_path_data, Affine};
use crate::smooth::SmoothCutout;
use crate::svg::ParsedIcon;

const ANDROID_NS: &str = "http://schemas.android.com/apk/res/android";
const INDENT: &str = "    ";

/// `android:fillType` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillType {
    EvenOdd,
}

impl FillType {
    fn as_str(self) -> &'static str {
        match self {
            FillType::EvenOdd => "evenOdd",
        }
    }
}

/// One `<path>` of the output.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableShape {
    pub fill_color: String,
    /// `None` means the Android default, non-zero.
    pub fill_type: Option<FillType>,
    pub path_data: String,
}

/// A complete vector drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub width_dp: f64,
    pub height_dp: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub shapes: Vec<DrawableShape>,
}

impl Drawable {
    /// Serializes the drawable. The result ends with a newline.
    pub fn to_xml(&self) -> String {
        let mut lines = vec![
            format!("<vector xmlns:android=\"{}\"", ANDROID_NS),
            format!("{}android:width=\"{}dp\"", INDENT, fmt_number(self.width_dp)),
            format!("{}android:height=\"{}dp\"", INDENT, fmt_number(self.height_dp)),
            format!("{}android:viewportWidth=\"{}\"", INDENT, fmt_number(self.viewport_width)),
            format!("{}android:viewportHeight=\"{}\">", INDENT, fmt_number(self.viewport_height)),
        ];
        for shape in &self.shapes {
            let fill_type = shape
                .fill_type
                .map(|t| format!(" android:fillType=\"{}\"", t.as_str()))
                .unwrap_or_default();
            lines.push(format!(
                "{}<path android:fillColor=\"{}\"{} android:pathData=\"{}\" />",
                INDENT,
                escape(shape.fill_color.as_str()),
                fill_type,
                escape(shape.path_data.as_str())
            ));
        }
        lines.push("</vector>".to_string());

        let mut xml = lines.join("\n");
        xml.push('\n');
        xml
    }
}

fn transform_all(icon: &ParsedIcon, role: IconRole, affine: Affine) -> Result<Vec<String>, ComposeError> {
    icon.paths
        .iter()
        .enumerate()
        .map(|(index, path)| {
            transform_path_data(&path.data, affine)
                .map_err(|source| ComposeError::icon(role)(IconError::Path { index, source }))
        })
        .collect()
}

/// Assembles the drawable from a layout plan.
///
/// `smooth` is the rounded cut-out when it was computed. A smoothed hole
/// replaces the even-odd hole; a smoothed base replaces the whole base
/// outline, which then needs no fill type.
pub fn assemble(
    base: &ParsedIcon,
    overlay: &ParsedIcon,
    plan: &LayoutPlan,
    smooth: Option<&SmoothCutout>,
    fill_color: &str,
) -> Result<Drawable, ComposeError> {
    let overlay_paths = transform_all(overlay, IconRole::Overlay, plan.overlay_transform())?;

    let mut hole_paths = Vec::new();
    if plan.gap_in_view_units > 0.0 {
        if let Some(cutout) = smooth {
            hole_paths = cutout.hole.to_path_data();
        }
        if hole_paths.is_empty() {
            hole_paths = transform_all(overlay, IconRole::Overlay, plan.cutout_transform())?;
        }
    }

    let smoothed_base = smooth
        .and_then(|cutout| cutout.base.as_ref())
        .map(|shape| shape.to_path_data())
        .filter(|paths| !paths.is_empty());

    let base_shape = match smoothed_base {
        Some(paths) => DrawableShape {
            fill_color: fill_color.to_string(),
            fill_type: None,
            path_data: paths.join(" "),
        },
        None => {
            let mut parts = transform_all(base, IconRole::Base, plan.base_transform())?;
            parts.retain(|p| !p.is_empty());
            let fill_type = if hole_paths.is_empty() { None } else { Some(FillType::EvenOdd) };
            parts.extend(hole_paths);
            DrawableShape {
                fill_color: fill_color.to_string(),
                fill_type,
                path_data: parts.join(" "),
            }
        }
    };

    let mut shapes = vec![base_shape];
    shapes.extend(overlay_paths.into_iter().map(|path_data| DrawableShape {
        fill_color: fill_color.to_string(),
        fill_type: None,
        path_data,
    }));

    Ok(Drawable {
        width_dp: base.physical_width(),
        height_dp: base.physical_height(),
        viewport_width: base.view_box.width,
        viewport_height: base.view_box.height,
        shapes,
    })
}
