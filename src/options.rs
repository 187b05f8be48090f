//! # Compose Options
//!
//! The user-facing knobs of a composition. Every field has a default, so an
//! empty JSON object `{}` is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::ComposeError;

/// Smallest number of samples per segment the rounded cut-out accepts.
pub const MIN_SAMPLE_POINTS: usize = 6;
/// Largest number of samples per segment the rounded cut-out accepts.
pub const MAX_SAMPLE_POINTS: usize = 1000;

/// Options for composing a base icon with a corner overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComposeOptions {
    /// Overlay size relative to its own content box. Must be > 0.
    pub scale: f64,
    /// Gap between overlay and base, in dp. 0 disables the cut-out.
    pub gap: f64,
    /// Request the rounded cut-out. Needs a polygon capability.
    pub smooth: bool,
    /// Samples per segment when flattening outlines for the rounded cut-out.
    pub sample_points: usize,
    /// Simplification tolerance for the rounded cut-out, in dp.
    pub smooth_simplify: f64,
    /// `android:fillColor` written on every shape.
    pub fill_color: String,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            scale: 0.5,
            gap: 2.0,
            smooth: false,
            sample_points: 30,
            smooth_simplify: 0.25,
            fill_color: "@android:color/white".to_string(),
        }
    }
}

impl ComposeOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ComposeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject out-of-range values before any geometry work is done.
    pub fn validate(&self) -> Result<(), ComposeError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ComposeError::InvalidParameter(format!(
                "scale must be > 0, got {}",
                self.scale
            )));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(ComposeError::InvalidParameter(format!(
                "gap must be >= 0, got {}",
                self.gap
            )));
        }
        if !(MIN_SAMPLE_POINTS..=MAX_SAMPLE_POINTS).contains(&self.sample_points) {
            return Err(ComposeError::InvalidParameter(format!(
                "sample points must be between {} and {}, got {}",
                MIN_SAMPLE_POINTS, MAX_SAMPLE_POINTS, self.sample_points
            )));
        }
        if !(self.smooth_simplify.is_finite() && self.smooth_simplify >= 0.0) {
            return Err(ComposeError::InvalidParameter(format!(
                "smooth simplify must be >= 0, got {}",
                self.smooth_simplify
            )));
        }
        if self.fill_color.trim().is_empty() {
            return Err(ComposeError::InvalidParameter(
                "fill color must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
