//! Tuning constants for both recovery pipelines.
//!
//! The defaults are calibrated against checkerboards with a ~15 px period and a
//! near-black backdrop. They are grouped here so every pipeline receives them
//! explicitly and tests can run with other parameterisations.

use std::cmp::Ordering;

use crate::error::{Error, Result};

/// Constants for checkerboard recovery.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckerboardConfig {
    /// Side of the square median kernel. Must be odd and exceed the
    /// checkerboard period so a full light/dark tile pair fits in the window.
    pub median_size: u32,
    /// Chroma at or below which a pixel is treated as pure background.
    pub chroma_zero: f32,
    /// Chroma at or above which a pixel is treated as pure foreground.
    pub chroma_full: f32,
    /// Saturation at or below which a pixel is treated as pure background.
    pub saturation_zero: f32,
    /// Saturation at or above which a pixel is treated as pure foreground.
    pub saturation_full: f32,
    /// Floor for the alpha denominator when un-compositing.
    pub min_alpha: f32,
    /// Pixels with inferred alpha at or above this keep their observed colour.
    pub opaque_alpha: f32,
    /// Multiplier turning alpha into the sharp/smoothed colour blend weight.
    pub blend_gain: f32,
    /// Gaussian sigma applied to median-filtered colour planes.
    pub color_blur_sigma: f32,
    /// Gaussian sigma applied to the median-filtered alpha map.
    pub alpha_blur_sigma: f32,
}

impl Default for CheckerboardConfig {
    fn default() -> Self {
        Self {
            median_size: 17,
            chroma_zero: 2.0,
            chroma_full: 30.0,
            saturation_zero: 0.02,
            saturation_full: 0.15,
            min_alpha: 0.01,
            opaque_alpha: 0.95,
            blend_gain: 2.0,
            color_blur_sigma: 1.0,
            alpha_blur_sigma: 3.0,
        }
    }
}

impl CheckerboardConfig {
    /// Radius handed to `imageproc`'s median filter.
    #[must_use]
    pub fn median_radius(&self) -> u32 {
        self.median_size / 2
    }

    /// Check that every constant is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.median_size < 3 || self.median_size % 2 == 0 {
            return Err(invalid(format!(
                "median_size must be an odd number >= 3, got {}",
                self.median_size
            )));
        }
        if !exceeds(self.chroma_full, self.chroma_zero) {
            return Err(invalid(format!(
                "chroma_full ({}) must exceed chroma_zero ({})",
                self.chroma_full, self.chroma_zero
            )));
        }
        if !exceeds(self.saturation_full, self.saturation_zero) {
            return Err(invalid(format!(
                "saturation_full ({}) must exceed saturation_zero ({})",
                self.saturation_full, self.saturation_zero
            )));
        }
        if !exceeds(self.min_alpha, 0.0) || self.min_alpha > 1.0 {
            return Err(invalid(format!(
                "min_alpha must be in (0, 1], got {}",
                self.min_alpha
            )));
        }
        if !(0.0..=1.0).contains(&self.opaque_alpha) {
            return Err(invalid(format!(
                "opaque_alpha must be in [0, 1], got {}",
                self.opaque_alpha
            )));
        }
        if !exceeds(self.blend_gain, 0.0) {
            return Err(invalid(format!(
                "blend_gain must be positive, got {}",
                self.blend_gain
            )));
        }
        if !exceeds(self.color_blur_sigma, 0.0) || !exceeds(self.alpha_blur_sigma, 0.0) {
            return Err(invalid(format!(
                "blur sigmas must be positive, got color={} alpha={}",
                self.color_blur_sigma, self.alpha_blur_sigma
            )));
        }
        Ok(())
    }
}

/// Constants for dark-background recovery.
#[derive(Debug, Clone, PartialEq)]
pub struct DarkBackgroundConfig {
    /// Brightness (`max(R,G,B) / 255`) below which alpha ramps down to zero.
    pub value_threshold: f32,
}

impl Default for DarkBackgroundConfig {
    fn default() -> Self {
        Self {
            value_threshold: 0.12,
        }
    }
}

impl DarkBackgroundConfig {
    /// Check that the threshold is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the threshold is outside `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !exceeds(self.value_threshold, 0.0) || self.value_threshold > 1.0 {
            return Err(invalid(format!(
                "value_threshold must be in (0, 1], got {}",
                self.value_threshold
            )));
        }
        Ok(())
    }
}

/// All tuning constants used by the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MattingConfig {
    /// Checkerboard recovery constants.
    pub checkerboard: CheckerboardConfig,
    /// Dark-background recovery constants.
    pub dark_background: DarkBackgroundConfig,
}

impl MattingConfig {
    /// Validate both pipeline configurations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if any constant is unusable.
    pub fn validate(&self) -> Result<()> {
        self.checkerboard.validate()?;
        self.dark_background.validate()
    }
}

/// `a > b`, with NaN on either side counting as false.
fn exceeds(a: f32, b: f32) -> bool {
    a.partial_cmp(&b) == Some(Ordering::Greater)
}

fn invalid(message: String) -> Error {
    Error::InvalidConfig(message)
}
