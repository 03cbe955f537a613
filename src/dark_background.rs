//! Dark-background recovery pipeline.
//!
//! For sources drawn on a near-uniform, low-saturation dark backdrop rather
//! than a checkerboard. Alpha follows brightness alone; colour is untouched.

use image::RgbaImage;

use crate::color::{to_u8, value};
use crate::config::DarkBackgroundConfig;
use crate::error::{ensure_non_empty, Result};

/// Candidate alpha for a pixel of brightness `value`.
///
/// Below `threshold` alpha rises linearly from 0 at black; at or above it the
/// pixel is opaque.
#[must_use]
pub fn brightness_alpha(value: f32, threshold: f32) -> u8 {
    let t = if value < threshold {
        value / threshold
    } else {
        1.0
    };
    to_u8(t * 255.0)
}

/// Make a dark backdrop transparent.
///
/// Each output alpha is `min(original alpha, brightness_alpha)`, so opacity
/// only ever goes down.
///
/// # Errors
///
/// Returns [`Error::EmptyImage`](crate::Error::EmptyImage) for a zero-sized
/// input and [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the
/// threshold is unusable.
pub fn remove_dark_background(image: &RgbaImage, cfg: &DarkBackgroundConfig) -> Result<RgbaImage> {
    ensure_non_empty(image.width(), image.height())?;
    cfg.validate()?;
    log::debug!(
        "removing dark background below value {} from {}x{} image",
        cfg.value_threshold,
        image.width(),
        image.height()
    );

    let mut out = image.clone();
    for px in out.pixels_mut() {
        let candidate = brightness_alpha(value(px), cfg.value_threshold);
        px[3] = px[3].min(candidate);
    }
    Ok(out)
}
