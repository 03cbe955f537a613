//! Alpha blending math for foreground recovery.
//!
//! The generator composited foreground over the checkerboard:
//! `observed = alpha * foreground + (1 - alpha) * background`
//!
//! This module solves that equation for `foreground` per colour channel.

use image::{GrayImage, ImageBuffer, Luma, RgbaImage};

use crate::alpha::AlphaMap;
use crate::config::CheckerboardConfig;
use crate::error::{ensure_same_dimensions, Result};

/// One colour channel held as floats in `[0, 255]`.
pub type Plane = ImageBuffer<Luma<f32>, Vec<f32>>;

/// R, G and B planes, in that order.
pub type ColorPlanes = [Plane; 3];

/// Recover one foreground sample from its composited value.
///
/// Pixels at or above `cfg.opaque_alpha` are returned unchanged: dividing a
/// solid pixel by its own alpha only amplifies noise. Below that the alpha
/// denominator is floored at `cfg.min_alpha` and the result clamped to
/// `[0, 255]`.
#[must_use]
pub fn uncomposite_channel(observed: f32, background: f32, alpha: f32, cfg: &CheckerboardConfig) -> f32 {
    if alpha >= cfg.opaque_alpha {
        return observed;
    }
    let foreground = (observed - (1.0 - alpha) * background) / alpha.max(cfg.min_alpha);
    foreground.clamp(0.0, 255.0)
}

/// Remove the estimated background contribution from every colour channel.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`](crate::Error::DimensionMismatch) if
/// `background` or `alpha` is not the same size as `image`.
pub fn uncomposite(
    image: &RgbaImage,
    background: &GrayImage,
    alpha: &AlphaMap,
    cfg: &CheckerboardConfig,
) -> Result<ColorPlanes> {
    ensure_same_dimensions(image.dimensions(), background.dimensions())?;
    ensure_same_dimensions(image.dimensions(), alpha.dimensions())?;

    let (width, height) = image.dimensions();
    let planes = [0usize, 1, 2].map(|ch| {
        Plane::from_fn(width, height, |x, y| {
            let observed = f32::from(image.get_pixel(x, y)[ch]);
            let bg = f32::from(background.get_pixel(x, y)[0]);
            let a = alpha.get_pixel(x, y)[0];
            Luma([uncomposite_channel(observed, bg, a, cfg)])
        })
    });
    Ok(planes)
}
