//! Alpha inference from colour purity.
//!
//! The checkerboard is perfectly grey, so any colourfulness marks foreground.
//! Two clamped ramps are combined with `max`:
//! 1. **Chroma** catches strongly coloured pixels.
//! 2. **Saturation** catches faint glow whose absolute chroma is small but
//!    whose hue is still clearly off-grey.

use image::{ImageBuffer, Luma, Rgba, RgbaImage};

use crate::color::{chroma, linear_ramp, saturation};
use crate::config::CheckerboardConfig;

/// Single-channel alpha raster with values in `[0, 1]`.
pub type AlphaMap = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Alpha for one pixel: the larger of the chroma and saturation ramps.
#[must_use]
pub fn pixel_alpha(px: &Rgba<u8>, cfg: &CheckerboardConfig) -> f32 {
    let from_chroma = linear_ramp(chroma(px), cfg.chroma_zero, cfg.chroma_full);
    let from_saturation = linear_ramp(saturation(px), cfg.saturation_zero, cfg.saturation_full);
    from_chroma.max(from_saturation)
}

/// Infer a continuous alpha map for the whole image.
#[must_use]
pub fn infer_alpha(image: &RgbaImage, cfg: &CheckerboardConfig) -> AlphaMap {
    AlphaMap::from_fn(image.width(), image.height(), |x, y| {
        Luma([pixel_alpha(image.get_pixel(x, y), cfg)])
    })
}
