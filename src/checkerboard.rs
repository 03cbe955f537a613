//! Checkerboard recovery pipeline.

use image::{Rgba, RgbaImage};

use crate::alpha::infer_alpha;
use crate::background::estimate_background;
use crate::blending::uncomposite;
use crate::color::to_u8;
use crate::config::CheckerboardConfig;
use crate::error::{ensure_non_empty, Result};
use crate::smoothing::{smooth_alpha, suppress_periodic_noise};

/// Replace a baked-in grey checkerboard with real transparency.
///
/// Stages, in order:
/// 1. median-filtered grey background estimate,
/// 2. alpha from chroma/saturation,
/// 3. un-compositing of colour where alpha < `opaque_alpha`,
/// 4. ripple suppression on colour, then median + blur on alpha.
///
/// The returned image has the same dimensions as `image`. Its RGB comes from
/// the recovered foreground and its alpha from the smoothed alpha map; the
/// input alpha channel is ignored.
///
/// # Errors
///
/// Returns [`Error::EmptyImage`](crate::Error::EmptyImage) for a zero-sized
/// input and [`Error::InvalidConfig`](crate::Error::InvalidConfig) if `cfg`
/// fails validation.
pub fn remove_checkerboard(image: &RgbaImage, cfg: &CheckerboardConfig) -> Result<RgbaImage> {
    let (width, height) = image.dimensions();
    ensure_non_empty(width, height)?;
    cfg.validate()?;

    let background = estimate_background(image, cfg);
    let alpha = infer_alpha(image, cfg);
    let mut planes = uncomposite(image, &background, &alpha, cfg)?;
    suppress_periodic_noise(&mut planes, &alpha, cfg);
    let final_alpha = smooth_alpha(&alpha, cfg);

    let [red, green, blue] = &planes;
    Ok(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            to_u8(red.get_pixel(x, y)[0]),
            to_u8(green.get_pixel(x, y)[0]),
            to_u8(blue.get_pixel(x, y)[0]),
            final_alpha.get_pixel(x, y)[0],
        ])
    }))
}
