//! Suppression of residual checkerboard ripple.
//!
//! Un-compositing against a smoothed background estimate is imperfect near
//! the tile period, so a faint brightness ripple survives in transparent and
//! semi-transparent regions. Each colour plane is median filtered with the same
//! period-exceeding window, lightly blurred, and blended back in where alpha is
//! low. Confident foreground keeps its sharp original values.

use image::{GrayImage, Luma};
use imageproc::filter::{gaussian_blur_f32, median_filter};

use crate::alpha::AlphaMap;
use crate::blending::{ColorPlanes, Plane};
use crate::color::to_u8;
use crate::config::CheckerboardConfig;

/// Weight given to the unsmoothed value: `clamp(alpha * gain, 0, 1)`.
#[must_use]
pub fn blend_weight(alpha: f32, cfg: &CheckerboardConfig) -> f32 {
    (alpha * cfg.blend_gain).clamp(0.0, 1.0)
}

/// Median filter then Gaussian blur, on a u8 raster.
fn median_then_blur(raster: &GrayImage, cfg: &CheckerboardConfig, sigma: f32) -> GrayImage {
    let radius = cfg.median_radius();
    let median = median_filter(raster, radius, radius);
    gaussian_blur_f32(&median, sigma)
}

fn quantize(plane: &Plane) -> GrayImage {
    GrayImage::from_fn(plane.width(), plane.height(), |x, y| {
        Luma([to_u8(plane.get_pixel(x, y)[0])])
    })
}

/// Smooth one plane and blend it with its original by alpha.
fn smooth_plane(plane: &mut Plane, alpha: &AlphaMap, cfg: &CheckerboardConfig) {
    let smoothed = median_then_blur(&quantize(plane), cfg, cfg.color_blur_sigma);
    for ((value, smooth), a) in plane
        .pixels_mut()
        .zip(smoothed.pixels())
        .zip(alpha.pixels())
    {
        let w = blend_weight(a[0], cfg);
        value[0] = w * value[0] + (1.0 - w) * f32::from(smooth[0]);
    }
}

/// Remove periodic ripple from all three colour planes in place.
///
/// `alpha` is the unsmoothed inferred alpha and must match the planes' size.
pub fn suppress_periodic_noise(planes: &mut ColorPlanes, alpha: &AlphaMap, cfg: &CheckerboardConfig) {
    log::debug!(
        "suppressing periodic noise (median {}, sigma {})",
        cfg.median_size,
        cfg.color_blur_sigma
    );

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        planes
            .par_iter_mut()
            .for_each(|plane| smooth_plane(plane, alpha, cfg));
    }

    #[cfg(not(feature = "rayon"))]
    {
        for plane in planes.iter_mut() {
            smooth_plane(plane, alpha, cfg);
        }
    }
}

/// Quantise alpha to 8 bits, then median filter and blur it.
///
/// The result is the final alpha channel of a recovered image.
#[must_use]
pub fn smooth_alpha(alpha: &AlphaMap, cfg: &CheckerboardConfig) -> GrayImage {
    let quantized = GrayImage::from_fn(alpha.width(), alpha.height(), |x, y| {
        Luma([to_u8(alpha.get_pixel(x, y)[0] * 255.0)])
    });
    median_then_blur(&quantized, cfg, cfg.alpha_blur_sigma)
}
