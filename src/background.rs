//! Local background estimation.
//!
//! The checkerboard alternates light and dark grey tiles. A median filter whose
//! window is wider than one full tile period collapses that pattern into a
//! smooth grey field: the value the pixel would have if it were pure background.

use image::{GrayImage, Luma, RgbaImage};
use imageproc::filter::median_filter;

use crate::color::{grey_mean, to_u8};
use crate::config::CheckerboardConfig;

/// Grey raster holding the unweighted mean of R, G and B for every pixel.
#[must_use]
pub fn grey_raster(image: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([to_u8(grey_mean(image.get_pixel(x, y)))])
    })
}

/// Estimate the checkerboard's local grey level at every pixel.
///
/// The window side is `cfg.median_size`, which should exceed the
/// checkerboard period. Borders are padded by edge replication, so the
/// result always has the same dimensions as `image`.
#[must_use]
pub fn estimate_background(image: &RgbaImage, cfg: &CheckerboardConfig) -> GrayImage {
    let grey = grey_raster(image);
    let radius = cfg.median_radius();
    log::debug!(
        "estimating background of {}x{} image with {size}x{size} median",
        image.width(),
        image.height(),
        size = cfg.median_size
    );
    median_filter(&grey, radius, radius)
}
