//! Per-pixel colour statistics shared by both pipelines.

use image::Rgba;

/// Unweighted mean of the R, G and B samples.
#[must_use]
pub fn grey_mean(px: &Rgba<u8>) -> f32 {
    (f32::from(px[0]) + f32::from(px[1]) + f32::from(px[2])) / 3.0
}

fn max_min(px: &Rgba<u8>) -> (u8, u8) {
    let max = px[0].max(px[1]).max(px[2]);
    let min = px[0].min(px[1]).min(px[2]);
    (max, min)
}

/// `max(R,G,B) - min(R,G,B)`; zero for perfect greys.
#[must_use]
pub fn chroma(px: &Rgba<u8>) -> f32 {
    let (max, min) = max_min(px);
    f32::from(max - min)
}

/// Chroma normalised by the brightest channel, or 0 for black.
#[must_use]
pub fn saturation(px: &Rgba<u8>) -> f32 {
    let (max, min) = max_min(px);
    if max == 0 {
        0.0
    } else {
        f32::from(max - min) / f32::from(max)
    }
}

/// Brightness as `max(R,G,B) / 255`, in `[0, 1]`.
#[must_use]
pub fn value(px: &Rgba<u8>) -> f32 {
    let (max, _) = max_min(px);
    f32::from(max) / 255.0
}

/// Clamped linear ramp: 0 at or below `zero`, 1 at or above `full`.
#[must_use]
pub fn linear_ramp(x: f32, zero: f32, full: f32) -> f32 {
    ((x - zero) / (full - zero)).clamp(0.0, 1.0)
}

/// Clamp to `[0, 255]` and truncate toward zero.
#[must_use]
#[inline]
pub fn to_u8(x: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        x.clamp(0.0, 255.0) as u8
    }
}
