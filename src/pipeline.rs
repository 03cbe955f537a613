//! Pipeline selection.

use std::fmt;

use image::RgbaImage;

use crate::checkerboard::remove_checkerboard;
use crate::config::MattingConfig;
use crate::dark_background::remove_dark_background;
use crate::error::Result;

/// Which recovery algorithm a source image needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pipeline {
    /// Grey checkerboard baked into the pixels.
    Checkerboard,
    /// Near-uniform dark backdrop, no checkerboard.
    DarkBackground,
}

impl Pipeline {
    /// Run this pipeline on `image`.
    ///
    /// # Errors
    ///
    /// Propagates the selected pipeline's errors.
    pub fn apply(self, image: &RgbaImage, config: &MattingConfig) -> Result<RgbaImage> {
        match self {
            Self::Checkerboard => remove_checkerboard(image, &config.checkerboard),
            Self::DarkBackground => remove_dark_background(image, &config.dark_background),
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checkerboard => f.write_str("checkerboard"),
            Self::DarkBackground => f.write_str("dark-background"),
        }
    }
}
