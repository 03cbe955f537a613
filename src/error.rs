//! Error types for the checkerboard-matte crate.

use std::path::PathBuf;

/// Errors that can occur while recovering alpha from an image.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A pipeline was handed a raster with no pixels.
    #[error("image is empty ({width}x{height})")]
    EmptyImage {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// Two rasters that must line up pixel for pixel have different sizes.
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions `(width, height)`.
        expected: (u32, u32),
        /// Actual dimensions `(width, height)`.
        actual: (u32, u32),
    },

    /// A tuning constant is outside its usable range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A source file exists but could not be decoded as an image.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        /// Path of the source file.
        path: PathBuf,
        /// Underlying decoder error.
        source: image::ImageError,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error occurred while encoding an output image.
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Reject zero-sized rasters before any filter touches them.
pub(crate) fn ensure_non_empty(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }
    Ok(())
}

/// Check that a derived buffer has the same size as its source raster.
pub(crate) fn ensure_same_dimensions(expected: (u32, u32), actual: (u32, u32)) -> Result<()> {
    if expected != actual {
        return Err(Error::DimensionMismatch { expected, actual });
    }
    Ok(())
}
