//! Turn a baked-in checkerboard "transparency" pattern into real alpha.
//!
//! Some image generators render the grey transparency checkerboard as actual
//! opaque pixels. This crate recovers genuine transparency from such images
//! while keeping the coloured foreground:
//!
//! 1. **Background estimation**: a median filter wider than the tile period
//!    flattens the checkerboard into a smooth local grey.
//! 2. **Alpha inference**: chroma and saturation ramps, combined with `max`.
//! 3. **Un-compositing**: `fg = (observed - (1 - alpha) * bg) / alpha`.
//! 4. **Ripple suppression**: median + Gaussian smoothing blended by alpha,
//!    and the same treatment for the alpha channel itself.
//!
//! A second, simpler pipeline handles sources drawn on a dark backdrop.
//!
//! # Quick Start
//!
//! ```no_run
//! use checkerboard_matte::{MattingConfig, Pipeline};
//!
//! let img = image::open("generated.png").unwrap().to_rgba8();
//! let matte = Pipeline::Checkerboard
//!     .apply(&img, &MattingConfig::default())
//!     .unwrap();
//! matte.save("transparent.png").unwrap();
//! ```
//!
//! # Batch processing
//!
//! ```no_run
//! use std::path::Path;
//! use checkerboard_matte::{default_jobs, MattingEngine};
//!
//! let engine = MattingEngine::default();
//! let results = engine
//!     .process_batch(Path::new("images"), Path::new("out"), &default_jobs())
//!     .unwrap();
//! for r in &results {
//!     println!("{}: {}", r.source.display(), r.message);
//! }
//! ```

#![deny(missing_docs)]

pub mod alpha;
pub mod background;
pub mod blending;
pub mod checkerboard;
pub mod color;
pub mod config;
pub mod dark_background;
mod engine;
pub mod error;
mod pipeline;
pub mod smoothing;

pub use alpha::AlphaMap;
pub use blending::{ColorPlanes, Plane};
pub use checkerboard::remove_checkerboard;
pub use config::{CheckerboardConfig, DarkBackgroundConfig, MattingConfig};
pub use dark_background::remove_dark_background;
pub use engine::{default_jobs, is_supported_image, save_png, Job, MattingEngine, ProcessResult};
pub use error::{Error, Result};
pub use pipeline::Pipeline;
