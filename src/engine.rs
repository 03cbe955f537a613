//! Batch engine: resolve jobs against directories, decode, recover, encode.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageFormat, ImageReader, RgbaImage};

use crate::config::MattingConfig;
use crate::error::{Error, Result};
use crate::pipeline::Pipeline;

/// One source → destination mapping and the pipeline it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// File name of the source, relative to the input directory.
    pub source: String,
    /// File name of the PNG output, relative to the output directory.
    pub destination: String,
    /// Recovery algorithm for this source.
    pub pipeline: Pipeline,
}

impl Job {
    /// A job routed to checkerboard recovery.
    pub fn checkerboard(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            pipeline: Pipeline::Checkerboard,
        }
    }

    /// A job routed to dark-background recovery.
    pub fn dark_background(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            pipeline: Pipeline::DarkBackground,
        }
    }
}

/// The job table of the reference deployment, in processing order.
#[must_use]
pub fn default_jobs() -> Vec<Job> {
    vec![
        Job::checkerboard("what-we-do-2.png", "ai-readiness-thumb.png"),
        Job::checkerboard("what-we-do-3.png", "data-platforms-thumb.png"),
        Job::checkerboard("what-we-do-4.png", "ai-products-thumb.png"),
        Job::checkerboard("what-we-do-5.png", "governance-thumb.png"),
        Job::checkerboard("what-we-do-6.png", "ai-readiness-detail.png"),
        Job::checkerboard("what-we-do-7.png", "data-platforms-detail.png"),
        Job::checkerboard("what-we-do-8.png", "ai-products-detail.png"),
        Job::checkerboard("what-we-do-9.png", "governance-detail.png"),
        Job::dark_background("what-we-do-10.jpeg", "positioning-accent.png"),
    ]
}

/// Result of processing a single job.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// Path of the source file.
    pub source: PathBuf,
    /// Path the output was (or would have been) written to.
    pub output: PathBuf,
    /// Pipeline selected for this source.
    pub pipeline: Pipeline,
    /// Whether the source was missing and the job skipped.
    pub skipped: bool,
    /// Dimensions of the written image, if any.
    pub dimensions: Option<(u32, u32)>,
    /// Human-readable status message.
    pub message: String,
}

/// The matting engine holding validated tuning constants.
///
/// Create once and reuse for every image in a batch.
#[derive(Debug, Clone, Default)]
pub struct MattingEngine {
    config: MattingConfig,
}

impl MattingEngine {
    /// Create an engine with the given constants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if any constant is unusable.
    pub fn new(config: MattingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The constants this engine runs with.
    #[must_use]
    pub fn config(&self) -> &MattingConfig {
        &self.config
    }

    /// Convert a decoded image to RGBA and run `pipeline` on it.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors (e.g. an empty image).
    pub fn process_image(&self, image: &DynamicImage, pipeline: Pipeline) -> Result<RgbaImage> {
        pipeline.apply(&image.to_rgba8(), &self.config)
    }

    /// Process a single file: load, recover, save as PNG.
    ///
    /// A missing `input` is not an error: the result comes back with
    /// `skipped` set. The output is written only after the whole image has
    /// been computed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if `input` exists but cannot be decoded, and
    /// [`Error::Io`] or [`Error::Image`] if the output cannot be written.
    pub fn process_file(
        &self,
        input: &Path,
        output: &Path,
        pipeline: Pipeline,
    ) -> Result<ProcessResult> {
        let mut result = ProcessResult {
            source: input.to_path_buf(),
            output: output.to_path_buf(),
            pipeline,
            skipped: false,
            dimensions: None,
            message: String::new(),
        };

        if !input.exists() {
            log::warn!("skipping {}: not found", input.display());
            result.skipped = true;
            result.message = "Source not found".to_string();
            return Ok(result);
        }

        if !is_supported_image(input) {
            log::warn!(
                "{} has an unrecognised extension; decoding by content",
                input.display()
            );
        }

        log::info!(
            "processing {} -> {} ({pipeline})",
            input.display(),
            output.display()
        );
        let decoded = load_image(input)?;
        let recovered = self.process_image(&decoded, pipeline)?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        save_png(&recovered, output)?;

        let (w, h) = recovered.dimensions();
        result.dimensions = Some((w, h));
        result.message = format!("Wrote {w}x{h} {pipeline} result");
        Ok(result)
    }

    /// Process one job against an input and an output directory.
    ///
    /// # Errors
    ///
    /// See [`MattingEngine::process_file`].
    pub fn process_job(&self, input_dir: &Path, output_dir: &Path, job: &Job) -> Result<ProcessResult> {
        self.process_file(
            &input_dir.join(&job.source),
            &output_dir.join(&job.destination),
            job.pipeline,
        )
    }

    /// Process every job in order, one image at a time.
    ///
    /// The output directory is created if absent. Missing sources are skipped;
    /// the first decode or write failure aborts the batch.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error, see [`MattingEngine::process_file`].
    pub fn process_batch(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        jobs: &[Job],
    ) -> Result<Vec<ProcessResult>> {
        if !output_dir.exists() {
            std::fs::create_dir_all(output_dir)?;
        }

        let mut results = Vec::with_capacity(jobs.len());
        for job in jobs {
            results.push(self.process_job(input_dir, output_dir, job)?);
        }
        Ok(results)
    }
}

/// Decode an image, sniffing its format from the content.
fn load_image(path: &Path) -> Result<DynamicImage> {
    let decode_err = |source: ImageError| Error::Decode {
        path: path.to_path_buf(),
        source,
    };
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_err(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)
}

/// Check if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp" | "bmp"
        ),
        None => false,
    }
}

/// Save an RGBA image as PNG regardless of the path's extension.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
