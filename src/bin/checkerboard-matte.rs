use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use checkerboard_matte::{default_jobs, MattingEngine, ProcessResult};

#[derive(Parser)]
#[command(
    name = "checkerboard-matte",
    about = "Convert baked-in checkerboard backgrounds into real alpha transparency",
    version,
    after_help = "Runs the built-in job table: every source found in INPUT_DIR is written\n\
                  to OUTPUT_DIR as a PNG with alpha. Missing sources are skipped."
)]
struct Cli {
    /// Directory holding the source images
    #[arg(default_value = "images")]
    input: PathBuf,

    /// Directory to write PNG results into (created if absent)
    #[arg(short, long, default_value = "public/images/what-we-do")]
    output: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if !cli.input.is_dir() {
        log::warn!(
            "input directory {} does not exist; every job will be skipped",
            cli.input.display()
        );
    }

    let engine = MattingEngine::default();
    log::debug!("tuning constants: {:?}", engine.config());
    let jobs = default_jobs();

    let results = match engine.process_batch(&cli.input, &cli.output, &jobs) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Fatal: {e}");
            process::exit(1);
        }
    };

    let mut processed = 0u32;
    let mut skipped = 0u32;
    for r in &results {
        print_result(r, cli.quiet);
        if r.skipped {
            skipped += 1;
        } else {
            processed += 1;
        }
    }

    if !cli.quiet {
        eprintln!();
        eprint!("[Summary] Processed: {processed}");
        if skipped > 0 {
            eprint!(", Skipped: {skipped}");
        }
        eprintln!(" (Total: {})", results.len());
        eprintln!("Output in {}", cli.output.display());
    }
}

fn print_result(result: &ProcessResult, quiet: bool) {
    if quiet {
        return;
    }

    if result.skipped {
        eprintln!("[SKIP] {} (not found)", file_name(&result.source));
    } else if let Some((w, h)) = result.dimensions {
        eprintln!(
            "[OK] {} -> {} ({w}x{h}, {})",
            file_name(&result.source),
            file_name(&result.output),
            result.pipeline
        );
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    )
}
