//! Batch processing command

use crate::BatchArgs;
use anyhow::{bail, Context, Result};
use despill_ops::{process_image, DespillParameters, DespillSetup, DespillSources};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
#[allow(unused_imports)]
use tracing::{debug, info, trace, warn};

pub fn run(args: BatchArgs, verbose: u8, threads: usize) -> Result<()> {
    trace!(pattern = %args.input, "batch::run");

    let files: Vec<PathBuf> = glob::glob(&args.input)
        .with_context(|| format!("Invalid pattern: {}", args.input))?
        .filter_map(|r| r.ok())
        .collect();

    if files.is_empty() {
        bail!("No files match pattern: {}", args.input);
    }

    let params = super::build_params(args.preset.as_deref(), &args.overrides)?;
    info!(files = files.len(), pattern = %args.input, "Starting batch despill");

    if verbose > 0 {
        println!("Found {} files matching '{}'", files.len(), args.input);
    }

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create: {}", args.output_dir.display()))?;

    // one file per worker, each despilled on its worker thread
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build thread pool")?;

    let results: Vec<(PathBuf, Result<()>)> = pool.install(|| {
        files
            .par_iter()
            .map(|input| {
                let result = process_file(
                    input,
                    &args.output_dir,
                    &params,
                    args.format.as_deref(),
                    args.float,
                    verbose,
                );
                (input.clone(), result)
            })
            .collect()
    });

    let mut success = 0;
    let mut failed = 0;
    for (input, r) in results {
        match r {
            Ok(()) => success += 1,
            Err(e) => {
                failed += 1;
                warn!(file = %input.display(), "{:#}", e);
                eprintln!("Error: {}: {:#}", input.display(), e);
            }
        }
    }

    info!(success, failed, "Batch despill complete");
    println!("Processed: {} success, {} failed", success, failed);

    if failed > 0 {
        bail!("{} files failed", failed);
    }
    Ok(())
}

/// Output path: `<output_dir>/<stem>.<format or input extension>`.
fn output_path(input: &Path, output_dir: &Path, format: Option<&str>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = format
        .map(|f| f.trim_start_matches('.'))
        .or_else(|| input.extension().and_then(|s| s.to_str()))
        .unwrap_or("png");
    output_dir.join(format!("{}.{}", stem, ext))
}

fn process_file(
    input: &Path,
    output_dir: &Path,
    params: &DespillParameters,
    format: Option<&str>,
    float: bool,
    verbose: u8,
) -> Result<()> {
    let output = output_path(input, output_dir, format);
    if verbose > 0 {
        println!("Processing {} -> {}", input.display(), output.display());
    }

    let image = super::load_image(input)?;
    let sources = DespillSources::new(&image);
    let setup = DespillSetup::new(params.clone(), sources.connected())?;
    let result = process_image(&setup, sources, None)?;
    debug!(file = %input.display(), "despilled");

    super::save_image(&output, &result, float)
}
