//! Single-image despill command

use crate::ApplyArgs;
use anyhow::{Context, Result};
use despill_ops::parallel::RowDriver;
use despill_ops::{DespillSetup, DespillSources};
use std::time::Instant;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: ApplyArgs, verbose: u8, threads: usize) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "apply::run");

    let params = super::build_params(args.preset.as_deref(), &args.overrides)?;
    debug!(?params, "parameters");

    let source = super::load_image(&args.input)?;
    let limit = args.limit.as_deref().map(super::load_image).transpose()?;
    let color = args.color.as_deref().map(super::load_image).transpose()?;
    let respill = args.respill.as_deref().map(super::load_image).transpose()?;

    let mut sources = DespillSources::new(&source);
    if let Some(img) = &limit {
        sources = sources.with_limit(img);
    }
    if let Some(img) = &color {
        sources = sources.with_color(img);
    }
    if let Some(img) = &respill {
        sources = sources.with_respill(img);
    }

    let setup = DespillSetup::new(params, sources.connected())?;
    let driver = RowDriver::new(threads)?;

    if verbose > 0 {
        println!(
            "Despilling {} ({}x{}, {} threads)",
            args.input.display(),
            source.width(),
            source.height(),
            driver.threads()
        );
    }

    let start = Instant::now();
    let output = driver
        .run(&setup, sources, args.region)
        .with_context(|| format!("Failed to despill: {}", args.input.display()))?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "despill done");

    super::save_image(&args.output, &output, args.float)?;

    if verbose > 0 {
        println!("Wrote {}", args.output.display());
    }
    Ok(())
}
