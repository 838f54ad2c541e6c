//! Preset export command

use crate::PresetArgs;
use anyhow::{Context, Result};
use despill_ops::DespillParameters;
use tracing::trace;

pub fn run(args: PresetArgs, verbose: u8) -> Result<()> {
    trace!(name = %args.name, "preset::run");

    let params = DespillParameters::named(&args.name)
        .with_context(|| format!("Unknown preset '{}' (expected green, blue or default)", args.name))?;

    match &args.output {
        Some(path) => {
            params
                .save(path)
                .with_context(|| format!("Failed to save: {}", path.display()))?;
            if verbose > 0 {
                println!("Wrote {}", path.display());
            }
        }
        None => print!("{}", params.to_yaml_string()?),
    }
    Ok(())
}
