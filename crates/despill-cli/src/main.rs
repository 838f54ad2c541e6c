//! despill - green/blue screen spill suppression
//!
//! Removes screen spill from plates, adds a respill color back and
//! optionally writes the spill amount as a matte.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use despill_core::Rect;
use despill_math::{Color3, LumaMode};
use despill_ops::{ChannelSlot, ColorSelect, DespillMath, DespillParameters, OutputType};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "despill")]
#[command(author, version, about = "Green/blue screen spill suppression")]
#[command(long_about = "
Removes color spill from keyed plates, composites a respill color back in
and optionally exports the spill amount as a matte.

Examples:
  despill apply plate.png -o clean.png --screen green
  despill apply plate.tif -o clean.tif --pick 0.2,0.8,0.3 --output-alpha
  despill apply plate.png -o clean.png --limit mask.png --limit-channel red
  despill apply plate.png -o clean.png --protect 0.8,0.6,0.5 --effect 2
  despill batch 'plates/*.png' --output-dir clean --preset green.yaml
  despill preset --name blue -o blue.yaml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write the log to this file
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Despill one image
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Despill every file matching a glob
    #[command(visible_alias = "b")]
    Batch(BatchArgs),

    /// Print or write a YAML parameter preset
    Preset(PresetArgs),
}

/// Parameter overrides shared by `apply` and `batch`.
///
/// Anything given here wins over the preset file.
#[derive(Args, Debug, Default)]
struct DespillOverrides {
    /// Despill color source: red, green, blue, pick
    #[arg(long)]
    screen: Option<ColorSelect>,

    /// Picked spill color r,g,b (implies --screen pick)
    #[arg(long, value_parser = parse_color)]
    pick: Option<Color3>,

    /// Normalize spill against the screen color's own response
    #[arg(long, overrides_with = "no_absolute")]
    absolute: bool,

    /// Relative spill (turns off a preset's absolute mode)
    #[arg(long)]
    no_absolute: bool,

    /// Limit math: average, max, min, custom
    #[arg(long)]
    math: Option<DespillMath>,

    /// Weight for custom math, -1..1
    #[arg(long, allow_hyphen_values = true)]
    custom_weight: Option<f32>,

    /// Hue offset in degrees
    #[arg(long, allow_hyphen_values = true)]
    hue_offset: Option<f32>,

    /// Despill strength, 0..2
    #[arg(long)]
    hue_limit: Option<f32>,

    /// Invert the limit mask
    #[arg(long, overrides_with = "no_invert_limit")]
    invert_limit: bool,

    /// Use the limit mask as is
    #[arg(long)]
    no_invert_limit: bool,

    /// Limit mask channel: red, green, blue, alpha
    #[arg(long)]
    limit_channel: Option<ChannelSlot>,

    /// Protect this tone r,g,b (enables tone protection)
    #[arg(long, value_parser = parse_color, conflicts_with = "no_protect")]
    protect: Option<Color3>,

    /// Disable tone protection
    #[arg(long)]
    no_protect: bool,

    /// Protection tolerance, 0..1
    #[arg(long)]
    tolerance: Option<f32>,

    /// Protection falloff, 0..4
    #[arg(long)]
    falloff: Option<f32>,

    /// Protection effect, 0..10
    #[arg(long)]
    effect: Option<f32>,

    /// Output the protection matte preview
    #[arg(long, overrides_with = "no_preview")]
    preview: bool,

    /// Output the despilled result, not the preview
    #[arg(long)]
    no_preview: bool,

    /// Respill luma: rec709, ccir601, rec2020, average, max
    #[arg(long)]
    respill_math: Option<LumaMode>,

    /// Respill color r,g,b
    #[arg(long, value_parser = parse_color)]
    respill_color: Option<Color3>,

    /// Spill luma mapped to 0
    #[arg(long, allow_hyphen_values = true)]
    black_point: Option<f32>,

    /// Spill luma mapped to 1
    #[arg(long)]
    white_point: Option<f32>,

    /// Output: despill or spill
    #[arg(long)]
    output_type: Option<OutputType>,

    /// Write the spill amount to the output channel
    #[arg(long, overrides_with = "no_output_alpha")]
    output_alpha: bool,

    /// Leave the output channel as the input had it
    #[arg(long)]
    no_output_alpha: bool,

    /// Write 1 - spill amount
    #[arg(long, overrides_with = "no_invert_alpha")]
    invert_alpha: bool,

    /// Write the spill amount uninverted
    #[arg(long)]
    no_invert_alpha: bool,

    /// Channel receiving the spill amount: red, green, blue, alpha
    #[arg(long)]
    output_channel: Option<ChannelSlot>,
}

/// `Some(true)` for `--flag`, `Some(false)` for `--no-flag`, `None` when
/// neither was given.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

impl DespillOverrides {
    /// Applies every given flag on top of `params`.
    fn apply_to(&self, params: &mut DespillParameters) {
        if let Some(v) = self.screen {
            params.color = v;
        }
        if let Some(v) = self.pick {
            params.pick = v;
            if self.screen.is_none() {
                params.color = ColorSelect::Pick;
            }
        }
        if let Some(v) = switch(self.absolute, self.no_absolute) {
            params.absolute_mode = v;
        }
        if let Some(v) = self.math {
            params.despill_math = v;
        }
        if let Some(v) = self.custom_weight {
            params.custom_weight = v;
        }
        if let Some(v) = self.hue_offset {
            params.hue_offset = v;
        }
        if let Some(v) = self.hue_limit {
            params.hue_limit = v;
        }
        if let Some(v) = switch(self.invert_limit, self.no_invert_limit) {
            params.invert_limit_mask = v;
        }
        if let Some(v) = self.limit_channel {
            params.limit_channel = v;
        }
        if let Some(v) = self.protect {
            params.protect_tones = true;
            params.protect_color = v;
        }
        if self.no_protect {
            params.protect_tones = false;
        }
        if let Some(v) = self.tolerance {
            params.protect_tolerance = v;
        }
        if let Some(v) = self.falloff {
            params.protect_falloff = v;
        }
        if let Some(v) = self.effect {
            params.protect_effect = v;
        }
        if let Some(v) = switch(self.preview, self.no_preview) {
            params.protect_preview = v;
        }
        if let Some(v) = self.respill_math {
            params.respill_math = v;
        }
        if let Some(v) = self.respill_color {
            params.respill_color = v;
        }
        if let Some(v) = self.black_point {
            params.black_point = v;
        }
        if let Some(v) = self.white_point {
            params.white_point = v;
        }
        if let Some(v) = self.output_type {
            params.output_type = v;
        }
        if let Some(v) = switch(self.output_alpha, self.no_output_alpha) {
            params.output_alpha = v;
        }
        if let Some(v) = switch(self.invert_alpha, self.no_invert_alpha) {
            params.invert_alpha = v;
        }
        if let Some(v) = self.output_channel {
            params.output_channel = v;
        }
    }
}

/// Arguments for the `apply` command.
#[derive(Args)]
struct ApplyArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Limit mask image
    #[arg(long)]
    limit: Option<PathBuf>,

    /// Per-pixel despill color image
    #[arg(long)]
    color: Option<PathBuf>,

    /// Per-pixel respill color image
    #[arg(long)]
    respill: Option<PathBuf>,

    /// YAML preset with base parameters
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Process only this region: x,y,w,h
    #[arg(long)]
    region: Option<Rect>,

    /// Write 32-bit float (TIFF only)
    #[arg(long)]
    float: bool,

    #[command(flatten)]
    overrides: DespillOverrides,
}

/// Arguments for the `batch` command.
#[derive(Args)]
struct BatchArgs {
    /// Input pattern (glob)
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: PathBuf,

    /// YAML preset with base parameters
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Output format extension (png, tif)
    #[arg(short, long)]
    format: Option<String>,

    /// Write 32-bit float (TIFF only)
    #[arg(long)]
    float: bool,

    #[command(flatten)]
    overrides: DespillOverrides,
}

/// Arguments for the `preset` command.
#[derive(Args)]
struct PresetArgs {
    /// Built-in preset: green, blue, default
    #[arg(short, long, default_value = "default")]
    name: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Parses `r,g,b`, or a single value for gray.
fn parse_color(s: &str) -> Result<Color3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let values = parts
        .iter()
        .map(|p| p.parse::<f32>().map_err(|_| format!("invalid color component '{}'", p)))
        .collect::<Result<Vec<f32>, String>>()?;
    match values.as_slice() {
        [v] => Ok(Color3::splat(*v)),
        [r, g, b] => Ok(Color3::new(*r, *g, *b)),
        _ => Err(format!("expected r,g,b, got '{}'", s)),
    }
}

/// Installs the stderr subscriber and, with `--log`, a non-blocking file
/// writer. `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let stderr = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr)
            .try_init()
            .context("Failed to install logger")?;
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("Log path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("Failed to install logger")?;
    Ok(Some(guard))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // flushes the file writer on drop
    let _guard = init_logging(cli.verbose, cli.log.as_deref())?;

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args, cli.verbose, cli.threads),
        Commands::Batch(args) => commands::batch::run(args, cli.verbose, cli.threads),
        Commands::Preset(args) => commands::preset::run(args, cli.verbose),
    }
}
