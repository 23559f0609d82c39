//! pfm - inspect, convert and generate Portable Float Map images

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pfm")]
#[command(author, version, about = "Inspect, convert and generate PFM float images")]
#[command(long_about = "
Small toolbox for Portable Float Map (PF/Pf) images.

Examples:
  pfm info render.pfm                     # Show image info
  pfm info render.pfm --stats --json      # Stats as JSON
  pfm convert render.pfm gray.pfm --gray  # Reduce to luminance
  pfm convert gray.pfm rgb.pfm --rgb --big-endian
  pfm fill black.pfm -w 64 -H 64 --value 0
  pfm fill grey.pfm -w 8 -H 8 --rgb 0.18,0.18,0.18
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Log filter directive (e.g. "pfm_io=debug"); overrides RUST_LOG
    #[arg(long, global = true)]
    log: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Rewrite an image, optionally changing channels or byte order
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Write a constant-valued image
    Fill(FillArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Show min/max/mean over all channel values
    #[arg(short, long)]
    stats: bool,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// Reduce to one channel (Rec.709 luminance)
    #[arg(long, conflicts_with = "rgb")]
    gray: bool,

    /// Expand to three channels
    #[arg(long)]
    rgb: bool,

    /// Write big-endian floats instead of little-endian
    #[arg(long)]
    big_endian: bool,
}

#[derive(Args)]
struct FillArgs {
    /// Output image
    output: PathBuf,

    /// Width in pixels
    #[arg(short, long)]
    width: u32,

    /// Height in pixels
    #[arg(short = 'H', long)]
    height: u32,

    /// Grayscale value
    #[arg(
        long,
        conflicts_with = "rgb",
        required_unless_present = "rgb",
        allow_negative_numbers = true
    )]
    value: Option<f32>,

    /// Color value as R,G,B
    #[arg(long, allow_hyphen_values = true)]
    rgb: Option<String>,

    /// Write big-endian floats instead of little-endian
    #[arg(long)]
    big_endian: bool,
}

/// Installs the stderr log subscriber.
///
/// Precedence: `--log`, then `RUST_LOG`, then a level derived from `-v`.
fn init_logging(verbose: u8, directive: Option<&str>) -> Result<()> {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = match directive {
        Some(d) => EnvFilter::try_new(d).with_context(|| format!("Invalid log filter: {d}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Fill(args) => commands::fill::run(args, cli.verbose),
    }
}
