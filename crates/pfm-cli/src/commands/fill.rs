//! Fill command: writes a constant-valued image.

use crate::FillArgs;
use anyhow::{bail, Context, Result};
use pfm_core::{PfmImage, PixelSample, RgbSample, ScalarSample};
use tracing::{info, trace};

/// Runs the fill command.
pub fn run(args: FillArgs, verbose: u8) -> Result<()> {
    trace!(output = %args.output.display(), "fill::run");

    let sample: Box<dyn PixelSample> = match (&args.rgb, args.value) {
        (Some(rgb), _) => Box::new(parse_rgb(rgb)?),
        (None, Some(v)) => Box::new(ScalarSample::new(v)),
        (None, None) => bail!("either --value or --rgb is required"),
    };

    let image = PfmImage::new(args.width, args.height, sample.as_ref())
        .context("Failed to create image")?;
    info!(
        width = args.width,
        height = args.height,
        channels = image.channels(),
        "Writing constant image"
    );

    super::save_image(&args.output, &image, args.big_endian)?;

    if verbose > 0 {
        println!(
            "Wrote {}x{} {}-channel image to {}",
            args.width,
            args.height,
            image.channels(),
            args.output.display()
        );
    }
    Ok(())
}

/// Parses `R,G,B`.
fn parse_rgb(s: &str) -> Result<RgbSample> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Invalid RGB value: {s}"))?;
    match parts.as_slice() {
        [r, g, b] => Ok(RgbSample::new(*r, *g, *b)),
        _ => bail!("RGB value needs exactly 3 components, got {}", parts.len()),
    }
}
