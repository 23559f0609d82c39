//! Convert command.
//!
//! Rewrites a PFM image, optionally reducing it to luminance, expanding it
//! to three channels or switching the byte order.

use crate::ConvertArgs;
use anyhow::Result;
use tracing::{debug, info, trace};

/// Runs the convert command.
pub fn run(args: ConvertArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "convert::run");

    let file = super::load_file(&args.input)?;
    let mut image = file.image;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        channels = image.channels(),
        "Converting image"
    );
    if verbose > 0 {
        println!(
            "Converting {} ({}x{}, {} ch) -> {}",
            args.input.display(),
            image.width(),
            image.height(),
            image.channels(),
            args.output.display()
        );
    }

    if args.gray && image.channels() != 1 {
        debug!("Reducing to luminance");
        image = image.to_grayscale();
    } else if args.rgb && image.channels() != 3 {
        debug!("Expanding to RGB");
        image = image.to_rgb();
    }

    super::save_image(&args.output, &image, args.big_endian)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
