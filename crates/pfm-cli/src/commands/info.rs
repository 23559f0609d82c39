//! Image info command.
//!
//! Displays resolution, channel layout, byte order and scale, plus optional
//! value statistics.

use crate::InfoArgs;
use anyhow::{Context, Result};
use pfm_io::{Endian, PfmFile};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// Per-file report, printed as text or JSON.
#[derive(Debug, Serialize)]
struct InfoReport {
    path: String,
    width: u32,
    height: u32,
    channels: usize,
    kind: &'static str,
    endian: &'static str,
    scale: f32,
    file_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<StatsReport>,
}

#[derive(Debug, Serialize)]
struct StatsReport {
    min: f32,
    max: f32,
    mean: f32,
}

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        trace!(input = %path.display(), "info::run");
        let file_size = fs::metadata(path)
            .with_context(|| format!("Failed to stat: {}", path.display()))?
            .len();
        let file = super::load_file(path)?;
        let report = build_report(path, &file, file_size, args.stats);
        debug!(width = report.width, height = report.height, channels = report.channels, "Read image");

        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_text(&report, verbose);
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}

fn build_report(path: &Path, file: &PfmFile, file_size: u64, with_stats: bool) -> InfoReport {
    let stats = with_stats.then(|| {
        let s = file.image.stats();
        StatsReport {
            min: s.min,
            max: s.max,
            mean: s.mean,
        }
    });

    InfoReport {
        path: path.display().to_string(),
        width: file.image.width(),
        height: file.image.height(),
        channels: file.image.channels(),
        kind: file.header.kind.magic(),
        endian: match file.header.endian() {
            Endian::Little => "little",
            Endian::Big => "big",
        },
        scale: file.scale(),
        file_size,
        stats,
    }
}

fn print_text(report: &InfoReport, verbose: u8) {
    println!("{}", report.path);
    println!("  Resolution: {}x{}", report.width, report.height);
    println!("  Channels:   {} ({})", report.channels, report.kind);
    println!("  Pixels:     {}", report.width as u64 * report.height as u64);
    println!("  File size:  {}", super::format_size(report.file_size));

    if verbose > 0 {
        println!("  Byte order: {}", report.endian);
        println!("  Scale:      {}", report.scale);
    }

    if let Some(stats) = &report.stats {
        println!("  Min value:  {:.6}", stats.min);
        println!("  Max value:  {:.6}", stats.max);
        println!("  Avg value:  {:.6}", stats.mean);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfm_core::PfmImage;
    use pfm_io::{PfmHeader, PfmKind};

    #[test]
    fn report_fields() {
        let image = PfmImage::from_f32(2, 1, 1, vec![1.0, 3.0]).unwrap();
        let file = PfmFile {
            header: PfmHeader::new(PfmKind::Grayscale, 2, 1, Endian::Big),
            image,
        };
        let report = build_report(Path::new("a.pfm"), &file, 20, true);
        assert_eq!(report.kind, "Pf");
        assert_eq!(report.endian, "big");
        assert_eq!(report.scale, 1.0);
        let stats = report.stats.expect("stats");
        assert_eq!(stats.mean, 2.0);

        let json = serde_json::to_value(build_report(Path::new("a.pfm"), &file, 20, false)).unwrap();
        assert_eq!(json["channels"], 1);
        assert!(json.get("stats").is_none());
    }
}
