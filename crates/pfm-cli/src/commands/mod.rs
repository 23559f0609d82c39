//! CLI command implementations

pub mod convert;
pub mod fill;
pub mod info;

use anyhow::{Context, Result};
use pfm_core::PfmImage;
use pfm_io::{Endian, ImageWriter, PfmFile, PfmReader, PfmWriter};
use std::path::Path;

/// Load a PFM file, keeping its header
pub fn load_file(path: &Path) -> Result<PfmFile> {
    PfmReader::new()
        .read_file(path)
        .with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &PfmImage, big_endian: bool) -> Result<()> {
    let endian = if big_endian { Endian::Big } else { Endian::Little };
    PfmWriter::new()
        .with_endian(endian)
        .write(path, image)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
