//! I/O traits for image readers and writers.

use crate::IoResult;
use pfm_core::PfmImage;
use std::path::Path;

/// Reads a [`PfmImage`] from a file or a byte slice.
pub trait ImageReader {
    /// Reads an image from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<PfmImage>;

    /// Reads an image from memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PfmImage>;
}

/// Writes a [`PfmImage`] to a file or a byte buffer.
pub trait ImageWriter {
    /// Writes an image to a file path.
    fn write<P: AsRef<Path>>(&self, path: P, image: &PfmImage) -> IoResult<()>;

    /// Writes an image to memory.
    fn write_to_memory(&self, image: &PfmImage) -> IoResult<Vec<u8>>;
}
