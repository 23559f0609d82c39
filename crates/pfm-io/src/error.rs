//! Error types for PFM I/O operations.

use std::io;
use thiserror::Error;

/// PFM read/write error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid or corrupted header.
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// Raster ended before `width * height * channels` floats were read.
    #[error("unexpected end of data: expected {expected} bytes, got {actual}")]
    UnexpectedEof {
        /// Raster bytes the header promises.
        expected: usize,
        /// Raster bytes actually present.
        actual: usize,
    },

    /// Image could not be built from the decoded data.
    #[error("image error: {0}")]
    Image(#[from] pfm_core::Error),
}

/// Result type for PFM I/O operations.
pub type IoResult<T> = Result<T, IoError>;
