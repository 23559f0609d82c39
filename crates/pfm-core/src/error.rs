//! Error types for pfm-core operations.
//!
//! Two enums live here:
//!
//! - [`SampleError`] - a pixel sample was asked for a channel layout it does
//!   not have. This is a caller bug; the typed form is returned by the
//!   `try_*` accessors and the fatal form by [`contract_violation`].
//! - [`Error`] - image buffer failures (bounds, dimensions, channel counts).
//!
//! # Usage
//!
//! ```rust
//! use pfm_core::{Error, Result};
//!
//! fn check(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//! # assert!(check(3, 0, 2, 2).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - derive macro error implementation
//! - [`tracing`] - fatal diagnostics

use std::io::Write;
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for pixel sample accessors.
pub type SampleResult<T> = std::result::Result<T, SampleError>;

/// A pixel sample was read with the wrong accessor.
///
/// Callers are expected to check
/// [`PixelSample::component_count`](crate::PixelSample::component_count)
/// before picking an accessor, so this always indicates a programming error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SampleError {
    /// The accessor asked for a different number of components than the
    /// sample stores.
    ///
    /// ```rust
    /// use pfm_core::SampleError;
    ///
    /// let err = SampleError::ComponentMismatch { requested: 3, available: 1 };
    /// assert!(err
    ///     .to_string()
    ///     .contains("requested 3 components from a 1-component sample"));
    /// ```
    #[error("component mismatch: requested {requested} components from a {available}-component sample")]
    ComponentMismatch {
        /// Components the caller asked for
        requested: usize,
        /// Components the sample holds
        available: usize,
    },
}

impl SampleError {
    /// Creates a [`SampleError::ComponentMismatch`] error.
    #[inline]
    pub fn component_mismatch(requested: usize, available: usize) -> Self {
        Self::ComponentMismatch {
            requested,
            available,
        }
    }
}

/// Reports a broken accessor contract and terminates the process.
///
/// The error is logged through `tracing` and written to stderr, then the
/// process exits with status 1. Nothing unwinds, so the condition cannot be
/// caught by the caller.
#[cold]
pub fn contract_violation(err: &SampleError) -> ! {
    tracing::error!(error = %err, "pixel sample contract violation");
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "pfm: fatal: {err}");
    let _ = stderr.flush();
    std::process::exit(1)
}

/// Errors that can occur while building or editing a [`PfmImage`](crate::PfmImage).
///
/// # Categories
///
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds)
/// - **Shape errors**: [`InvalidDimensions`](Error::InvalidDimensions),
///   [`DataLength`](Error::DataLength)
/// - **Channel errors**: [`ChannelMismatch`](Error::ChannelMismatch),
///   [`UnsupportedChannels`](Error::UnsupportedChannels)
/// - **Sample errors**: [`Sample`](Error::Sample)
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    ///
    /// ```rust
    /// use pfm_core::Error;
    ///
    /// let err = Error::out_of_bounds(100, 50, 80, 60);
    /// assert!(err.to_string().contains("100"));
    /// ```
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or the pixel count overflows.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// A sample's component count does not match the image's.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Channels per pixel in the image
        expected: usize,
        /// Channels in the offered sample
        got: usize,
    },

    /// PFM images hold one or three channels per pixel.
    #[error("unsupported channel count: {0} (expected 1 or 3)")]
    UnsupportedChannels(usize),

    /// Interleaved data does not match `width * height * channels`.
    #[error("data length {got} does not match expected {expected}")]
    DataLength {
        /// Expected number of values
        expected: usize,
        /// Number of values supplied
        got: usize,
    },

    /// A sample accessor failed.
    #[error(transparent)]
    Sample(#[from] SampleError),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: usize, got: usize) -> Self {
        Self::ChannelMismatch { expected, got }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
