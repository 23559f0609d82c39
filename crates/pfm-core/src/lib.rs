//! # pfm-core
//!
//! Core types for writing floating-point PFM images from a renderer.
//!
//! - [`PixelSample`] - Object-safe capability shared by every pixel sample
//! - [`ScalarSample`], [`RgbSample`] - One- and three-channel samples
//! - [`PfmImage`] - Owning buffer of boxed samples
//! - [`Error`], [`SampleError`] - Failure types
//!
//! ## Access protocol
//!
//! Image code holds samples as `Box<dyn PixelSample>` and branches on
//! [`PixelSample::component_count`] before picking an accessor. Asking a
//! sample for the wrong number of components breaks that protocol: the
//! plain accessors terminate the process, the `try_*` accessors return
//! [`SampleError::ComponentMismatch`].
//!
//! ## Crate Structure
//!
//! ```text
//! pfm-core (this crate)
//!    ^
//!    |
//!    +-- pfm-io (PFM header, reader, writer)
//!    +-- pfm-cli (`pfm` binary)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod sample;

pub use error::{contract_violation, Error, Result, SampleError, SampleResult};
pub use image::{ImageStats, PfmImage};
pub use sample::{
    luminance_rec709, sample_from_components, PixelSample, RgbSample, ScalarSample,
    REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R,
};

/// Prelude module for convenient imports.
///
/// ```
/// use pfm_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result, SampleError};
    pub use crate::image::{ImageStats, PfmImage};
    pub use crate::sample::{PixelSample, RgbSample, ScalarSample};
}
