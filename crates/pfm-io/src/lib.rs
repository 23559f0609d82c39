//! # pfm-io
//!
//! Portable Float Map (PFM) I/O for [`pfm_core::PfmImage`].
//!
//! PFM stores uncompressed 32-bit float rasters behind a three-line ASCII
//! header. `PF` files carry three channels per pixel, `Pf` files one.
//!
//! # Architecture
//!
//! - [`header`] - Header parse/emit, [`PfmKind`](header::PfmKind), [`Endian`](header::Endian)
//! - [`pfm`] - [`PfmReader`](pfm::PfmReader) / [`PfmWriter`](pfm::PfmWriter)
//! - [`ImageReader`] / [`ImageWriter`] - Traits implemented by both
//! - [`read`] / [`write`] - Convenience functions with default options
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pfm_core::prelude::*;
//!
//! let mut img = PfmImage::rgb(640, 480)?;
//! img.set(10, 10, Box::new(RgbSample::new(4.0, 2.0, 1.0)))?;
//! pfm_io::write("beauty.pfm", &img)?;
//!
//! let back = pfm_io::read("beauty.pfm")?;
//! ```
//!
//! # Dependencies
//!
//! - `pfm-core` - Image and sample types
//! - `byteorder` - Endian-aware float encoding
//! - `tracing` - Debug logging of header facts

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod traits;

pub mod header;
pub mod pfm;

pub use error::{IoError, IoResult};
pub use header::{Endian, PfmHeader, PfmKind};
pub use pfm::{read, write, PfmFile, PfmReader, PfmWriter};
pub use traits::{ImageReader, ImageWriter};
