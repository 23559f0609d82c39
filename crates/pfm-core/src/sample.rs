//! Pixel samples stored in a [`PfmImage`](crate::PfmImage).
//!
//! A pixel sample is one pixel's value(s) waiting to be written out. PFM
//! carries either one channel (grayscale, `Pf`) or three (color, `PF`), so
//! there are two variants behind one object-safe trait:
//!
//! - [`ScalarSample`] - a single `f32`
//! - [`RgbSample`] - three `f32` channels
//!
//! # Access protocol
//!
//! Callers hold samples as `Box<dyn PixelSample>`, ask for
//! [`component_count`](PixelSample::component_count) and then call the
//! matching accessor:
//!
//! ```
//! use pfm_core::prelude::*;
//!
//! let samples: Vec<Box<dyn PixelSample>> = vec![
//!     Box::new(ScalarSample::new(0.5)),
//!     Box::new(RgbSample::new(1.0, 0.5, 0.25)),
//! ];
//!
//! let mut out = Vec::new();
//! for s in &samples {
//!     match s.component_count() {
//!         1 => out.push(s.single_component()),
//!         _ => out.extend(s.triple_component()),
//!     }
//! }
//! assert_eq!(out, [0.5, 1.0, 0.5, 0.25]);
//! ```
//!
//! Calling the wrong accessor is a programming error. The plain accessors
//! terminate the process through [`contract_violation`]; the `try_*`
//! accessors return [`SampleError`] for callers that want to decide.

use crate::error::{contract_violation, Error, Result, SampleError, SampleResult};
use smallvec::{smallvec, SmallVec};
use std::fmt;

/// Rec.709 luminance coefficient for red channel.
pub const REC709_LUMA_R: f32 = 0.2126;

/// Rec.709 luminance coefficient for green channel.
pub const REC709_LUMA_G: f32 = 0.7152;

/// Rec.709 luminance coefficient for blue channel.
pub const REC709_LUMA_B: f32 = 0.0722;

/// Calculate Rec.709 luminance: `Y = 0.2126*R + 0.7152*G + 0.0722*B`.
///
/// ```
/// use pfm_core::luminance_rec709;
/// let luma = luminance_rec709([0.5, 0.3, 0.2]);
/// assert!((luma - 0.3353).abs() < 0.0001);
/// ```
#[inline]
pub fn luminance_rec709(rgb: [f32; 3]) -> f32 {
    rgb[0] * REC709_LUMA_R + rgb[1] * REC709_LUMA_G + rgb[2] * REC709_LUMA_B
}

/// Shared capability of every pixel sample variant.
///
/// Implementors provide the `try_*` accessors; the infallible accessors are
/// derived from them and abort on mismatch.
pub trait PixelSample: fmt::Debug + Send + Sync {
    /// Number of channels this sample holds (1 or 3).
    fn component_count(&self) -> usize;

    /// Returns the single channel, or an error for multi-channel samples.
    fn try_single_component(&self) -> SampleResult<f32>;

    /// Returns `[r, g, b]`, or an error for samples without three channels.
    fn try_triple_component(&self) -> SampleResult<[f32; 3]>;

    /// Returns an independently owned copy of this sample.
    fn clone_box(&self) -> Box<dyn PixelSample>;

    /// Returns the single channel.
    ///
    /// Terminates the process if `component_count() != 1`.
    fn single_component(&self) -> f32 {
        self.try_single_component()
            .unwrap_or_else(|err| contract_violation(&err))
    }

    /// Returns `[r, g, b]`.
    ///
    /// Terminates the process if `component_count() != 3`.
    fn triple_component(&self) -> [f32; 3] {
        self.try_triple_component()
            .unwrap_or_else(|err| contract_violation(&err))
    }

    /// All channels in storage order.
    fn components(&self) -> SmallVec<[f32; 3]> {
        match self.component_count() {
            1 => smallvec![self.single_component()],
            _ => SmallVec::from_buf(self.triple_component()),
        }
    }
}

impl Clone for Box<dyn PixelSample> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// One-channel pixel sample.
///
/// The value is fixed at construction; there is no setter.
///
/// ```
/// use pfm_core::prelude::*;
///
/// let s = ScalarSample::new(-2.5);
/// assert_eq!(s.component_count(), 1);
/// assert_eq!(s.single_component(), -2.5);
/// assert!(s.try_triple_component().is_err());
/// assert_eq!(ScalarSample::default().value(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScalarSample {
    value: f32,
}

impl ScalarSample {
    /// Creates a sample holding `value`.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self { value }
    }

    /// The stored value.
    #[inline]
    pub const fn value(&self) -> f32 {
        self.value
    }
}

impl From<f32> for ScalarSample {
    #[inline]
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ScalarSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl PixelSample for ScalarSample {
    #[inline]
    fn component_count(&self) -> usize {
        1
    }

    #[inline]
    fn try_single_component(&self) -> SampleResult<f32> {
        Ok(self.value)
    }

    #[inline]
    fn try_triple_component(&self) -> SampleResult<[f32; 3]> {
        Err(SampleError::component_mismatch(3, 1))
    }

    fn clone_box(&self) -> Box<dyn PixelSample> {
        Box::new(*self)
    }

    #[inline]
    fn single_component(&self) -> f32 {
        self.value
    }
}

/// Three-channel pixel sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RgbSample {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl RgbSample {
    /// Creates a sample from its three channels.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a sample with all channels set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Channels as `[r, g, b]`.
    #[inline]
    pub const fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Rec.709 luminance of this sample.
    #[inline]
    pub fn luminance(&self) -> f32 {
        luminance_rec709(self.to_array())
    }
}

impl From<[f32; 3]> for RgbSample {
    #[inline]
    fn from(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl fmt::Display for RgbSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

impl PixelSample for RgbSample {
    #[inline]
    fn component_count(&self) -> usize {
        3
    }

    #[inline]
    fn try_single_component(&self) -> SampleResult<f32> {
        Err(SampleError::component_mismatch(1, 3))
    }

    #[inline]
    fn try_triple_component(&self) -> SampleResult<[f32; 3]> {
        Ok(self.to_array())
    }

    fn clone_box(&self) -> Box<dyn PixelSample> {
        Box::new(*self)
    }

    #[inline]
    fn triple_component(&self) -> [f32; 3] {
        self.to_array()
    }
}

/// Builds a boxed sample from a slice of 1 or 3 channel values.
///
/// ```
/// use pfm_core::sample_from_components;
///
/// let s = sample_from_components(&[0.1, 0.2, 0.3]).unwrap();
/// assert_eq!(s.component_count(), 3);
/// assert!(sample_from_components(&[0.0, 0.0]).is_err());
/// ```
pub fn sample_from_components(values: &[f32]) -> Result<Box<dyn PixelSample>> {
    match *values {
        [v] => Ok(Box::new(ScalarSample::new(v))),
        [r, g, b] => Ok(Box::new(RgbSample::new(r, g, b))),
        _ => Err(Error::UnsupportedChannels(values.len())),
    }
}
