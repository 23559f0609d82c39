//! Owning buffer of pixel samples.
//!
//! [`PfmImage`] holds `width * height` boxed [`PixelSample`]s that all share
//! one component count, 1 (grayscale) or 3 (color). Pixels are stored in
//! **row-major** order, top-to-bottom:
//!
//! ```text
//! samples: [s(0,0) s(1,0) ... s(w-1,0)]  ← Row 0 (top)
//!          [s(0,1) s(1,1) ... s(w-1,1)]  ← Row 1
//!          ...
//! ```
//!
//! Writers flip the order on disk; see `pfm-io`.
//!
//! # Usage
//!
//! ```rust
//! use pfm_core::prelude::*;
//!
//! let mut img = PfmImage::new(4, 2, &ScalarSample::new(0.5)).unwrap();
//! img.set(1, 1, Box::new(ScalarSample::new(2.0))).unwrap();
//!
//! assert_eq!(img.get(1, 1).unwrap().single_component(), 2.0);
//! assert!(img.set(0, 0, Box::new(RgbSample::splat(1.0))).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`rayon`] - parallel per-pixel conversions and stats

use crate::error::{Error, Result};
use crate::sample::{luminance_rec709, PixelSample, RgbSample, ScalarSample};
use rayon::prelude::*;

/// Min, max and mean over every channel value of an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageStats {
    /// Smallest non-NaN value (`NaN` if there is none)
    pub min: f32,
    /// Largest non-NaN value (`NaN` if there is none)
    pub max: f32,
    /// Mean of non-NaN values (`NaN` if there are none)
    pub mean: f32,
}

/// Image buffer of heterogeneous-capable pixel samples.
#[derive(Debug, Clone)]
pub struct PfmImage {
    width: u32,
    height: u32,
    channels: usize,
    samples: Vec<Box<dyn PixelSample>>,
}

fn check_dimensions(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be non-zero"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "pixel count overflows"))
}

fn check_channels(channels: usize) -> Result<usize> {
    match channels {
        1 | 3 => Ok(channels),
        n => Err(Error::UnsupportedChannels(n)),
    }
}

impl PfmImage {
    /// Creates an image with every pixel a copy of `fill`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] for a zero width or height
    /// - [`Error::UnsupportedChannels`] if `fill` has neither 1 nor 3 components
    pub fn new(width: u32, height: u32, fill: &dyn PixelSample) -> Result<Self> {
        let count = check_dimensions(width, height)?;
        let channels = check_channels(fill.component_count())?;
        let samples = (0..count).map(|_| fill.clone_box()).collect();
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Grayscale image filled with `0.0`.
    pub fn scalar(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, &ScalarSample::default())
    }

    /// Color image filled with `(0, 0, 0)`.
    pub fn rgb(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, &RgbSample::default())
    }

    /// Creates an image from interleaved, top-row-first channel data.
    ///
    /// ```rust
    /// use pfm_core::PfmImage;
    ///
    /// let img = PfmImage::from_f32(2, 1, 3, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0]).unwrap();
    /// assert_eq!(img.get(1, 0).unwrap().triple_component(), [0.0, 1.0, 0.0]);
    /// ```
    pub fn from_f32(width: u32, height: u32, channels: usize, data: Vec<f32>) -> Result<Self> {
        let count = check_dimensions(width, height)?;
        let channels = check_channels(channels)?;
        let expected = count * channels;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                got: data.len(),
            });
        }

        let samples: Vec<Box<dyn PixelSample>> = if channels == 1 {
            data.into_iter()
                .map(|v| Box::new(ScalarSample::new(v)) as Box<dyn PixelSample>)
                .collect()
        } else {
            data.chunks_exact(3)
                .map(|c| Box::new(RgbSample::new(c[0], c[1], c[2])) as Box<dyn PixelSample>)
                .collect()
        };

        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Components per pixel (1 or 3).
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; zero-sized images cannot be built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Returns the sample at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Result<&dyn PixelSample> {
        let idx = self.index(x, y)?;
        Ok(self.samples[idx].as_ref())
    }

    /// Replaces the sample at (x, y).
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfBounds`] if (x, y) is outside the image
    /// - [`Error::ChannelMismatch`] if the sample's component count differs
    ///   from [`channels`](Self::channels)
    pub fn set(&mut self, x: u32, y: u32, sample: Box<dyn PixelSample>) -> Result<()> {
        let idx = self.index(x, y)?;
        let got = sample.component_count();
        if got != self.channels {
            return Err(Error::channel_mismatch(self.channels, got));
        }
        self.samples[idx] = sample;
        Ok(())
    }

    /// Stores an owned copy of `sample` at (x, y).
    pub fn set_value(&mut self, x: u32, y: u32, sample: &dyn PixelSample) -> Result<()> {
        self.set(x, y, sample.clone_box())
    }

    /// All samples in row-major order.
    #[inline]
    pub fn samples(&self) -> &[Box<dyn PixelSample>] {
        &self.samples
    }

    /// Iterates rows from top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Box<dyn PixelSample>]> + '_ {
        self.samples.chunks_exact(self.width as usize)
    }

    /// Interleaved channel data, top row first.
    pub fn to_f32(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.samples.len() * self.channels);
        for sample in &self.samples {
            match sample.component_count() {
                1 => out.push(sample.single_component()),
                _ => out.extend_from_slice(&sample.triple_component()),
            }
        }
        out
    }

    /// Grayscale copy. Color pixels are reduced with Rec.709 luminance.
    pub fn to_grayscale(&self) -> PfmImage {
        if self.channels == 1 {
            return self.clone();
        }
        let samples = self
            .samples
            .par_iter()
            .map(|s| {
                Box::new(ScalarSample::new(luminance_rec709(s.triple_component())))
                    as Box<dyn PixelSample>
            })
            .collect();
        Self {
            width: self.width,
            height: self.height,
            channels: 1,
            samples,
        }
    }

    /// Color copy. Grayscale pixels are broadcast to all three channels.
    pub fn to_rgb(&self) -> PfmImage {
        if self.channels == 3 {
            return self.clone();
        }
        let samples = self
            .samples
            .par_iter()
            .map(|s| Box::new(RgbSample::splat(s.single_component())) as Box<dyn PixelSample>)
            .collect();
        Self {
            width: self.width,
            height: self.height,
            channels: 3,
            samples,
        }
    }

    /// Min, max and mean over every channel value, ignoring NaN.
    pub fn stats(&self) -> ImageStats {
        let (min, max, sum, count) = self
            .samples
            .par_iter()
            .map(|s| {
                s.components()
                    .into_iter()
                    .filter(|v| !v.is_nan())
                    .fold((f32::INFINITY, f32::NEG_INFINITY, 0.0f64, 0usize), |acc, v| {
                        (acc.0.min(v), acc.1.max(v), acc.2 + v as f64, acc.3 + 1)
                    })
            })
            .reduce(
                || (f32::INFINITY, f32::NEG_INFINITY, 0.0f64, 0usize),
                |a, b| (a.0.min(b.0), a.1.max(b.1), a.2 + b.2, a.3 + b.3),
            );

        if count == 0 {
            return ImageStats {
                min: f32::NAN,
                max: f32::NAN,
                mean: f32::NAN,
            };
        }
        ImageStats {
            min,
            max,
            mean: (sum / count as f64) as f32,
        }
    }
}
