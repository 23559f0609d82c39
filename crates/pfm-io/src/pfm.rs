//! Portable Float Map reading and writing.
//!
//! Raster layout after the [header](crate::header):
//!
//! ```text
//! [row h-1: px px px ...]  <- bottom scanline comes first
//! [row h-2: px px px ...]
//! ...
//! [row 0:   px px px ...]  <- top scanline is last
//! ```
//!
//! Each pixel is 1 or 3 `f32` values in the byte order given by the sign of
//! the header scale. [`PfmImage`] keeps rows top-down, so the reader flips
//! on load (unless told not to) and the writer always emits bottom-up.

use crate::header::{Endian, PfmHeader, PfmKind};
use crate::{ImageReader, ImageWriter, IoError, IoResult};
use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use pfm_core::{PfmImage, PixelSample};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Upper bound on the raster buffer reserved before any data is read.
const MAX_PREALLOC: usize = 64 * 1024 * 1024;

/// A decoded PFM file: the image plus the header it came with.
#[derive(Debug, Clone)]
pub struct PfmFile {
    /// Header as stored on disk.
    pub header: PfmHeader,
    /// Decoded image, row 0 at the top unless flipping was disabled.
    pub image: PfmImage,
}

impl PfmFile {
    /// Absolute value of the header scale factor.
    pub fn scale(&self) -> f32 {
        self.header.scale.abs()
    }
}

/// PFM reader.
///
/// ```rust,ignore
/// use pfm_io::pfm::PfmReader;
///
/// let file = PfmReader::new().read_file("render.pfm")?;
/// println!("{}x{} scale {}", file.image.width(), file.image.height(), file.scale());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PfmReader {
    flip: bool,
}

impl Default for PfmReader {
    fn default() -> Self {
        Self { flip: true }
    }
}

impl PfmReader {
    /// Reader that returns rows top-down.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to reorder rows top-down (`true`, default) or keep the
    /// on-disk bottom-up order.
    pub fn with_flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    /// Reads a file, keeping the header.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> IoResult<PfmFile> {
        let path = path.as_ref();
        trace!(path = %path.display(), "pfm::read");
        let file = File::open(path)?;
        self.decode(&mut BufReader::new(file))
    }

    /// Decodes a PFM stream.
    pub fn decode<R: BufRead>(&self, reader: &mut R) -> IoResult<PfmFile> {
        let header = PfmHeader::read(reader)?;
        debug!(
            kind = ?header.kind,
            width = header.width,
            height = header.height,
            scale = header.scale,
            "PFM header"
        );

        // The header's size claim is untrusted until the bytes arrive.
        let expected = header.data_len();
        let mut bytes = Vec::with_capacity(expected.min(MAX_PREALLOC));
        reader.take(expected as u64).read_to_end(&mut bytes)?;
        if bytes.len() != expected {
            return Err(IoError::UnexpectedEof {
                expected,
                actual: bytes.len(),
            });
        }

        let mut values = vec![0.0f32; header.value_count()];
        match header.endian() {
            Endian::Little => LittleEndian::read_f32_into(&bytes, &mut values),
            Endian::Big => BigEndian::read_f32_into(&bytes, &mut values),
        }

        if self.flip {
            values = flip_rows(&values, header.width as usize * header.kind.channels());
        }

        let image = PfmImage::from_f32(header.width, header.height, header.kind.channels(), values)?;
        Ok(PfmFile { header, image })
    }
}

impl ImageReader for PfmReader {
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<PfmImage> {
        Ok(self.read_file(path)?.image)
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<PfmImage> {
        Ok(self.decode(&mut Cursor::new(data))?.image)
    }
}

/// PFM writer.
///
/// Grayscale images are written as `Pf`, color images as `PF`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PfmWriter {
    endian: Endian,
}

impl PfmWriter {
    /// Little-endian writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raster byte order.
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Encodes `image` into `writer`.
    pub fn encode<W: Write>(&self, writer: &mut W, image: &PfmImage) -> IoResult<()> {
        let kind = PfmKind::from_channels(image.channels())
            .ok_or(pfm_core::Error::UnsupportedChannels(image.channels()))?;
        let header = PfmHeader::new(kind, image.width(), image.height(), self.endian);
        debug!(kind = ?kind, width = image.width(), height = image.height(), endian = ?self.endian, "writing PFM");

        header.write(writer)?;
        match self.endian {
            Endian::Little => write_raster::<LittleEndian, _>(writer, image),
            Endian::Big => write_raster::<BigEndian, _>(writer, image),
        }
    }
}

impl ImageWriter for PfmWriter {
    fn write<P: AsRef<Path>>(&self, path: P, image: &PfmImage) -> IoResult<()> {
        let path = path.as_ref();
        trace!(path = %path.display(), "pfm::write");
        let mut writer = BufWriter::new(File::create(path)?);
        self.encode(&mut writer, image)?;
        writer.flush()?;
        Ok(())
    }

    fn write_to_memory(&self, image: &PfmImage) -> IoResult<Vec<u8>> {
        let mut out = Vec::new();
        self.encode(&mut out, image)?;
        Ok(out)
    }
}

/// Reads a PFM file with default options.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PfmImage> {
    PfmReader::default().read(path)
}

/// Writes a little-endian PFM file.
pub fn write<P: AsRef<Path>>(path: P, image: &PfmImage) -> IoResult<()> {
    PfmWriter::default().write(path, image)
}

fn write_raster<B: ByteOrder, W: Write>(writer: &mut W, image: &PfmImage) -> IoResult<()> {
    let mut row_buf = Vec::with_capacity(image.width() as usize * image.channels() * 4);
    for row in image.rows().rev() {
        row_buf.clear();
        for sample in row {
            write_sample::<B>(&mut row_buf, sample.as_ref())?;
        }
        writer.write_all(&row_buf)?;
    }
    Ok(())
}

fn write_sample<B: ByteOrder>(out: &mut Vec<u8>, sample: &dyn PixelSample) -> IoResult<()> {
    match sample.component_count() {
        1 => out.write_f32::<B>(sample.single_component())?,
        _ => {
            for v in sample.triple_component() {
                out.write_f32::<B>(v)?;
            }
        }
    }
    Ok(())
}

fn flip_rows(values: &[f32], row_len: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(values.len());
    for row in values.chunks_exact(row_len).rev() {
        out.extend_from_slice(row);
    }
    out
}
