//! PFM header codec.
//!
//! A PFM file starts with three ASCII lines:
//!
//! ```text
//! PF          <- "PF" = 3 channels, "Pf" = 1 channel
//! 640 480     <- width height
//! -1.0        <- scale; negative = little-endian, positive = big-endian
//! ```
//!
//! Exactly one whitespace byte follows the scale, then the raster starts.
//! Comment lines beginning with `#` are accepted between tokens.

use crate::{IoError, IoResult};
use std::io::{BufRead, Write};

/// Longest header token accepted before the file is rejected.
const MAX_TOKEN_LEN: usize = 64;

/// Channel layout, identified by the magic token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PfmKind {
    /// `PF`: three channels per pixel.
    Color,
    /// `Pf`: one channel per pixel.
    Grayscale,
}

impl PfmKind {
    /// Magic token for this layout.
    pub fn magic(self) -> &'static str {
        match self {
            Self::Color => "PF",
            Self::Grayscale => "Pf",
        }
    }

    /// Channels per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Color => 3,
            Self::Grayscale => 1,
        }
    }

    /// Layout for a channel count, if PFM supports it.
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            3 => Some(Self::Color),
            1 => Some(Self::Grayscale),
            _ => None,
        }
    }

    fn from_magic(token: &str) -> Option<Self> {
        match token {
            "PF" => Some(Self::Color),
            "Pf" => Some(Self::Grayscale),
            _ => None,
        }
    }
}

/// Byte order of the raster floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    /// Little-endian, written as a negative scale.
    #[default]
    Little,
    /// Big-endian, written as a positive scale.
    Big,
}

/// Parsed PFM header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PfmHeader {
    /// Channel layout.
    pub kind: PfmKind,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Signed scale factor as stored in the file.
    pub scale: f32,
}

impl PfmHeader {
    /// Header for a raster of the given shape and byte order, with unit scale.
    pub fn new(kind: PfmKind, width: u32, height: u32, endian: Endian) -> Self {
        let scale = match endian {
            Endian::Little => -1.0,
            Endian::Big => 1.0,
        };
        Self {
            kind,
            width,
            height,
            scale,
        }
    }

    /// Byte order implied by the sign of the scale.
    pub fn endian(&self) -> Endian {
        if self.scale < 0.0 {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    /// Number of `f32` values in the raster, saturating at `usize::MAX`.
    pub fn value_count(&self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(self.kind.channels())
    }

    /// Raster size in bytes, saturating at `usize::MAX`.
    pub fn data_len(&self) -> usize {
        self.checked_data_len().unwrap_or(usize::MAX)
    }

    /// Raster size in bytes, or `None` if it does not fit in `usize`.
    pub fn checked_data_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.kind.channels())?
            .checked_mul(std::mem::size_of::<f32>())
    }

    /// Parses a header, leaving `reader` positioned at the first raster byte.
    pub fn read<R: BufRead>(reader: &mut R) -> IoResult<Self> {
        let magic = read_token(reader, "magic")?;
        let kind = PfmKind::from_magic(&magic)
            .ok_or_else(|| IoError::InvalidFile(format!("PFM magic not found (got {magic:?})")))?;

        let width = parse_dimension(&read_token(reader, "width")?, "width")?;
        let height = parse_dimension(&read_token(reader, "height")?, "height")?;

        let scale_token = read_token(reader, "scale")?;
        let scale: f32 = scale_token
            .parse()
            .map_err(|_| IoError::InvalidFile(format!("invalid PFM scale {scale_token:?}")))?;
        if scale == 0.0 || !scale.is_finite() {
            return Err(IoError::InvalidFile(format!("invalid PFM scale {scale}")));
        }

        let header = Self {
            kind,
            width,
            height,
            scale,
        };
        if header.checked_data_len().is_none() {
            return Err(IoError::InvalidFile("PFM raster size overflows".into()));
        }
        Ok(header)
    }

    /// Writes the three header lines.
    pub fn write<W: Write>(&self, writer: &mut W) -> IoResult<()> {
        writeln!(writer, "{}", self.kind.magic())?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "{}", self.scale)?;
        Ok(())
    }
}

fn parse_dimension(token: &str, what: &str) -> IoResult<u32> {
    match token.parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(IoError::InvalidFile(format!("invalid PFM {what} {token:?}"))),
    }
}

fn next_byte<R: BufRead>(reader: &mut R) -> IoResult<Option<u8>> {
    let byte = match reader.fill_buf()?.first() {
        Some(&b) => b,
        None => return Ok(None),
    };
    reader.consume(1);
    Ok(Some(byte))
}

fn skip_comment<R: BufRead>(reader: &mut R) -> IoResult<()> {
    while let Some(b) = next_byte(reader)? {
        if b == b'\n' {
            break;
        }
    }
    Ok(())
}

/// Reads one whitespace-delimited token and consumes the single delimiter
/// byte after it.
fn read_token<R: BufRead>(reader: &mut R, what: &str) -> IoResult<String> {
    let mut token = Vec::new();
    while let Some(b) = next_byte(reader)? {
        match b {
            b'#' if token.is_empty() => skip_comment(reader)?,
            b if b.is_ascii_whitespace() => {
                if !token.is_empty() {
                    break;
                }
            }
            b => {
                token.push(b);
                if token.len() > MAX_TOKEN_LEN {
                    return Err(IoError::InvalidFile(format!("PFM {what} token too long")));
                }
            }
        }
    }

    if token.is_empty() {
        return Err(IoError::InvalidFile(format!("missing PFM {what}")));
    }
    String::from_utf8(token).map_err(|_| IoError::InvalidFile(format!("non-ASCII PFM {what}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn parse(bytes: &[u8]) -> IoResult<(PfmHeader, Vec<u8>)> {
        let mut cursor = Cursor::new(bytes);
        let header = PfmHeader::read(&mut cursor)?;
        let mut rest = Vec::new();
        cursor.read_to_end(&mut rest)?;
        Ok((header, rest))
    }

    #[test]
    fn parse_color_header() {
        let (header, rest) = parse(b"PF\n3 2\n-1.0\nXYZ").unwrap();
        assert_eq!(header.kind, PfmKind::Color);
        assert_eq!((header.width, header.height), (3, 2));
        assert_eq!(header.endian(), Endian::Little);
        assert_eq!(header.data_len(), 3 * 2 * 3 * 4);
        assert_eq!(rest, b"XYZ");
    }

    #[test]
    fn parse_grayscale_big_endian_crlf_and_comment() {
        let (header, rest) = parse(b"Pf\r\n# made by a renderer\r\n4 5\r\n2.5\n\x01").unwrap();
        assert_eq!(header.kind, PfmKind::Grayscale);
        assert_eq!((header.width, header.height), (4, 5));
        assert_eq!(header.scale, 2.5);
        assert_eq!(header.endian(), Endian::Big);
        assert_eq!(rest, [1u8]);
    }

    #[test]
    fn single_delimiter_after_scale() {
        // The raster may itself start with a whitespace byte.
        let (_, rest) = parse(b"Pf\n1 1\n-1\n\n\x00\x00\x00").unwrap();
        assert_eq!(rest, b"\n\x00\x00\x00");
    }

    #[test]
    fn rejects_bad_headers() {
        assert!(matches!(parse(b"P6\n1 1\n255\n"), Err(IoError::InvalidFile(_))));
        assert!(matches!(parse(b"PF\n0 1\n-1\n"), Err(IoError::InvalidFile(_))));
        assert!(matches!(parse(b"PF\n1 x\n-1\n"), Err(IoError::InvalidFile(_))));
        assert!(matches!(parse(b"PF\n1 1\n0\n"), Err(IoError::InvalidFile(_))));
        assert!(matches!(parse(b"PF\n1 1\ninf\n"), Err(IoError::InvalidFile(_))));
        assert!(matches!(parse(b"PF\n1 1\n"), Err(IoError::InvalidFile(_))));
        assert!(matches!(parse(b""), Err(IoError::InvalidFile(_))));
    }

    #[test]
    fn rejects_overflowing_raster_size() {
        let err = parse(b"PF\n4294967295 4294967295\n-1\n").unwrap_err();
        assert!(matches!(err, IoError::InvalidFile(_)));
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn huge_header_size_is_representable() {
        let (header, rest) = parse(b"Pf\n2147483647 1073741823\n-1\n").unwrap();
        assert_eq!(header.checked_data_len(), Some(2147483647 * 1073741823 * 4));
        assert!(rest.is_empty());
    }

    #[test]
    fn write_header_lines() {
        let mut out = Vec::new();
        PfmHeader::new(PfmKind::Grayscale, 7, 3, Endian::Little)
            .write(&mut out)
            .unwrap();
        assert_eq!(out, b"Pf\n7 3\n-1\n");

        out.clear();
        PfmHeader::new(PfmKind::Color, 1, 2, Endian::Big)
            .write(&mut out)
            .unwrap();
        assert_eq!(out, b"PF\n1 2\n1\n");
    }
}
