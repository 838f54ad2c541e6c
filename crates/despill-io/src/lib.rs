//! # despill-io
//!
//! Image I/O for the despill tools.
//!
//! Files are decoded straight into a [`despill_core::ImageBuf`] of `f32`
//! samples:
//!
//! - **PNG** - 8/16-bit gray, gray+alpha, RGB, RGBA (palette and low bit
//!   depths are expanded); written as 16-bit
//! - **TIFF** - 8/16-bit integer and 32-bit float gray, gray+alpha, RGB,
//!   RGBA; written as 16-bit with LZW, or 32-bit float
//!
//! Integer samples are normalized to [0, 1]. Gray files come back as RGB
//! (gray+alpha as RGBA) so every buffer carries at least three color
//! channels.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use despill_io::{read, write};
//!
//! let plate = read("plate.png")?;
//! write("plate.tif", &plate)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod png;
pub mod tiff;

pub use error::{IoError, IoResult};

use despill_core::ImageBuf;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::trace;

/// Supported container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Portable Network Graphics
    Png,
    /// Tagged Image File Format
    Tiff,
}

impl Format {
    /// Format from the file extension (`png`, `tif`, `tiff`, any case).
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("png") => Some(Format::Png),
            Some("tif") | Some("tiff") => Some(Format::Tiff),
            _ => None,
        }
    }

    /// Format from the first bytes of a file.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        if bytes.starts_with(&PNG_MAGIC) {
            return Some(Format::Png);
        }
        // II*\0 little-endian, MM\0* big-endian
        if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A]) {
            return Some(Format::Tiff);
        }
        None
    }

    /// Magic bytes first, extension as fallback.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let mut header = [0u8; 8];
        let n = File::open(path)?.read(&mut header)?;
        Self::from_bytes(&header[..n])
            .or_else(|| Self::from_extension(path))
            .ok_or_else(|| IoError::UnsupportedFormat(path.display().to_string()))
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Tiff => "tif",
        }
    }
}

/// Options for [`write_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// Write 32-bit float samples where the format allows it (TIFF).
    pub float: bool,
}

/// Reads a PNG or TIFF file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageBuf> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    trace!(path = %path.display(), ?format, "read");
    match format {
        Format::Png => png::read(path),
        Format::Tiff => tiff::read(path),
    }
}

/// Writes with default options, format chosen by extension.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageBuf) -> IoResult<()> {
    write_with(path, image, &WriteOptions::default())
}

/// Writes an image, format chosen by extension.
pub fn write_with<P: AsRef<Path>>(path: P, image: &ImageBuf, options: &WriteOptions) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path)
        .ok_or_else(|| IoError::UnsupportedFormat(path.display().to_string()))?;
    trace!(path = %path.display(), ?format, float = options.float, "write");
    match format {
        Format::Png => {
            if options.float {
                tracing::warn!("PNG has no float samples, writing 16-bit");
            }
            png::write(path, image)
        }
        Format::Tiff => tiff::write(path, image, options.float),
    }
}

/// Builds a buffer from decoded samples, expanding gray to RGB and
/// gray+alpha to RGBA.
pub(crate) fn to_image(width: u32, height: u32, channels: u32, data: Vec<f32>) -> IoResult<ImageBuf> {
    let (channels, data) = match channels {
        1 => (3, data.iter().flat_map(|&g| [g, g, g]).collect()),
        2 => (
            4,
            data.chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect(),
        ),
        n => (n, data),
    };
    Ok(ImageBuf::from_data(width, height, channels, data)?)
}

/// Quantizes [0, 1] samples to 16-bit.
#[inline]
pub(crate) fn to_u16(v: f32) -> u16 {
    (v.clamp(0.0, 1.0) * 65535.0).round() as u16
}
