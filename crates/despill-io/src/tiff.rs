//! TIFF format support.
//!
//! Reads 8/16-bit integer and 32-bit float gray, gray+alpha, RGB and RGBA.
//! Writes 16-bit LZW by default, or uncompressed 32-bit float to keep
//! values outside [0, 1].
//!
//! # Example
//!
//! ```rust,ignore
//! use despill_io::tiff;
//!
//! let plate = tiff::read("plate.tif")?;
//! tiff::write("despilled.tif", &plate, true)?;
//! ```

use crate::{to_image, to_u16, IoError, IoResult};
use despill_core::ImageBuf;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

fn decode_err(e: tiff::TiffError) -> IoError {
    IoError::DecodeError(e.to_string())
}

fn encode_err(e: tiff::TiffError) -> IoError {
    IoError::EncodeError(e.to_string())
}

/// Reads a TIFF file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageBuf> {
    use tiff::decoder::{Decoder, DecodingResult};
    use tiff::ColorType;

    let file = File::open(path.as_ref())?;
    let mut decoder = Decoder::new(BufReader::new(file)).map_err(decode_err)?;

    let (width, height) = decoder.dimensions().map_err(decode_err)?;
    let color_type = decoder.colortype().map_err(decode_err)?;

    let channels = match color_type {
        ColorType::Gray(_) => 1,
        ColorType::GrayA(_) => 2,
        ColorType::RGB(_) => 3,
        ColorType::RGBA(_) => 4,
        ct => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "unsupported TIFF color type: {:?}",
                ct
            )));
        }
    };

    let data: Vec<f32> = match decoder.read_image().map_err(decode_err)? {
        DecodingResult::U8(buf) => buf.iter().map(|&v| v as f32 / 255.0).collect(),
        DecodingResult::U16(buf) => buf.iter().map(|&v| v as f32 / 65535.0).collect(),
        DecodingResult::F32(buf) => buf,
        _ => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "unsupported TIFF sample type for {:?}",
                color_type
            )));
        }
    };

    to_image(width, height, channels, data)
}

/// Writes a TIFF file.
///
/// `float` selects 32-bit float samples; otherwise samples are clamped and
/// written as 16-bit with LZW compression.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageBuf, float: bool) -> IoResult<()> {
    use tiff::encoder::{colortype, compression, TiffEncoder};

    let (width, height) = image.size();
    let channels = image.channels();
    if !matches!(channels, 1 | 3 | 4) {
        return Err(IoError::EncodeError(format!(
            "unsupported channel count: {}",
            channels
        )));
    }

    let file = File::create(path.as_ref())?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file)).map_err(encode_err)?;

    if float {
        let data = image.data();
        match channels {
            1 => encoder.write_image::<colortype::Gray32Float>(width, height, data),
            3 => encoder.write_image::<colortype::RGB32Float>(width, height, data),
            _ => encoder.write_image::<colortype::RGBA32Float>(width, height, data),
        }
        .map_err(encode_err)?;
    } else {
        let data: Vec<u16> = image.data().iter().map(|&v| to_u16(v)).collect();
        match channels {
            1 => encoder.write_image_with_compression::<colortype::Gray16, compression::Lzw>(
                width,
                height,
                compression::Lzw,
                &data,
            ),
            3 => encoder.write_image_with_compression::<colortype::RGB16, compression::Lzw>(
                width,
                height,
                compression::Lzw,
                &data,
            ),
            _ => encoder.write_image_with_compression::<colortype::RGBA16, compression::Lzw>(
                width,
                height,
                compression::Lzw,
                &data,
            ),
        }
        .map_err(encode_err)?;
    }

    Ok(())
}
