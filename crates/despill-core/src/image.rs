//! Interleaved `f32` image buffer.
//!
//! [`ImageBuf`] is the only pixel container of the workspace. Readers in
//! `despill-io` decode into it, the row driver in `despill-ops` splits it
//! into rows for parallel processing.
//!
//! # Memory Layout
//!
//! Pixels are stored **row-major**, top-to-bottom, channels interleaved:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//! ```
//!
//! There is no row padding: row `y` starts at `y * width * channels`.

use crate::{Error, Rect, Result};

/// Owned interleaved `f32` image.
///
/// Invariant: `data.len() == width * height * channels`, all three non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuf {
    width: u32,
    height: u32,
    channels: u32,
    data: Vec<f32>,
}

impl ImageBuf {
    /// Creates a zero-filled image.
    ///
    /// # Panics
    ///
    /// Panics if any dimension is zero.
    pub fn new(width: u32, height: u32, channels: u32) -> Self {
        assert!(
            width > 0 && height > 0 && channels > 0,
            "ImageBuf dimensions must be non-zero"
        );
        let len = width as usize * height as usize * channels as usize;
        Self {
            width,
            height,
            channels,
            data: vec![0.0; len],
        }
    }

    /// Creates an image with every pixel set to `value`.
    ///
    /// `value.len()` becomes the channel count.
    pub fn filled(width: u32, height: u32, value: &[f32]) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::invalid_dimensions(width, height, "zero channels"));
        }
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * value.len());
        for _ in 0..pixels {
            data.extend_from_slice(value);
        }
        Self::from_data(width, height, value.len() as u32, data)
    }

    /// Wraps existing samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for zero dimensions or a length
    /// that does not match `width * height * channels`.
    pub fn from_data(width: u32, height: u32, channels: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("{} channels; all dimensions must be > 0", channels),
            ));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(channels as usize))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "size overflow"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channels per pixel.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// `(width, height)`.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Full-frame rectangle.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Number of samples in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// All samples.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// All samples, mutable.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }

    /// Channels of pixel (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[f32] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = self.offset(x, y);
        &self.data[i..i + self.channels as usize]
    }

    /// Mutable channels of pixel (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the image.
    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [f32] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = self.offset(x, y);
        let n = self.channels as usize;
        &mut self.data[i..i + n]
    }

    /// Sample with coordinates clamped to the image edge.
    ///
    /// Used to read auxiliary inputs whose extent differs from the source.
    /// Returns `None` only when `c` is not a channel of this image.
    #[inline]
    pub fn sample_clamped(&self, x: i64, y: i64, c: u32) -> Option<f32> {
        if c >= self.channels {
            return None;
        }
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        Some(self.data[self.offset(cx, cy) + c as usize])
    }

    /// Samples of row `y`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        let n = self.row_len();
        let start = y as usize * n;
        &self.data[start..start + n]
    }

    /// Iterator over mutable rows, top to bottom.
    #[inline]
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, f32> {
        let n = self.row_len();
        self.data.chunks_exact_mut(n)
    }

    /// Copy with a different channel count.
    ///
    /// Existing channels are kept up to `channels`; new ones are set to
    /// `fill`.
    pub fn with_channels(&self, channels: u32, fill: f32) -> Result<Self> {
        if channels == self.channels {
            return Ok(self.clone());
        }
        if channels == 0 {
            return Err(Error::invalid_dimensions(self.width, self.height, "zero channels"));
        }
        let src_n = self.channels as usize;
        let dst_n = channels as usize;
        let keep = src_n.min(dst_n);
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize * dst_n);
        for px in self.data.chunks_exact(src_n) {
            data.extend_from_slice(&px[..keep]);
            data.extend(std::iter::repeat_n(fill, dst_n - keep));
        }
        Self::from_data(self.width, self.height, channels, data)
    }
}
