//! Whole-image despill.
//!
//! [`DespillSources`] bundles the source and the optional limit, color and
//! respill images. [`process_image`] checks them against a
//! [`DespillSetup`], copies the source and runs the pipeline on every pixel
//! of the region, one row at a time. The parallel
//! [`RowDriver`](crate::parallel::RowDriver) reuses the same row kernel.
//!
//! Auxiliary images may differ in size from the source; they are sampled at
//! the same coordinates with edge clamping.

use crate::{ConnectedInputs, DespillSetup, OpsError, OpsResult, PixelInput};
use despill_core::{Error, ImageBuf, Rect};
use despill_math::Color3;
use tracing::trace;

/// Images consumed by one despill run.
#[derive(Debug, Clone, Copy)]
pub struct DespillSources<'a> {
    /// Image to despill, RGB or RGBA
    pub source: &'a ImageBuf,
    /// Limit mask
    pub limit: Option<&'a ImageBuf>,
    /// Per-pixel despill color
    pub color: Option<&'a ImageBuf>,
    /// Per-pixel respill color
    pub respill: Option<&'a ImageBuf>,
}

impl<'a> DespillSources<'a> {
    /// Source only.
    pub fn new(source: &'a ImageBuf) -> Self {
        Self {
            source,
            limit: None,
            color: None,
            respill: None,
        }
    }

    /// Adds a limit mask.
    pub fn with_limit(mut self, limit: &'a ImageBuf) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Adds a despill color image.
    pub fn with_color(mut self, color: &'a ImageBuf) -> Self {
        self.color = Some(color);
        self
    }

    /// Adds a respill color image.
    pub fn with_respill(mut self, respill: &'a ImageBuf) -> Self {
        self.respill = Some(respill);
        self
    }

    /// Which optional inputs are present.
    pub fn connected(&self) -> ConnectedInputs {
        ConnectedInputs {
            limit: self.limit.is_some(),
            color: self.color.is_some(),
            respill: self.respill.is_some(),
        }
    }
}

/// Validated run state shared by every row.
pub(crate) struct RowKernel<'a> {
    setup: &'a DespillSetup,
    sources: DespillSources<'a>,
    region: Rect,
    channels: usize,
    limit_channel: u32,
    output_channel: usize,
}

fn require_channels(input: &'static str, img: &ImageBuf, expected: u32) -> OpsResult<()> {
    if img.channels() < expected {
        return Err(OpsError::ChannelMismatch {
            input,
            expected,
            got: img.channels(),
        });
    }
    Ok(())
}

impl<'a> RowKernel<'a> {
    /// Checks the inputs and allocates the output (a copy of the source,
    /// widened when the matte goes to a channel the source lacks).
    pub(crate) fn prepare(
        setup: &'a DespillSetup,
        sources: DespillSources<'a>,
        region: Option<Rect>,
    ) -> OpsResult<(Self, ImageBuf)> {
        let params = setup.params();
        let src = sources.source;

        if sources.connected() != setup.connected() {
            return Err(OpsError::InputMismatch(format!(
                "setup expects {:?}, got {:?}",
                setup.connected(),
                sources.connected()
            )));
        }
        require_channels("source", src, 3)?;
        if let Some(limit) = sources.limit {
            require_channels("limit", limit, params.limit_channel.index() + 1)?;
        }
        if let Some(color) = sources.color {
            require_channels("color", color, 3)?;
        }
        if let Some(respill) = sources.respill {
            require_channels("respill", respill, 3)?;
        }

        let frame = src.rect();
        let region = match region {
            None => frame,
            Some(r) => r
                .intersect(&frame)
                .ok_or_else(|| Error::invalid_region(r, src.width(), src.height()))?,
        };

        let output_channel = params.output_channel.index();
        let channels = if params.output_alpha && !setup.is_bypass() {
            src.channels().max(output_channel + 1)
        } else {
            src.channels()
        };
        let output = src.with_channels(channels, 1.0)?;

        trace!(
            width = src.width(),
            height = src.height(),
            channels,
            %region,
            "despill prepared"
        );

        Ok((
            Self {
                setup,
                sources,
                region,
                channels: channels as usize,
                limit_channel: params.limit_channel.index(),
                output_channel: output_channel as usize,
            },
            output,
        ))
    }

    /// Processes row `y` of the output in place.
    pub(crate) fn process_row(&self, y: u32, row: &mut [f32]) {
        if y < self.region.y || y >= self.region.bottom() {
            return;
        }
        let yi = y as i64;
        for x in self.region.x..self.region.right() {
            let xi = x as i64;
            let start = x as usize * self.channels;
            let px = &mut row[start..start + self.channels];

            let input = PixelInput {
                rgb: Color3::new(px[0], px[1], px[2]),
                limit: self
                    .sources
                    .limit
                    .and_then(|img| img.sample_clamped(xi, yi, self.limit_channel)),
                color: self.sources.color.and_then(|img| sample_rgb(img, xi, yi)),
                respill: self.sources.respill.and_then(|img| sample_rgb(img, xi, yi)),
            };

            let out = self.setup.process(&input);
            px[..3].copy_from_slice(&out.rgb.to_array());
            if let Some(m) = out.matte {
                px[self.output_channel] = m;
            }
        }
    }
}

#[inline]
fn sample_rgb(img: &ImageBuf, x: i64, y: i64) -> Option<Color3> {
    Some(Color3::new(
        img.sample_clamped(x, y, 0)?,
        img.sample_clamped(x, y, 1)?,
        img.sample_clamped(x, y, 2)?,
    ))
}

/// Despills `sources` on the calling thread.
///
/// Pixels outside `region` (or the whole image on bypass) are copied
/// unchanged.
///
/// # Errors
///
/// - [`OpsError::ChannelMismatch`] when an input lacks a channel it is read from
/// - [`OpsError::InputMismatch`] when `sources` does not match the setup
/// - [`OpsError::Core`] for a region outside the source
pub fn process_image(
    setup: &DespillSetup,
    sources: DespillSources<'_>,
    region: Option<Rect>,
) -> OpsResult<ImageBuf> {
    let (kernel, mut output) = RowKernel::prepare(setup, sources, region)?;
    if setup.is_bypass() {
        return Ok(output);
    }
    for (y, row) in output.rows_mut().enumerate() {
        kernel.process_row(y as u32, row);
    }
    Ok(output)
}
