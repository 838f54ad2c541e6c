//! Frame setup and per-pixel despill pipeline.
//!
//! [`DespillSetup`] validates [`DespillParameters`] once, resolves where the
//! despill color comes from and freezes everything that does not vary per
//! pixel. [`DespillSetup::process`] is then a pure function of one
//! [`PixelInput`], safe to call from any number of threads.
//!
//! # Pixel flow
//!
//! ```text
//! rgb ──> color / hue shift ──> despill ──> spill = (rgb,1) - despilled
//!                                  │              │
//!                          preview matte     relative / absolute
//!                                                 │
//!                               respill ──> output type ──> matte
//! ```
//!
//! # Example
//!
//! ```rust
//! use despill_math::Color3;
//! use despill_ops::{
//!     ColorSelect, ConnectedInputs, DespillMath, DespillParameters, DespillSetup, PixelInput,
//! };
//!
//! let params = DespillParameters {
//!     color: ColorSelect::Green,
//!     despill_math: DespillMath::Max,
//!     output_alpha: true,
//!     ..Default::default()
//! };
//! let setup = DespillSetup::new(params, ConnectedInputs::default()).unwrap();
//! let out = setup.process(&PixelInput::new(Color3::new(0.1, 0.9, 0.1)));
//! assert!((out.rgb.y - 0.672).abs() < 1e-3);
//! assert!((out.matte.unwrap() - 0.572).abs() < 1e-3);
//! ```

use crate::despill::{despill, ChannelSelector, ToneProtect};
use crate::{ColorSelect, DespillParameters, OpsResult, OutputType};
use despill_math::{hue_shift_to_red, luma, remap_clamped, saturate, Color3, Color4};
use tracing::{debug, trace};

/// Which optional inputs are wired for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectedInputs {
    /// Limit mask
    pub limit: bool,
    /// Per-pixel despill color
    pub color: bool,
    /// Per-pixel respill color
    pub respill: bool,
}

/// Provenance of the despill color for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorMode {
    /// One-hot channel, hue shift is the user offset.
    Manual(ChannelSelector),
    /// Static picked color aligned with red.
    Picked(Color3),
    /// Color read from the color input at every pixel.
    ImageDriven,
}

/// Samples of one pixel handed to [`DespillSetup::process`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelInput {
    /// Source color
    pub rgb: Color3,
    /// Limit mask sample, if connected
    pub limit: Option<f32>,
    /// Despill color sample, if connected
    pub color: Option<Color3>,
    /// Respill color sample, if connected
    pub respill: Option<Color3>,
}

impl PixelInput {
    /// Source color with no auxiliary samples.
    #[inline]
    pub fn new(rgb: Color3) -> Self {
        Self {
            rgb,
            ..Default::default()
        }
    }
}

/// Result of one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelOutput {
    /// Color to write, clamped to [0, 1]
    pub rgb: Color3,
    /// Value for the output channel; `None` leaves it as it was
    pub matte: Option<f32>,
}

impl PixelOutput {
    #[inline]
    fn passthrough(rgb: Color3) -> Self {
        Self { rgb, matte: None }
    }
}

/// Frozen per-frame despill state.
#[derive(Debug, Clone)]
pub struct DespillSetup {
    params: DespillParameters,
    connected: ConnectedInputs,
    mode: Option<ColorMode>,
    hue_shift: f32,
    protect: ToneProtect,
}

impl DespillSetup {
    /// Validates `params` and resolves the color mode.
    ///
    /// A connected color input always wins. Without one, a gray pick
    /// resolves to bypass.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`](crate::OpsError::InvalidParameter)
    /// from [`DespillParameters::validate`].
    pub fn new(params: DespillParameters, connected: ConnectedInputs) -> OpsResult<Self> {
        trace!(color = %params.color, ?connected, "DespillSetup::new");
        params.validate()?;

        let mode = if connected.color {
            Some(ColorMode::ImageDriven)
        } else {
            match params.color {
                ColorSelect::Red => Some(ColorMode::Manual(ChannelSelector::Red)),
                ColorSelect::Green => Some(ColorMode::Manual(ChannelSelector::Green)),
                ColorSelect::Blue => Some(ColorMode::Manual(ChannelSelector::Blue)),
                ColorSelect::Pick if params.pick.is_gray() => None,
                ColorSelect::Pick => Some(ColorMode::Picked(params.pick)),
            }
        };

        let hue_shift = match mode {
            Some(ColorMode::Picked(c)) => hue_shift_to_red(c, params.hue_offset),
            _ => params.hue_offset,
        };

        let protect = ToneProtect {
            enabled: params.protect_tones,
            color: params.protect_color,
            tolerance: params.protect_tolerance,
            effect: params.protect_effect,
            falloff: params.protect_falloff,
        };

        match mode {
            Some(m) => debug!(mode = ?m, hue_shift, protect = protect.is_active(), "despill resolved"),
            None => debug!("gray pick and no color input, bypassing"),
        }

        Ok(Self {
            params,
            connected,
            mode,
            hue_shift,
            protect,
        })
    }

    /// `true` when every pixel passes through unchanged.
    #[inline]
    pub fn is_bypass(&self) -> bool {
        self.mode.is_none()
    }

    /// Resolved color mode, `None` on bypass.
    #[inline]
    pub fn mode(&self) -> Option<ColorMode> {
        self.mode
    }

    /// Frame hue shift in degrees. Image-driven frames compute it per pixel.
    #[inline]
    pub fn hue_shift(&self) -> f32 {
        self.hue_shift
    }

    /// Parameters this setup was built from.
    #[inline]
    pub fn params(&self) -> &DespillParameters {
        &self.params
    }

    /// Optional inputs this setup expects.
    #[inline]
    pub fn connected(&self) -> ConnectedInputs {
        self.connected
    }

    /// Despill color, hue shift and target channel for one pixel.
    ///
    /// A gray or missing driving color has a zero hue angle, so only the
    /// hue offset applies.
    #[inline]
    fn resolve_color(&self, mode: ColorMode, sample: Option<Color3>) -> (Color3, f32, ChannelSelector) {
        match mode {
            ColorMode::Manual(ch) => (ch.unit(), self.hue_shift, ch),
            ColorMode::Picked(c) => (c, self.hue_shift, ChannelSelector::Red),
            ColorMode::ImageDriven => {
                let c = sample.unwrap_or(Color3::ZERO);
                (c, hue_shift_to_red(c, self.params.hue_offset), ChannelSelector::Red)
            }
        }
    }

    #[inline]
    fn resolve_limit(&self, mask: Option<f32>) -> f32 {
        let p = &self.params;
        match mask {
            Some(m) if self.connected.limit => {
                p.hue_limit * if p.invert_limit_mask { 1.0 - m } else { m }
            }
            _ => p.hue_limit,
        }
    }

    #[inline]
    fn despill_with(&self, rgb: Color3, hue_shift: f32, target: ChannelSelector, limit: f32) -> Color4 {
        despill(
            rgb,
            hue_shift,
            target,
            self.params.despill_math,
            limit,
            self.params.custom_weight,
            &self.protect,
        )
    }

    /// Runs the full pipeline on one pixel.
    pub fn process(&self, input: &PixelInput) -> PixelOutput {
        let Some(mode) = self.mode else {
            return PixelOutput::passthrough(input.rgb);
        };
        let (despill_color, hue_shift, target) = self.resolve_color(mode, input.color);
        let p = &self.params;
        let rgb = input.rgb;
        let limit = self.resolve_limit(input.limit);

        let despilled = self.despill_with(rgb, hue_shift, target, limit);

        if p.protect_tones && p.protect_preview {
            let k = saturate(despilled.w * p.protect_effect);
            return PixelOutput::passthrough((rgb * k).clamp01());
        }

        let spill = Color4::from_rgb(rgb, 1.0) - despilled;
        let spill_luma = luma(spill, p.respill_math);

        let (spill_luma_full, spill_full, despilled_full) = if p.absolute_mode {
            let reference = self.despill_with(despill_color, hue_shift, target, limit);
            let ref_luma = luma(Color4::from_rgb(despill_color, 1.0) - reference, p.respill_math);
            let full = normalize_spill(spill_luma, ref_luma);
            let spill_full = despill_color * full;
            (full, spill_full, rgb - spill_full)
        } else {
            (spill_luma, spill.rgb(), despilled.rgb())
        };

        let rgb_out = match p.output_type {
            OutputType::Despill => {
                let respill = match input.respill {
                    Some(c) if self.connected.respill => c * p.respill_color,
                    _ => p.respill_color,
                };
                despilled_full + respill * remap_clamped(spill_luma_full, p.black_point, p.white_point)
            }
            OutputType::Spill => spill_full,
        };

        let matte = p.output_alpha.then(|| {
            saturate(if p.invert_alpha { 1.0 - spill_luma_full } else { spill_luma_full })
        });

        PixelOutput {
            rgb: rgb_out.clamp01(),
            matte,
        }
    }
}

/// Spill amount relative to the despill color's own response, 0 when that
/// response is zero.
#[inline]
fn normalize_spill(spill_luma: f32, ref_luma: f32) -> f32 {
    if ref_luma == 0.0 { 0.0 } else { spill_luma / ref_luma }
}
