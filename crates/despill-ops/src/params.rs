//! Frame-level despill configuration.
//!
//! [`DespillParameters`] is built once per frame (from defaults, a YAML
//! preset and command-line overrides) and then frozen inside a
//! [`DespillSetup`](crate::DespillSetup). Every field has a default so
//! partial presets deserialize.
//!
//! ```rust
//! use despill_ops::{ColorSelect, DespillParameters};
//!
//! let params = DespillParameters {
//!     color: ColorSelect::Blue,
//!     hue_limit: 0.8,
//!     ..Default::default()
//! };
//! assert!(params.validate().is_ok());
//! ```

use crate::{OpsError, OpsResult};
use despill_math::{Color3, LumaMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Implements `ALL`, `name()`, `Display` and `FromStr` for a unit enum.
macro_rules! named_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Lowercase name used in presets and on the command line.
            pub const fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.to_ascii_lowercase();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name() == lower)
                    .ok_or_else(|| {
                        let names: Vec<&str> = $ty::ALL.iter().map(|v| v.name()).collect();
                        format!("unknown value '{}' (expected one of: {})", s, names.join(", "))
                    })
            }
        }
    };
}

/// Where the despill color comes from when no color input is connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSelect {
    /// Suppress the red channel
    Red,
    /// Suppress the green channel
    Green,
    /// Suppress the blue channel
    Blue,
    /// Use [`DespillParameters::pick`]
    #[default]
    Pick,
}

named_enum!(ColorSelect { Red => "red", Green => "green", Blue => "blue", Pick => "pick" });

/// How the two non-target channels combine into the spill limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DespillMath {
    /// Mean of the two
    #[default]
    Average,
    /// Larger of the two
    Max,
    /// Smaller of the two
    Min,
    /// Weighted blend controlled by `custom_weight`
    Custom,
}

named_enum!(DespillMath { Average => "average", Max => "max", Min => "min", Custom => "custom" });

/// A channel slot of an RGBA image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelSlot {
    /// Channel 0
    Red,
    /// Channel 1
    Green,
    /// Channel 2
    Blue,
    /// Channel 3
    #[default]
    Alpha,
}

named_enum!(ChannelSlot { Red => "red", Green => "green", Blue => "blue", Alpha => "alpha" });

impl ChannelSlot {
    /// Interleaved channel index.
    #[inline]
    pub const fn index(self) -> u32 {
        match self {
            ChannelSlot::Red => 0,
            ChannelSlot::Green => 1,
            ChannelSlot::Blue => 2,
            ChannelSlot::Alpha => 3,
        }
    }
}

/// What the RGB channels receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// Despilled image with respill
    #[default]
    Despill,
    /// The extracted spill itself
    Spill,
}

named_enum!(OutputType { Despill => "despill", Spill => "spill" });

/// Despill configuration for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DespillParameters {
    /// Despill color source.
    pub color: ColorSelect,
    /// Picked spill color, used with [`ColorSelect::Pick`]. Gray disables.
    pub pick: Color3,
    /// Normalize spill against the despill color's own response.
    pub absolute_mode: bool,
    /// Limit combination of the non-target channels.
    pub despill_math: DespillMath,
    /// Blend weight for [`DespillMath::Custom`], -1..1.
    pub custom_weight: f32,
    /// Hue fine-tune in degrees.
    pub hue_offset: f32,
    /// Despill strength, 0..2.
    pub hue_limit: f32,
    /// Use `1 - mask` for the limit input.
    pub invert_limit_mask: bool,
    /// Channel of the limit input to read.
    pub limit_channel: ChannelSlot,
    /// Enable tone protection.
    pub protect_tones: bool,
    /// Show the protection matte instead of the result.
    pub protect_preview: bool,
    /// Tone to protect. Gray disables protection.
    pub protect_color: Color3,
    /// Protection tolerance, 0..1.
    pub protect_tolerance: f32,
    /// Protection falloff exponent base, 0..4.
    pub protect_falloff: f32,
    /// Protection strength, 0..10.
    pub protect_effect: f32,
    /// Luma weighting of the spill amount.
    pub respill_math: LumaMode,
    /// Color added back where spill was removed.
    pub respill_color: Color3,
    /// Spill luma mapped to 0.
    pub black_point: f32,
    /// Spill luma mapped to 1.
    pub white_point: f32,
    /// Despilled image or raw spill.
    pub output_type: OutputType,
    /// Write the spill amount to `output_channel`.
    pub output_alpha: bool,
    /// Write `1 - spill` instead.
    pub invert_alpha: bool,
    /// Destination of the spill amount.
    pub output_channel: ChannelSlot,
}

impl Default for DespillParameters {
    fn default() -> Self {
        Self {
            color: ColorSelect::Pick,
            pick: Color3::GREEN,
            absolute_mode: false,
            despill_math: DespillMath::Average,
            custom_weight: 0.0,
            hue_offset: 0.0,
            hue_limit: 1.0,
            invert_limit_mask: false,
            limit_channel: ChannelSlot::Alpha,
            protect_tones: false,
            protect_preview: false,
            protect_color: Color3::ZERO,
            protect_tolerance: 0.2,
            protect_falloff: 2.0,
            protect_effect: 1.0,
            respill_math: LumaMode::Rec709,
            respill_color: Color3::ONE,
            black_point: 0.0,
            white_point: 1.0,
            output_type: OutputType::Despill,
            output_alpha: false,
            invert_alpha: false,
            output_channel: ChannelSlot::Alpha,
        }
    }
}

impl DespillParameters {
    /// Green screen: manual green channel, average limit.
    pub fn green_screen() -> Self {
        Self {
            color: ColorSelect::Green,
            ..Default::default()
        }
    }

    /// Blue screen: manual blue channel, average limit.
    pub fn blue_screen() -> Self {
        Self {
            color: ColorSelect::Blue,
            ..Default::default()
        }
    }

    /// Looks up a named preset (`green`, `blue`, `default`).
    pub fn named(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "green" | "green-screen" => Some(Self::green_screen()),
            "blue" | "blue-screen" => Some(Self::blue_screen()),
            "default" => Some(Self::default()),
            _ => None,
        }
    }

    /// Rejects values the pipeline is not defined for.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> OpsResult<()> {
        let scalars = [
            ("custom_weight", self.custom_weight),
            ("hue_offset", self.hue_offset),
            ("hue_limit", self.hue_limit),
            ("protect_tolerance", self.protect_tolerance),
            ("protect_falloff", self.protect_falloff),
            ("protect_effect", self.protect_effect),
            ("black_point", self.black_point),
            ("white_point", self.white_point),
        ];
        for (name, v) in scalars {
            if !v.is_finite() {
                return Err(OpsError::invalid(name, format!("must be finite, got {}", v)));
            }
        }
        let colors = [
            ("pick", self.pick),
            ("protect_color", self.protect_color),
            ("respill_color", self.respill_color),
        ];
        for (name, c) in colors {
            if !c.is_finite() {
                return Err(OpsError::invalid(name, "components must be finite"));
            }
        }

        if !(-1.0..=1.0).contains(&self.custom_weight) {
            return Err(OpsError::invalid(
                "custom_weight",
                format!("must be in -1..1, got {}", self.custom_weight),
            ));
        }
        if self.hue_limit < 0.0 {
            return Err(OpsError::invalid(
                "hue_limit",
                format!("must be >= 0, got {}", self.hue_limit),
            ));
        }
        if !(0.0..=1.0).contains(&self.protect_tolerance) {
            return Err(OpsError::invalid(
                "protect_tolerance",
                format!("must be in 0..1, got {}", self.protect_tolerance),
            ));
        }
        if self.protect_falloff < 0.0 {
            return Err(OpsError::invalid(
                "protect_falloff",
                format!("must be >= 0, got {}", self.protect_falloff),
            ));
        }
        if self.protect_effect < 0.0 {
            return Err(OpsError::invalid(
                "protect_effect",
                format!("must be >= 0, got {}", self.protect_effect),
            ));
        }
        Ok(())
    }
}
