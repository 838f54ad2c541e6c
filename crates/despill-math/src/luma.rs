//! Luminance weighting standards.
//!
//! Collapses an RGB spill delta into the scalar spill amount that drives
//! respill and the output matte.
//!
//! | Mode | R | G | B |
//! |------|---|---|---|
//! | Rec709 | 0.2126 | 0.7152 | 0.0722 |
//! | Ccir601 | 0.299 | 0.587 | 0.114 |
//! | Rec2020 | 0.2627 | 0.6780 | 0.0593 |
//! | Average | 1/3 | 1/3 | 1/3 |
//! | Max | componentwise maximum | | |

use crate::{Color3, Color4};
use std::fmt;
use std::str::FromStr;

/// Rec.709 luma weights.
pub const REC709_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];
/// CCIR 601 luma weights.
pub const CCIR601_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];
/// Rec.2020 luma weights.
pub const REC2020_WEIGHTS: [f32; 3] = [0.2627, 0.6780, 0.0593];
const AVERAGE_WEIGHTS: [f32; 3] = [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0];

/// Luminance weighting standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LumaMode {
    /// ITU-R BT.709
    #[default]
    Rec709,
    /// CCIR 601 / BT.601
    Ccir601,
    /// ITU-R BT.2020
    Rec2020,
    /// Equal weights
    Average,
    /// Largest component
    Max,
}

impl LumaMode {
    /// Every mode, in declaration order.
    pub const ALL: [LumaMode; 5] = [
        LumaMode::Rec709,
        LumaMode::Ccir601,
        LumaMode::Rec2020,
        LumaMode::Average,
        LumaMode::Max,
    ];

    /// RGB weights, `None` for [`LumaMode::Max`].
    #[inline]
    pub const fn weights(self) -> Option<[f32; 3]> {
        match self {
            LumaMode::Rec709 => Some(REC709_WEIGHTS),
            LumaMode::Ccir601 => Some(CCIR601_WEIGHTS),
            LumaMode::Rec2020 => Some(REC2020_WEIGHTS),
            LumaMode::Average => Some(AVERAGE_WEIGHTS),
            LumaMode::Max => None,
        }
    }

    /// Lowercase name used in presets and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            LumaMode::Rec709 => "rec709",
            LumaMode::Ccir601 => "ccir601",
            LumaMode::Rec2020 => "rec2020",
            LumaMode::Average => "average",
            LumaMode::Max => "max",
        }
    }
}

impl fmt::Display for LumaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LumaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        LumaMode::ALL
            .into_iter()
            .find(|m| m.name() == lower)
            .ok_or_else(|| format!("unknown luma mode '{}' (expected rec709, ccir601, rec2020, average or max)", s))
    }
}

/// Luma of the RGB part of `spill`. The fourth slot is ignored.
#[inline]
pub fn luma(spill: Color4, mode: LumaMode) -> f32 {
    luma_rgb(spill.rgb(), mode)
}

/// Luma of an RGB triple.
#[inline]
pub fn luma_rgb(rgb: Color3, mode: LumaMode) -> f32 {
    match mode.weights() {
        Some(w) => rgb.x * w[0] + rgb.y * w[1] + rgb.z * w[2],
        None => rgb.max_element(),
    }
}
