//! Per-pixel despill core.
//!
//! [`despill`] suppresses one channel of a color after rotating it into a
//! hue space where the spill lies on that channel:
//!
//! 1. rotate `rgb` by `hue_shift` around gray
//! 2. combine the two other channels into a limit scalar ([`DespillMath`])
//! 3. inflate the limit near the protected tone ([`ToneProtect`])
//! 4. clamp the target channel to `limit_result * limit`
//! 5. rotate back by `-hue_shift`
//!
//! The function is total over finite inputs and keeps no state.
//!
//! ```rust
//! use despill_math::Color3;
//! use despill_ops::despill::{despill, ChannelSelector, ToneProtect};
//! use despill_ops::DespillMath;
//!
//! let out = despill(
//!     Color3::new(0.2, 0.8, 0.2),
//!     0.0,
//!     ChannelSelector::Green,
//!     DespillMath::Average,
//!     1.0,
//!     0.0,
//!     &ToneProtect::DISABLED,
//! );
//! assert!((out.y - 0.2).abs() < 1e-6);
//! assert_eq!(out.w, 0.0);
//! ```

use crate::DespillMath;
use despill_math::{cos_angle_between, hue_rotate, Color3, Color4};

/// The RGB channel being suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelSelector {
    /// Channel 0
    Red,
    /// Channel 1
    Green,
    /// Channel 2
    Blue,
}

impl ChannelSelector {
    /// Index of this channel in a [`Color3`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            ChannelSelector::Red => 0,
            ChannelSelector::Green => 1,
            ChannelSelector::Blue => 2,
        }
    }

    /// The two other channel indices, ascending.
    #[inline]
    pub const fn others(self) -> [usize; 2] {
        match self {
            ChannelSelector::Red => [1, 2],
            ChannelSelector::Green => [0, 2],
            ChannelSelector::Blue => [0, 1],
        }
    }

    /// One-hot color for this channel.
    #[inline]
    pub const fn unit(self) -> Color3 {
        match self {
            ChannelSelector::Red => Color3::RED,
            ChannelSelector::Green => Color3::GREEN,
            ChannelSelector::Blue => Color3::BLUE,
        }
    }
}

impl DespillMath {
    /// Combines the two non-target channel values into the limit scalar.
    ///
    /// `custom_weight` in -1..1 maps to a blend weight in 0..1 and is only
    /// read by [`DespillMath::Custom`].
    #[inline]
    pub fn combine(self, a: f32, b: f32, custom_weight: f32) -> f32 {
        match self {
            DespillMath::Average => (a + b) * 0.5,
            DespillMath::Max => a.max(b),
            DespillMath::Min => a.min(b),
            DespillMath::Custom => {
                let w = (custom_weight + 1.0) * 0.5;
                a * w + b * (1.0 - w)
            }
        }
    }
}

/// Tone protection settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneProtect {
    /// Protection toggle
    pub enabled: bool,
    /// Protected tone; gray means none
    pub color: Color3,
    /// 0..1
    pub tolerance: f32,
    /// Limit inflation strength
    pub effect: f32,
    /// Exponent base of the falloff curve
    pub falloff: f32,
}

impl ToneProtect {
    /// Protection switched off.
    pub const DISABLED: Self = Self {
        enabled: false,
        color: Color3::ZERO,
        tolerance: 0.2,
        effect: 1.0,
        falloff: 2.0,
    };

    /// Enabled with a non-gray color.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.enabled && !self.color.is_gray()
    }

    /// Protection factor of `rgb`, in 0..1.
    ///
    /// `cos^(1 / falloff^tolerance)` of the angle between `rgb` and the
    /// protected color, with the cosine clamped to 0..1.
    #[inline]
    pub fn factor(&self, rgb: Color3) -> f32 {
        let cos = cos_angle_between(rgb, self.color).clamp(0.0, 1.0);
        cos.powf(1.0 / self.falloff.powf(self.tolerance))
    }
}

impl Default for ToneProtect {
    fn default() -> Self {
        Self::DISABLED
    }
}

/// Suppresses `target` in the hue space rotated by `hue_shift` degrees.
///
/// Returns the despilled color with the protection matte in `w` (0 when
/// protection is inactive).
pub fn despill(
    rgb: Color3,
    hue_shift: f32,
    target: ChannelSelector,
    math: DespillMath,
    limit: f32,
    custom_weight: f32,
    protect: &ToneProtect,
) -> Color4 {
    let mut working = hue_rotate(rgb, hue_shift);
    let [a, b] = target.others();
    let mut limit_result = math.combine(working[a], working[b], custom_weight);

    let mut matte = 0.0;
    if protect.is_active() {
        matte = protect.factor(rgb);
        limit_result *= 1.0 + matte * protect.effect;
    }

    let t = target.index();
    working[t] = working[t].min(limit_result * limit);

    Color4::from_rgb(hue_rotate(working, -hue_shift), matte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ALL_TARGETS: [ChannelSelector; 3] =
        [ChannelSelector::Red, ChannelSelector::Green, ChannelSelector::Blue];

    #[test]
    fn test_others() {
        assert_eq!(ChannelSelector::Red.others(), [1, 2]);
        assert_eq!(ChannelSelector::Green.others(), [0, 2]);
        assert_eq!(ChannelSelector::Blue.others(), [0, 1]);
    }

    #[test]
    fn test_combine() {
        assert_abs_diff_eq!(DespillMath::Average.combine(0.2, 0.4, 0.9), 0.3, epsilon = 1e-6);
        assert_eq!(DespillMath::Max.combine(0.2, 0.4, 0.0), 0.4);
        assert_eq!(DespillMath::Min.combine(0.2, 0.4, 0.0), 0.2);
        // -1 selects b, +1 selects a
        assert_abs_diff_eq!(DespillMath::Custom.combine(0.2, 0.4, -1.0), 0.4);
        assert_abs_diff_eq!(DespillMath::Custom.combine(0.2, 0.4, 1.0), 0.2);
        assert_abs_diff_eq!(DespillMath::Custom.combine(0.2, 0.4, 0.0), 0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_target_clamp_average() {
        let out = despill(
            Color3::new(0.2, 0.8, 0.2),
            0.0,
            ChannelSelector::Green,
            DespillMath::Average,
            1.0,
            0.0,
            &ToneProtect::DISABLED,
        );
        assert_abs_diff_eq!(out.x, 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(out.y, 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(out.z, 0.2, epsilon = 1e-6);
        assert_eq!(out.w, 0.0);
    }

    #[test]
    fn test_limit_zero_is_full_despill() {
        let colors = [
            Color3::new(0.2, 0.8, 0.2),
            Color3::new(0.9, 0.1, 0.4),
            Color3::new(0.3, 0.3, 0.9),
            Color3::ONE,
        ];
        for rgb in colors {
            for target in ALL_TARGETS {
                for math in DespillMath::ALL {
                    let out = despill(rgb, 0.0, target, *math, 0.0, 0.3, &ToneProtect::DISABLED);
                    assert_eq!(out[target.index()], 0.0);
                }
            }
        }
    }

    #[test]
    fn test_non_target_channels_unchanged() {
        let rgb = Color3::new(0.6, 0.9, 0.1);
        let out = despill(rgb, 0.0, ChannelSelector::Green, DespillMath::Min, 1.0, 0.0, &ToneProtect::DISABLED);
        assert_eq!(out.x, 0.6);
        assert_eq!(out.z, 0.1);
        assert_eq!(out.y, 0.1);
    }

    #[test]
    fn test_gray_protect_color_is_inert() {
        let protect = ToneProtect {
            enabled: true,
            color: Color3::splat(0.5),
            ..ToneProtect::DISABLED
        };
        for rgb in [Color3::new(0.5, 0.5, 0.5), Color3::new(0.8, 0.6, 0.5), Color3::GREEN] {
            let out = despill(rgb, 0.0, ChannelSelector::Green, DespillMath::Average, 1.0, 0.0, &protect);
            assert_eq!(out.w, 0.0);
        }
    }

    #[test]
    fn test_protect_inflates_limit() {
        let skin = Color3::new(0.8, 0.6, 0.5);
        let protect = ToneProtect {
            enabled: true,
            color: skin,
            tolerance: 0.2,
            effect: 1.0,
            falloff: 2.0,
        };
        let plain = despill(skin, 0.0, ChannelSelector::Green, DespillMath::Average, 1.0, 0.0, &ToneProtect::DISABLED);
        let kept = despill(skin, 0.0, ChannelSelector::Green, DespillMath::Average, 1.0, 0.0, &protect);
        // same direction => cos = 1 => factor = 1 => limit doubled
        assert_abs_diff_eq!(kept.w, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(plain.y, 0.6, epsilon = 1e-6);
        assert_abs_diff_eq!(kept.y, 0.6, epsilon = 1e-6);

        let green = Color3::new(0.3, 0.9, 0.2);
        let kept = despill(green, 0.0, ChannelSelector::Green, DespillMath::Average, 1.0, 0.0, &protect);
        assert!(kept.w > 0.0 && kept.w < 1.0);
        assert!(kept.y > 0.25);
    }

    #[test]
    fn test_hue_shift_suppresses_aligned_color() {
        // Green rotated by -120 lies on red; suppressing red then rotating
        // back removes the green excess.
        let rgb = Color3::new(0.1, 0.9, 0.1);
        let out = despill(rgb, -120.0, ChannelSelector::Red, DespillMath::Max, 1.0, 0.0, &ToneProtect::DISABLED);
        assert_abs_diff_eq!(out.x, 0.1, epsilon = 1e-5);
        assert_abs_diff_eq!(out.y, 0.1, epsilon = 1e-5);
        assert_abs_diff_eq!(out.z, 0.1, epsilon = 1e-5);
    }
}
