//! Scalar interpolation and range utilities.
//!
//! ```rust
//! use despill_math::remap_clamped;
//!
//! // Respill black/white points: 0.5..1 mapped to 0..1
//! assert_eq!(remap_clamped(0.75, 0.5, 1.0), 0.5);
//! assert_eq!(remap_clamped(0.25, 0.5, 1.0), 0.0);
//! assert_eq!(remap_clamped(1.5, 0.5, 1.0), 1.0);
//! ```

/// Position of `value` in `[a, b]` as a fraction, unclamped. Returns 0 for
/// a degenerate range.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() < 1e-10 {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

/// Maps `[black, white]` to `[0, 1]` and clamps outside it.
///
/// A degenerate range (`black == white`) maps everything to 0.
#[inline]
pub fn remap_clamped(value: f32, black: f32, white: f32) -> f32 {
    saturate(inverse_lerp(black, white, value))
}

/// Clamps a value to [min, max].
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Clamps a value to [0, 1].
#[inline]
pub fn saturate(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_inverse_lerp_degenerate() {
        assert_eq!(inverse_lerp(0.0, 10.0, 5.0), 0.5);
        assert_eq!(inverse_lerp(1.0, 1.0, 5.0), 0.0);
    }

    #[test]
    fn test_remap_clamped_narrow_range() {
        // 0.3 in 0.1..0.5 is halfway, up to f32 rounding
        assert_abs_diff_eq!(remap_clamped(0.3, 0.1, 0.5), 0.5, epsilon = 1e-6);
        assert_eq!(remap_clamped(0.9, 0.1, 0.5), 1.0);
        assert_eq!(remap_clamped(0.05, 0.1, 0.5), 0.0);
    }

    #[test]
    fn test_remap_clamped_degenerate_range() {
        assert_eq!(remap_clamped(0.7, 0.4, 0.4), 0.0);
    }

    #[test]
    fn test_remap_clamped_default_range_is_saturate() {
        assert_eq!(remap_clamped(0.572, 0.0, 1.0), 0.572);
        assert_eq!(remap_clamped(-0.2, 0.0, 1.0), 0.0);
        assert_eq!(remap_clamped(1.7, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(-0.5), 0.0);
        assert_eq!(saturate(0.5), 0.5);
        assert_eq!(saturate(1.5), 1.0);
    }
}
