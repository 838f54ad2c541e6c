//! Hue-space transforms around the neutral axis.
//!
//! Everything here treats RGB as a 3D vector space in which gray values
//! lie on the (1,1,1) axis. Hue is the direction of a color inside the
//! plane orthogonal to that axis:
//!
//! - [`hue_rotate`] turns a color around the gray axis
//! - [`vector_to_plane`] drops the component along a normal
//! - [`color_angle`] measures the signed angle between two colors
//! - [`cos_angle_between`] is the unsigned cosine used by tone protection
//! - [`hue_shift_to_red`] is the rotation that brings a color onto red
//!
//! # Sign convention
//!
//! `color_angle(a, b)` is negative when `gray · (a × b) > 0`. With that
//! convention `hue_rotate(c, -color_angle(c⊥, red⊥))` lands on the red
//! half-plane, which is what despill relies on to align any spill color
//! with the red channel.

use crate::{Color3, Mat3};

/// Rotates `rgb` around the gray axis by `angle_deg` degrees.
///
/// An angle of exactly zero returns the input unchanged without
/// evaluating any trigonometry.
///
/// ```rust
/// use despill_math::{hue_rotate, Color3};
///
/// let c = Color3::new(0.3, 0.6, 0.9);
/// assert_eq!(hue_rotate(c, 0.0), c);
/// ```
#[inline]
pub fn hue_rotate(rgb: Color3, angle_deg: f32) -> Color3 {
    if angle_deg == 0.0 {
        return rgb;
    }
    Mat3::hue_rotation(angle_deg) * rgb
}

/// Component of `v` orthogonal to `normal`.
///
/// # Panics
///
/// Panics if `normal` is the zero vector; the projection is undefined.
#[inline]
pub fn vector_to_plane(v: Color3, normal: Color3) -> Color3 {
    let nn = normal.length_squared();
    assert!(nn > 0.0, "vector_to_plane: zero-length normal");
    v - normal * (v.dot(normal) / nn)
}

/// [`vector_to_plane`] against the gray axis.
#[inline]
pub fn to_gray_plane(v: Color3) -> Color3 {
    vector_to_plane(v, Color3::GRAY_AXIS)
}

/// Signed angle in radians between two colors.
///
/// Inputs are expected to lie in the plane orthogonal to gray. A
/// zero-length input yields 0. The cosine is clamped to [-1, 1] before
/// `acos`.
pub fn color_angle(v1: Color3, v2: Color3) -> f32 {
    let denom_sq = v1.length_squared() * v2.length_squared();
    if denom_sq == 0.0 {
        return 0.0;
    }
    let cos = (v1.dot(v2) / denom_sq.sqrt()).clamp(-1.0, 1.0);
    let angle = cos.acos();
    if Color3::GRAY_AXIS.dot(v1.cross(v2)) > 0.0 {
        -angle
    } else {
        angle
    }
}

/// Cosine of the angle between two colors, 0 if either has zero length.
#[inline]
pub fn cos_angle_between(v1: Color3, v2: Color3) -> f32 {
    let denom = v1.length() * v2.length();
    if denom == 0.0 {
        return 0.0;
    }
    (v1.dot(v2) / denom).clamp(-1.0, 1.0)
}

/// Hue shift in degrees that aligns `color` with the red reference,
/// plus the user `offset_deg`.
///
/// ```rust
/// use despill_math::{hue_rotate, hue_shift_to_red, Color3};
///
/// let shift = hue_shift_to_red(Color3::GREEN, 0.0);
/// assert!((shift + 120.0).abs() < 1e-3);
/// let aligned = hue_rotate(Color3::GREEN, shift);
/// assert!((aligned.x - 1.0).abs() < 1e-5);
/// ```
#[inline]
pub fn hue_shift_to_red(color: Color3, offset_deg: f32) -> f32 {
    let angle = color_angle(to_gray_plane(color), to_gray_plane(Color3::RED));
    offset_deg - angle.to_degrees()
}
