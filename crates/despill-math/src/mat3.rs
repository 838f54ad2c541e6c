//! 3x3 matrix for linear color transforms.
//!
//! Stored **row-major**, applied to **column vectors**:
//!
//! ```text
//! | m00 m01 m02 |   | r |   | m00*r + m01*g + m02*b |
//! | m10 m11 m12 | * | g | = | m10*r + m11*g + m12*b |
//! | m20 m21 m22 |   | b |   | m20*r + m21*g + m22*b |
//! ```

use crate::Color3;
use std::ops::Mul;

/// A 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// Elements in row-major order: [row0, row1, row2]
    pub m: [[f32; 3]; 3],
}

impl Mat3 {
    /// Creates a matrix from column arrays.
    #[inline]
    pub const fn from_cols(cols: [[f32; 3]; 3]) -> Self {
        Self {
            m: [
                [cols[0][0], cols[1][0], cols[2][0]],
                [cols[0][1], cols[1][1], cols[2][1]],
                [cols[0][2], cols[1][2], cols[2][2]],
            ],
        }
    }

    /// Hue rotation about the neutral (1,1,1) axis by `angle_deg` degrees.
    ///
    /// This is Rodrigues' rotation restricted to the gray axis, so gray
    /// values are fixed points and positive angles turn red toward green:
    ///
    /// ```text
    /// | c+k   k-t   k+t |      c = cos a, s = sin a
    /// | k+t   c+k   k-t |      k = (1 - c) / 3
    /// | k-t   k+t   c+k |      t = s / sqrt(3)
    /// ```
    pub fn hue_rotation(angle_deg: f32) -> Self {
        let axis = Color3::GRAY_AXIS.to_glam().normalize();
        let rot = glam::Mat3::from_axis_angle(axis, angle_deg.to_radians());
        Self::from_cols(rot.to_cols_array_2d())
    }
}

impl Mul<Color3> for Mat3 {
    type Output = Color3;

    #[inline]
    fn mul(self, v: Color3) -> Color3 {
        let m = &self.m;
        Color3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_mat_eq(a: Mat3, b: Mat3) {
        for i in 0..3 {
            for j in 0..3 {
                assert_abs_diff_eq!(a.m[i][j], b.m[i][j], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_hue_rotation_zero_is_identity() {
        let identity = Mat3 {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        };
        assert_mat_eq(Mat3::hue_rotation(0.0), identity);
    }

    #[test]
    fn test_hue_rotation_matches_closed_form() {
        let a = 37.0f32.to_radians();
        let c = a.cos();
        let k = (1.0 - c) / 3.0;
        let t = a.sin() / 3.0f32.sqrt();
        let expected = Mat3 {
            m: [
                [c + k, k - t, k + t],
                [k + t, c + k, k - t],
                [k - t, k + t, c + k],
            ],
        };
        assert_mat_eq(Mat3::hue_rotation(37.0), expected);
    }

    #[test]
    fn test_hue_rotation_inverse_is_negative_angle() {
        let c = Color3::new(0.7, 0.2, 0.35);
        let out = Mat3::hue_rotation(-73.0) * (Mat3::hue_rotation(73.0) * c);
        assert_abs_diff_eq!(out.x, c.x, epsilon = 1e-6);
        assert_abs_diff_eq!(out.y, c.y, epsilon = 1e-6);
        assert_abs_diff_eq!(out.z, c.z, epsilon = 1e-6);
        // length is preserved
        assert_abs_diff_eq!((Mat3::hue_rotation(73.0) * c).length(), c.length(), epsilon = 1e-6);
    }

    #[test]
    fn test_hue_rotation_fixes_gray() {
        let gray = Color3::splat(0.42);
        let out = Mat3::hue_rotation(123.0) * gray;
        assert_abs_diff_eq!(out.x, 0.42, epsilon = 1e-6);
        assert_abs_diff_eq!(out.y, 0.42, epsilon = 1e-6);
        assert_abs_diff_eq!(out.z, 0.42, epsilon = 1e-6);
    }

    #[test]
    fn test_hue_rotation_red_to_green() {
        let out = Mat3::hue_rotation(120.0) * Color3::RED;
        assert_abs_diff_eq!(out.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(out.y, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(out.z, 0.0, epsilon = 1e-6);
    }
}
