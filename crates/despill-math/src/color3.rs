//! RGB triple.
//!
//! [`Color3`] is the value type every despill transform consumes and
//! returns. It is `Copy`, carries no identity beyond its components and is
//! never mutated in place by the pipeline.
//!
//! ```rust
//! use despill_math::Color3;
//!
//! let rgb = Color3::new(0.1, 0.9, 0.1);
//! let gray = Color3::splat(0.5);
//! assert!(gray.is_gray());
//! assert!(!rgb.is_gray());
//! assert_eq!(rgb[1], 0.9);
//! ```

use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

/// An RGB color (x = R, y = G, z = B).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Color3 {
    /// Red
    pub x: f32,
    /// Green
    pub y: f32,
    /// Blue
    pub z: f32,
}

impl Color3 {
    /// (0, 0, 0).
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// (1, 1, 1), also the neutral axis.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// The gray axis every hue operation rotates around.
    pub const GRAY_AXIS: Self = Self::ONE;

    /// Pure red, the hue-alignment reference.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);

    /// Pure green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);

    /// Pure blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new color.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// All components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Creates from an array.
    #[inline]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Converts to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Squared length (avoids sqrt).
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Clamps each component to [min, max].
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.min(max).max(min)
    }

    /// Clamps each component to [0, 1].
    #[inline]
    pub fn clamp01(self) -> Self {
        self.clamp(Self::ZERO, Self::ONE)
    }

    /// Largest component.
    #[inline]
    pub fn max_element(self) -> f32 {
        self.x.max(self.y).max(self.z)
    }

    /// `true` when all three components are equal, i.e. the color has no
    /// hue. A gray pick or protect color means "nothing selected".
    #[inline]
    pub fn is_gray(self) -> bool {
        self.x == self.y && self.y == self.z
    }

    /// Returns true if all components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub(crate) fn to_glam(self) -> glam::Vec3 {
        glam::Vec3::new(self.x, self.y, self.z)
    }
}

impl Index<usize> for Color3 {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Color3 index out of bounds: {}", i),
        }
    }
}

impl IndexMut<usize> for Color3 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Color3 index out of bounds: {}", i),
        }
    }
}

impl Add for Color3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Color3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Color3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

// component-wise
impl Mul for Color3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f32> for Color3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Color3> for f32 {
    type Output = Color3;

    #[inline]
    fn mul(self, rhs: Color3) -> Color3 {
        rhs * self
    }
}

impl Div<f32> for Color3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl From<[f32; 3]> for Color3 {
    #[inline]
    fn from(a: [f32; 3]) -> Self {
        Self::from_array(a)
    }
}

impl From<Color3> for [f32; 3] {
    #[inline]
    fn from(v: Color3) -> [f32; 3] {
        v.to_array()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color3 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color3 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <[f32; 3]>::deserialize(deserializer).map(Self::from_array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color3_dot_cross() {
        let a = Color3::new(1.0, 2.0, 3.0);
        let b = Color3::new(4.0, 5.0, 6.0);
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Color3::RED.cross(Color3::GREEN), Color3::BLUE);
    }

    #[test]
    fn test_color3_ops() {
        let a = Color3::new(1.0, 2.0, 3.0);
        let b = Color3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Color3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Color3::splat(3.0));
        assert_eq!(a * 2.0, Color3::new(2.0, 4.0, 6.0));
        assert_eq!(a * b, Color3::new(4.0, 10.0, 18.0));
        assert_eq!(-a, Color3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_color3_clamp01() {
        let c = Color3::new(-0.5, 0.5, 1.5).clamp01();
        assert_eq!(c, Color3::new(0.0, 0.5, 1.0));
    }

    #[test]
    fn test_color3_is_gray() {
        assert!(Color3::splat(0.5).is_gray());
        assert!(Color3::ZERO.is_gray());
        assert!(!Color3::new(0.5, 0.5, 0.51).is_gray());
    }

    #[test]
    fn test_color3_index() {
        let mut v = Color3::new(1.0, 2.0, 3.0);
        v[2] = 9.0;
        assert_eq!(v[0], 1.0);
        assert_eq!(v[2], 9.0);
        assert_eq!(v.max_element(), 9.0);
    }
}
