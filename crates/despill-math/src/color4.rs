//! RGB plus an auxiliary fourth slot.
//!
//! The fourth component of [`Color4`] is **not transparency**. The despill
//! core uses it to return the tone-protection matte next to the despilled
//! color, and spill extraction fills it with `1` by convention. It never
//! reaches a channel write.

use crate::Color3;
use std::ops::{Add, Index, Sub};

/// RGB color with an auxiliary scalar `w`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Color4 {
    /// Red
    pub x: f32,
    /// Green
    pub y: f32,
    /// Blue
    pub z: f32,
    /// Auxiliary data (protect matte), not alpha
    pub w: f32,
}

impl Color4 {
    /// Creates a new value.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Extends an RGB triple with `w`.
    #[inline]
    pub const fn from_rgb(rgb: Color3, w: f32) -> Self {
        Self::new(rgb.x, rgb.y, rgb.z, w)
    }

    /// The RGB part.
    #[inline]
    pub const fn rgb(self) -> Color3 {
        Color3::new(self.x, self.y, self.z)
    }

    /// Returns true if all components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.rgb().is_finite() && self.w.is_finite()
    }
}

impl Index<usize> for Color4 {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Color4 index out of bounds: {}", i),
        }
    }
}

impl Add for Color4 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Color4 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}
