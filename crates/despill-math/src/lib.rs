//! # despill-math
//!
//! Color math used by the despill pipeline.
//!
//! - [`Color3`] - RGB triple
//! - [`Color4`] - RGB plus an auxiliary slot (protect matte, not alpha)
//! - [`Mat3`] - 3x3 matrices, including the hue rotation about gray
//! - [`hue`] - hue rotation, plane projection, signed color angles
//! - [`LumaMode`] - luminance weighting standards
//! - Range utilities (`remap_clamped`, `saturate`)
//!
//! # Usage
//!
//! ```rust
//! use despill_math::{hue_rotate, Color3};
//!
//! let green = Color3::new(0.0, 1.0, 0.0);
//! let red = hue_rotate(green, -120.0);
//! assert!((red.x - 1.0).abs() < 1e-5);
//! assert!(red.y.abs() < 1e-5);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - axis-angle rotation for the hue matrix
//! - `serde` (optional) - (de)serialization of [`LumaMode`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod color3;
mod color4;
mod interp;
mod mat3;
pub mod hue;
pub mod luma;

pub use color3::*;
pub use color4::*;
pub use hue::{
    color_angle, cos_angle_between, hue_rotate, hue_shift_to_red, to_gray_plane, vector_to_plane,
};
pub use interp::*;
pub use luma::{luma, luma_rgb, LumaMode};
pub use mat3::*;
