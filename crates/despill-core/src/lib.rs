//! # despill-core
//!
//! Core types shared by every crate of the despill workspace.
//!
//! - [`ImageBuf`] - Interleaved `f32` image buffer (row-major, top-to-bottom)
//! - [`Rect`] - Pixel region used to restrict processing
//! - [`Error`], [`Result`] - Buffer and region errors
//!
//! ## Crate Structure
//!
//! ```text
//! despill-core (this crate)
//!    ^
//!    |
//!    +-- despill-math (colors, transforms, luma)
//!    +-- despill-io (PNG/TIFF)
//!    +-- despill-ops (despill pipeline, row driver)
//!    +-- despill-cli
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use despill_core::{ImageBuf, Rect};
//!
//! let mut img = ImageBuf::new(64, 32, 4);
//! img.pixel_mut(10, 5).copy_from_slice(&[0.1, 0.9, 0.1, 1.0]);
//! assert_eq!(img.pixel(10, 5)[1], 0.9);
//! assert_eq!(img.rect(), Rect::from_size(64, 32));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod rect;

pub use error::*;
pub use image::*;
pub use rect::*;
