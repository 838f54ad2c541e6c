//! # despill-ops
//!
//! Spill suppression for keying and compositing.
//!
//! A colored backdrop contaminates the subject with its color. This crate
//! removes that contamination from one channel in a hue-aligned space,
//! composites a respill color back where spill was removed and optionally
//! exports the spill amount as a matte.
//!
//! # Modules
//!
//! - [`despill`] - per-pixel despill core and tone protection
//! - [`pipeline`] - frame setup and per-pixel orchestration
//! - [`params`] - [`DespillParameters`] and its enums
//! - [`apply`] - whole-image processing on the calling thread
//! - [`parallel`] - [`RowDriver`](parallel::RowDriver) over a Rayon pool
//! - `preset` - YAML load/save for [`DespillParameters`]
//!
//! # Example
//!
//! ```rust
//! use despill_core::ImageBuf;
//! use despill_ops::{process_image, ColorSelect, DespillParameters, DespillSetup, DespillSources};
//!
//! let plate = ImageBuf::filled(8, 8, &[0.1, 0.9, 0.1, 1.0]).unwrap();
//! let sources = DespillSources::new(&plate);
//! let params = DespillParameters {
//!     color: ColorSelect::Green,
//!     ..Default::default()
//! };
//! let setup = DespillSetup::new(params, sources.connected()).unwrap();
//! let out = process_image(&setup, sources, None).unwrap();
//! assert!(out.pixel(0, 0)[1] < 0.9);
//! ```
//!
//! # Concurrency
//!
//! [`DespillSetup`] is immutable once built and `process` touches only its
//! own pixel, so rows can run on any number of threads without locks.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod preset;
pub mod apply;
pub mod despill;
pub mod params;
pub mod pipeline;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use apply::{process_image, DespillSources};
pub use error::{OpsError, OpsResult};
pub use params::{ChannelSlot, ColorSelect, DespillMath, DespillParameters, OutputType};
pub use pipeline::{ColorMode, ConnectedInputs, DespillSetup, PixelInput, PixelOutput};
