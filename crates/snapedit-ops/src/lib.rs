//! # snapedit-ops
//!
//! Pixel operations for the snapedit image editor.
//!
//! # Modules
//!
//! - [`filters`] - The named filter enumeration and its dispatch
//! - [`composite`] - Sticker alpha compositing
//! - [`kernel`] - Convolution kernels and the median filter
//! - [`resize`] - Resampling (pixelate uses it)
//! - [`color`] - Per-pixel color transforms
//! - [`edge`] - Canny-style edge detection
//!
//! Every operation is a pure function over its inputs; the one deliberate
//! exception is [`composite::overlay_sticker`], which blends into the base
//! image in place.
//!
//! # Example
//!
//! ```rust
//! use snapedit_core::ImageBuf;
//! use snapedit_ops::FilterKind;
//!
//! let img = ImageBuf::filled(32, 32, &[10, 200, 30]);
//! let inverted = FilterKind::Invert.apply(&img).unwrap();
//! assert_eq!(inverted.pixel(0, 0), &[245, 55, 225]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod color;
pub mod composite;
pub mod edge;
pub mod filters;
pub mod kernel;
pub mod resize;

pub use composite::overlay_sticker;
pub use error::{OpsError, OpsResult};
pub use filters::FilterKind;
pub use resize::ResampleFilter;
