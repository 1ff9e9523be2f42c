//! # snapedit-core
//!
//! Core types for the snapedit image editor.
//!
//! This crate provides the foundational types used by the other snapedit
//! crates:
//!
//! - [`ImageBuf`] - Owned 8-bit image buffer (1, 3 or 4 channels)
//! - [`Rect`] - Placement rectangle for sticker compositing
//! - [`Error`], [`Result`] - Unified error type
//!
//! ## Crate Structure
//!
//! This crate is the foundation of snapedit and has no internal
//! dependencies. All other snapedit crates depend on it:
//!
//! ```text
//! snapedit-core (this crate)
//!    ^
//!    |
//!    +-- snapedit-ops (filters, compositor)
//!    +-- snapedit-io (codecs, sticker catalog)
//!    +-- snapedit-cli (session loop)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod rect;

pub use error::{Error, Result};
pub use image::ImageBuf;
pub use rect::Rect;
