//! Error types for pixel operations.

use thiserror::Error;

/// Error type for pixel operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Filter name did not match any known filter.
    #[error("unknown filter '{0}'")]
    UnknownFilter(String),

    /// Sticker image does not carry an alpha channel.
    #[error("invalid sticker: expected 4 channels, got {got}")]
    InvalidSticker {
        /// Channel count of the rejected sticker.
        got: u8,
    },

    /// Sticker placement rectangle leaves the base image.
    #[error(
        "sticker out of bounds: {sticker_w}x{sticker_h} at ({x}, {y}) \
         does not fit base image {base_w}x{base_h}"
    )]
    OutOfBounds {
        /// Placement x.
        x: u32,
        /// Placement y.
        y: u32,
        /// Sticker width.
        sticker_w: u32,
        /// Sticker height.
        sticker_h: u32,
        /// Base image width.
        base_w: u32,
        /// Base image height.
        base_h: u32,
    },

    /// Operation does not support the given image layout.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Sample buffer does not match the stated dimensions.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type for pixel operations.
pub type OpsResult<T> = Result<T, OpsError>;
