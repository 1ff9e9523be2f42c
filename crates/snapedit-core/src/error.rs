//! Error types for snapedit-core operations.
//!
//! The [`Error`] enum covers the failure modes of image buffer construction
//! and access. Higher layers (ops, io) define their own error types and
//! convert where needed.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing or accessing image buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Buffer length does not match width * height * channels.
    #[error("invalid dimensions: {width}x{height}x{channels} ({reason})")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Requested channel count.
        channels: u8,
        /// Reason why dimensions are invalid.
        reason: String,
    },

    /// Channel count is not one of the supported layouts (1, 3 or 4).
    #[error("unsupported channel count: {got} (expected 1, 3 or 4)")]
    UnsupportedChannels {
        /// Actual channel count.
        got: u8,
    },

    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds.
        x: u32,
        /// Y coordinate that was out of bounds.
        y: u32,
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(
        width: u32,
        height: u32,
        channels: u8,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            channels,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_message() {
        let err = Error::invalid_dimensions(10, 10, 3, "expected 300 samples, got 4");
        let msg = err.to_string();
        assert!(msg.contains("10x10x3"));
        assert!(msg.contains("300"));
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = Error::out_of_bounds(100, 50, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("80x60"));
    }
}
