//! Owned image buffer.
//!
//! [`ImageBuf`] is the single image type flowing through the editor. Pixels
//! are stored interleaved in row-major order, top-to-bottom:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//! ```
//!
//! The channel count is a runtime property (1 = gray, 3 = RGB, 4 = RGBA)
//! because filters change it: grayscale turns a 3-channel image into a
//! 1-channel one. Samples are 8-bit; filter math that needs floating point
//! goes through [`ImageBuf::to_f32`] / [`ImageBuf::from_f32`] and clamps
//! back.
//!
//! Ownership is unique. Filters consume a reference and return a new buffer;
//! the compositor mutates in place through [`ImageBuf::data_mut`]. Nothing
//! is shared, so there is no copy-on-write machinery here.

use crate::{Error, Rect, Result};

/// Owned 8-bit image buffer with a runtime channel count.
///
/// # Example
///
/// ```rust
/// use snapedit_core::ImageBuf;
///
/// let mut img = ImageBuf::filled(10, 10, &[255, 0, 0]);
/// assert_eq!(img.dimensions(), (10, 10));
/// assert_eq!(img.channels(), 3);
///
/// img.set_pixel(5, 5, &[0, 255, 0]);
/// assert_eq!(img.pixel(5, 5), &[0, 255, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuf {
    /// Interleaved sample data, `width * height * channels` bytes.
    data: Vec<u8>,
    /// Image width in pixels.
    width: u32,
    /// Image height in pixels.
    height: u32,
    /// Samples per pixel (1, 3 or 4).
    channels: u8,
}

impl ImageBuf {
    /// Creates a black image of the given size and channel count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] for channel counts other than
    /// 1, 3 or 4.
    pub fn new(width: u32, height: u32, channels: u8) -> Result<Self> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(Error::UnsupportedChannels { got: channels });
        }
        let len = width as usize * height as usize * channels as usize;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
            channels,
        })
    }

    /// Creates an image from existing sample data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the data length does not
    /// equal `width * height * channels`, and [`Error::UnsupportedChannels`]
    /// for channel counts other than 1, 3 or 4.
    pub fn from_data(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(Error::UnsupportedChannels { got: channels });
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                channels,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates an image filled with a single pixel value.
    ///
    /// The channel count is taken from the length of `pixel`.
    ///
    /// # Panics
    ///
    /// Panics if `pixel` is empty or longer than 4 samples.
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> Self {
        assert!(
            matches!(pixel.len(), 1 | 3 | 4),
            "fill pixel must have 1, 3 or 4 samples"
        );
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * pixel.len());
        for _ in 0..count {
            data.extend_from_slice(pixel);
        }
        Self {
            data,
            width,
            height,
            channels: pixel.len() as u8,
        }
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of samples per pixel.
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the total number of samples (pixels * channels).
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.pixel_count() * self.channels as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns a rectangle covering the entire image.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Returns the raw sample data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the raw sample data mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the image and returns the sample data.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the sample offset for the pixel at (x, y).
    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }

    /// Returns the pixel at (x, y) as a slice of `channels()` samples.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        &self.data[offset..offset + self.channels as usize]
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds or `pixel` has the wrong length.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: &[u8]) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        self.data[offset..offset + self.channels as usize].copy_from_slice(pixel);
    }

    /// Returns a row of samples.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let stride = self.width as usize * self.channels as usize;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Converts the samples to normalized f32 values in [0.0, 1.0].
    pub fn to_f32(&self) -> Vec<f32> {
        self.data.iter().map(|&v| v as f32 / 255.0).collect()
    }

    /// Builds an image from normalized f32 samples, clamping to [0.0, 1.0]
    /// and rounding back to 8-bit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the sample count does not
    /// match the requested dimensions.
    pub fn from_f32(width: u32, height: u32, channels: u8, samples: &[f32]) -> Result<Self> {
        let data = samples
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect();
        Self::from_data(width, height, channels, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zeroed() {
        let img = ImageBuf::new(100, 50, 3).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.channels(), 3);
        assert_eq!(img.sample_count(), 100 * 50 * 3);
        assert!(img.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_new_rejects_two_channels() {
        assert!(ImageBuf::new(10, 10, 2).is_err());
        assert!(ImageBuf::new(10, 10, 0).is_err());
    }

    #[test]
    fn test_filled_and_pixel_access() {
        let mut img = ImageBuf::filled(10, 10, &[1, 2, 3]);
        assert_eq!(img.pixel(0, 0), &[1, 2, 3]);
        assert_eq!(img.pixel(9, 9), &[1, 2, 3]);

        img.set_pixel(4, 7, &[9, 8, 7]);
        assert_eq!(img.pixel(4, 7), &[9, 8, 7]);
        assert_eq!(img.pixel(4, 6), &[1, 2, 3]);
    }

    #[test]
    fn test_from_data_wrong_length() {
        let err = ImageBuf::from_data(10, 10, 3, vec![0; 10]).unwrap_err();
        assert!(err.to_string().contains("300"));
    }

    #[test]
    fn test_get_pixel_out_of_bounds() {
        let img = ImageBuf::filled(5, 5, &[0]);
        assert!(img.get_pixel(4, 4).is_some());
        assert!(img.get_pixel(5, 0).is_none());
        assert!(img.get_pixel(0, 5).is_none());
    }

    #[test]
    fn test_row() {
        let img = ImageBuf::filled(4, 2, &[7, 7, 7, 255]);
        assert_eq!(img.row(1).len(), 16);
        assert_eq!(&img.row(1)[0..4], &[7, 7, 7, 255]);
    }

    #[test]
    fn test_f32_round_trip() {
        let img = ImageBuf::filled(3, 3, &[0, 128, 255]);
        let f = img.to_f32();
        let back = ImageBuf::from_f32(3, 3, 3, &f).unwrap();
        assert_eq!(img, back);
    }

    #[test]
    fn test_from_f32_clamps() {
        let img = ImageBuf::from_f32(1, 1, 3, &[-0.5, 0.5, 2.0]).unwrap();
        assert_eq!(img.pixel(0, 0), &[0, 128, 255]);
    }
}
