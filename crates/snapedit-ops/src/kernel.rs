//! Convolution kernels and window filters.
//!
//! The blur and sharpen filters are plain convolutions; cartoon goes
//! through [`median_blur`]. All three work on flat f32 slices with
//! edge-clamped sampling.
//!
//! # Example
//!
//! ```rust
//! use snapedit_ops::kernel::{convolve, Kernel};
//!
//! let src = vec![0.5f32; 16 * 16 * 3];
//! let kernel = Kernel::gaussian(3, 1.0);
//! let blurred = convolve(&src, 16, 16, 3, &kernel).unwrap();
//! ```

use crate::{OpsError, OpsResult};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Convolution kernel.
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Kernel weights, row-major.
    pub data: Vec<f32>,
    /// Kernel width (odd).
    pub width: usize,
    /// Kernel height (odd).
    pub height: usize,
}

impl Kernel {
    /// Creates a kernel from raw weights.
    ///
    /// Width and height must be odd.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> OpsResult<Self> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(OpsError::InvalidParameter(
                "kernel dimensions must be odd".into(),
            ));
        }
        if data.len() != width * height {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a normalized Gaussian kernel.
    ///
    /// # Arguments
    ///
    /// * `size` - Kernel size (made odd if even)
    /// * `sigma` - Standard deviation
    pub fn gaussian(size: usize, sigma: f32) -> Self {
        let size = if size % 2 == 0 { size + 1 } else { size };
        let half = (size / 2) as i32;
        let sigma2 = 2.0 * sigma * sigma;

        let mut data = Vec::with_capacity(size * size);
        let mut sum = 0.0f32;

        for y in -half..=half {
            for x in -half..=half {
                let d = (x * x + y * y) as f32;
                let w = (-d / sigma2).exp();
                data.push(w);
                sum += w;
            }
        }

        for w in &mut data {
            *w /= sum;
        }

        Self {
            data,
            width: size,
            height: size,
        }
    }

    /// Creates a 3x3 sharpening kernel.
    ///
    /// At `amount` 1.0 this is the classic
    /// `[[0,-1,0],[-1,5,-1],[0,-1,0]]` kernel.
    pub fn sharpen(amount: f32) -> Self {
        let center = 1.0 + 4.0 * amount;
        Self {
            data: vec![
                0.0, -amount, 0.0, //
                -amount, center, -amount, //
                0.0, -amount, 0.0,
            ],
            width: 3,
            height: 3,
        }
    }

    /// Returns the kernel radius (half-size) as (rx, ry).
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }
}

/// Sigma derived from a Gaussian kernel size.
///
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`, the usual automatic sigma for a
/// given kernel size. A 15x15 kernel gives sigma 2.6.
#[inline]
pub fn gaussian_sigma_for(size: usize) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Applies a convolution kernel to flat image data.
///
/// Samples outside the image are clamped to the nearest edge pixel.
///
/// # Example
///
/// ```rust
/// use snapedit_ops::kernel::{convolve, Kernel};
///
/// let src = vec![0.5f32; 8 * 8 * 3];
/// let result = convolve(&src, 8, 8, 3, &Kernel::sharpen(1.0)).unwrap();
/// assert_eq!(result.len(), 8 * 8 * 3);
/// ```
pub fn convolve(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &Kernel,
) -> OpsResult<Vec<f32>> {
    trace!(
        width,
        height,
        channels,
        kernel_w = kernel.width,
        kernel_h = kernel.height,
        "convolve"
    );

    let expected = width * height * channels;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }

    let mut dst = vec![0.0f32; expected];
    let (rx, ry) = kernel.radius();

    for y in 0..height {
        for x in 0..width {
            let mut sums = vec![0.0f32; channels];

            for ky in 0..kernel.height {
                for kx in 0..kernel.width {
                    let sx = (x as isize + kx as isize - rx as isize)
                        .max(0)
                        .min(width as isize - 1) as usize;
                    let sy = (y as isize + ky as isize - ry as isize)
                        .max(0)
                        .min(height as isize - 1) as usize;

                    let src_idx = (sy * width + sx) * channels;
                    let kw = kernel.data[ky * kernel.width + kx];

                    for c in 0..channels {
                        sums[c] += src[src_idx + c] * kw;
                    }
                }
            }

            let dst_idx = (y * width + x) * channels;
            for c in 0..channels {
                dst[dst_idx + c] = sums[c];
            }
        }
    }

    Ok(dst)
}

/// Median filter over a square window.
///
/// `radius` 3 gives the 7x7 window the cartoon filter uses. Each channel
/// is filtered independently; edges clamp.
///
/// # Example
///
/// ```rust
/// use snapedit_ops::kernel::median_blur;
///
/// let src = vec![0.5f32; 8 * 8 * 3];
/// let result = median_blur(&src, 8, 8, 3, 1).unwrap();
/// ```
pub fn median_blur(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
) -> OpsResult<Vec<f32>> {
    trace!(width, height, channels, radius, "median_blur");

    let expected = width * height * channels;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }

    let mut dst = vec![0.0f32; expected];
    let size = 2 * radius + 1;
    let count = size * size;
    let mid = count / 2;

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut values: Vec<f32> = Vec::with_capacity(count);

                for ky in 0..size {
                    for kx in 0..size {
                        let sx = (x as isize + kx as isize - radius as isize)
                            .max(0)
                            .min(width as isize - 1) as usize;
                        let sy = (y as isize + ky as isize - radius as isize)
                            .max(0)
                            .min(height as isize - 1) as usize;

                        values.push(src[(sy * width + sx) * channels + c]);
                    }
                }

                values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                dst[(y * width + x) * channels + c] = values[mid];
            }
        }
    }

    Ok(dst)
}
