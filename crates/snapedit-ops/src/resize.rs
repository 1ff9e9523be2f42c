//! Image resampling.
//!
//! Only the two filters the editor needs: nearest-neighbor and bilinear.
//! The pixelate filter downsamples to a tiny grid and scales back up with
//! [`ResampleFilter::Bilinear`]; the console preview also goes through here.

use crate::{OpsError, OpsResult};

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    /// Nearest-neighbor (blocky).
    Nearest,
    /// Bilinear interpolation.
    #[default]
    Bilinear,
}

impl ResampleFilter {
    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            ResampleFilter::Nearest => 0.5,
            ResampleFilter::Bilinear => 1.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            ResampleFilter::Nearest => {
                if x.abs() < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            ResampleFilter::Bilinear => {
                let ax = x.abs();
                if ax < 1.0 {
                    1.0 - ax
                } else {
                    0.0
                }
            }
        }
    }
}

/// Resizes flat f32 image data.
///
/// Two-pass separable resample, horizontal then vertical. Filter support
/// widens when downscaling so minified output stays stable.
///
/// # Example
///
/// ```rust
/// use snapedit_ops::resize::{resize_f32, ResampleFilter};
///
/// let src = vec![0.5f32; 64 * 64 * 3];
/// let dst = resize_f32(&src, 64, 64, 3, 20, 20, ResampleFilter::Bilinear).unwrap();
/// assert_eq!(dst.len(), 20 * 20 * 3);
/// ```
pub fn resize_f32(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    dst_h: usize,
    filter: ResampleFilter,
) -> OpsResult<Vec<f32>> {
    let expected = src_w * src_h * channels;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidDimensions(
            "destination size must be > 0".into(),
        ));
    }

    let temp = resize_horizontal(src, src_w, src_h, channels, dst_w, filter);
    let result = resize_vertical(&temp, dst_w, src_h, channels, dst_h, filter);

    Ok(result)
}

/// Horizontal resize pass.
fn resize_horizontal(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    filter: ResampleFilter,
) -> Vec<f32> {
    let mut dst = vec![0.0f32; dst_w * src_h * channels];
    let scale = src_w as f32 / dst_w as f32;
    let support = filter.support() * scale.max(1.0);

    for y in 0..src_h {
        for x in 0..dst_w {
            let center = (x as f32 + 0.5) * scale - 0.5;
            let left = ((center - support).floor() as isize).max(0) as usize;
            let right = ((center + support).ceil() as usize).min(src_w - 1);

            let mut sum = vec![0.0f32; channels];
            let mut weight_sum = 0.0f32;

            for sx in left..=right {
                let dist = (sx as f32 - center) / scale.max(1.0);
                let w = filter.weight(dist);
                weight_sum += w;

                let src_idx = (y * src_w + sx) * channels;
                for c in 0..channels {
                    sum[c] += src[src_idx + c] * w;
                }
            }

            let dst_idx = (y * dst_w + x) * channels;
            if weight_sum > 0.0 {
                for c in 0..channels {
                    dst[dst_idx + c] = sum[c] / weight_sum;
                }
            }
        }
    }

    dst
}

/// Vertical resize pass.
fn resize_vertical(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_h: usize,
    filter: ResampleFilter,
) -> Vec<f32> {
    let mut dst = vec![0.0f32; src_w * dst_h * channels];
    let scale = src_h as f32 / dst_h as f32;
    let support = filter.support() * scale.max(1.0);

    for y in 0..dst_h {
        let center = (y as f32 + 0.5) * scale - 0.5;
        let top = ((center - support).floor() as isize).max(0) as usize;
        let bottom = ((center + support).ceil() as usize).min(src_h - 1);

        for x in 0..src_w {
            let mut sum = vec![0.0f32; channels];
            let mut weight_sum = 0.0f32;

            for sy in top..=bottom {
                let dist = (sy as f32 - center) / scale.max(1.0);
                let w = filter.weight(dist);
                weight_sum += w;

                let src_idx = (sy * src_w + x) * channels;
                for c in 0..channels {
                    sum[c] += src[src_idx + c] * w;
                }
            }

            let dst_idx = (y * src_w + x) * channels;
            if weight_sum > 0.0 {
                for c in 0..channels {
                    dst[dst_idx + c] = sum[c] / weight_sum;
                }
            }
        }
    }

    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_dimensions() {
        let src = vec![0.25f32; 100 * 100 * 3];
        let dst = resize_f32(&src, 100, 100, 3, 20, 20, ResampleFilter::Bilinear).unwrap();
        assert_eq!(dst.len(), 20 * 20 * 3);
    }

    #[test]
    fn test_resize_constant_stays_constant() {
        let src = vec![0.25f32; 16 * 16 * 4];
        let down = resize_f32(&src, 16, 16, 4, 4, 4, ResampleFilter::Bilinear).unwrap();
        let up = resize_f32(&down, 4, 4, 4, 16, 16, ResampleFilter::Bilinear).unwrap();
        for v in up {
            assert!((v - 0.25).abs() < 0.01);
        }
    }

    #[test]
    fn test_resize_rejects_zero_target() {
        let src = vec![0.0f32; 4 * 4 * 3];
        assert!(resize_f32(&src, 4, 4, 3, 0, 4, ResampleFilter::Nearest).is_err());
    }

    #[test]
    fn test_resize_rejects_length_mismatch() {
        let src = vec![0.0f32; 7];
        assert!(resize_f32(&src, 4, 4, 3, 2, 2, ResampleFilter::Bilinear).is_err());
    }

    #[test]
    fn test_nearest_identity() {
        let src: Vec<f32> = (0..16).map(|v| v as f32 / 16.0).collect();
        let dst = resize_f32(&src, 4, 4, 1, 4, 4, ResampleFilter::Nearest).unwrap();
        assert_eq!(src, dst);
    }
}
