//! The named filter set.
//!
//! [`FilterKind`] has one variant per built-in filter and a single
//! exhaustive dispatch in [`FilterKind::apply`]. Name lookup is `FromStr`,
//! so an unsupported filter is a parse miss the caller reports as a no-op,
//! never a runtime lookup hole inside the dispatch itself.

use crate::kernel::{self, gaussian_sigma_for, Kernel};
use crate::resize::{resize_f32, ResampleFilter};
use crate::{color, edge, OpsError, OpsResult};
use snapedit_core::ImageBuf;
use std::fmt;
use std::str::FromStr;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Gaussian blur kernel size.
const BLUR_KERNEL_SIZE: usize = 15;
/// Median window radius for the cartoon filter (7x7 window).
const CARTOON_MEDIAN_RADIUS: usize = 3;
/// Binary threshold level.
const THRESHOLD_LEVEL: u8 = 127;
/// Canny hysteresis thresholds.
const EDGE_LOW: f32 = 100.0;
const EDGE_HIGH: f32 = 200.0;
/// Gain for the saturate filter.
const SATURATE_GAIN: f32 = 1.2;
/// Intermediate grid for the pixelate filter.
const PIXELATE_GRID: usize = 20;

/// One of the ten built-in filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// 3-channel to 1-channel luminance conversion.
    Grayscale,
    /// Sepia channel-mixing matrix.
    Sepia,
    /// Per-channel complement (255 - v).
    Invert,
    /// 15x15 Gaussian smoothing.
    Blur,
    /// Grayscale then binary threshold at 127.
    Threshold,
    /// AND of a 7x7 median blur with the original.
    Cartoon,
    /// Grayscale then Canny edges (100/200).
    Edges,
    /// Linear gain 1.2 with clamping.
    Saturate,
    /// Downsample to 20x20 and back, bilinear.
    Pixelate,
    /// 3x3 sharpening convolution.
    Sharpen,
}

impl FilterKind {
    /// Every filter, in menu order.
    pub const ALL: [FilterKind; 10] = [
        FilterKind::Grayscale,
        FilterKind::Sepia,
        FilterKind::Invert,
        FilterKind::Blur,
        FilterKind::Threshold,
        FilterKind::Cartoon,
        FilterKind::Edges,
        FilterKind::Saturate,
        FilterKind::Pixelate,
        FilterKind::Sharpen,
    ];

    /// The filter's user-facing name.
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Invert => "invert",
            FilterKind::Blur => "blur",
            FilterKind::Threshold => "threshold",
            FilterKind::Cartoon => "cartoon",
            FilterKind::Edges => "edges",
            FilterKind::Saturate => "saturate",
            FilterKind::Pixelate => "pixelate",
            FilterKind::Sharpen => "sharpen",
        }
    }

    /// Applies the filter, returning a new image.
    ///
    /// Filters that need a specific channel layout reject other inputs
    /// with [`OpsError::Unsupported`]; the input is never modified.
    pub fn apply(&self, img: &ImageBuf) -> OpsResult<ImageBuf> {
        trace!(filter = self.name(), w = img.width(), h = img.height(), "apply");

        match self {
            FilterKind::Grayscale => color::grayscale(img),
            FilterKind::Sepia => color::sepia(img),
            FilterKind::Invert => Ok(color::invert(img)),
            FilterKind::Blur => {
                let kernel = Kernel::gaussian(
                    BLUR_KERNEL_SIZE,
                    gaussian_sigma_for(BLUR_KERNEL_SIZE),
                );
                convolve_u8(img, &kernel)
            }
            FilterKind::Threshold => color::threshold(img, THRESHOLD_LEVEL),
            FilterKind::Cartoon => {
                let (w, h, c) = layout(img);
                let smoothed =
                    kernel::median_blur(&img.to_f32(), w, h, c, CARTOON_MEDIAN_RADIUS)?;
                let smoothed =
                    ImageBuf::from_f32(img.width(), img.height(), img.channels(), &smoothed)
                        .map_err(|e| OpsError::InvalidDimensions(e.to_string()))?;
                color::bitwise_and(&smoothed, img)
            }
            FilterKind::Edges => {
                let gray = color::grayscale(img)?;
                edge::canny(&gray, EDGE_LOW, EDGE_HIGH)
            }
            FilterKind::Saturate => Ok(color::saturate(img, SATURATE_GAIN)),
            FilterKind::Pixelate => {
                let (w, h, c) = layout(img);
                let small = resize_f32(
                    &img.to_f32(),
                    w,
                    h,
                    c,
                    PIXELATE_GRID,
                    PIXELATE_GRID,
                    ResampleFilter::Bilinear,
                )?;
                let restored = resize_f32(
                    &small,
                    PIXELATE_GRID,
                    PIXELATE_GRID,
                    c,
                    w,
                    h,
                    ResampleFilter::Bilinear,
                )?;
                ImageBuf::from_f32(img.width(), img.height(), img.channels(), &restored)
                    .map_err(|e| OpsError::InvalidDimensions(e.to_string()))
            }
            FilterKind::Sharpen => convolve_u8(img, &Kernel::sharpen(1.0)),
        }
    }
}

fn layout(img: &ImageBuf) -> (usize, usize, usize) {
    (
        img.width() as usize,
        img.height() as usize,
        img.channels() as usize,
    )
}

/// Convolves an 8-bit image through f32 and clamps back.
fn convolve_u8(img: &ImageBuf, kernel: &Kernel) -> OpsResult<ImageBuf> {
    let (w, h, c) = layout(img);
    let filtered = kernel::convolve(&img.to_f32(), w, h, c, kernel)?;
    ImageBuf::from_f32(img.width(), img.height(), img.channels(), &filtered)
        .map_err(|e| OpsError::InvalidDimensions(e.to_string()))
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grayscale" => Ok(FilterKind::Grayscale),
            "sepia" => Ok(FilterKind::Sepia),
            "invert" => Ok(FilterKind::Invert),
            "blur" => Ok(FilterKind::Blur),
            "threshold" => Ok(FilterKind::Threshold),
            "cartoon" => Ok(FilterKind::Cartoon),
            "edges" => Ok(FilterKind::Edges),
            "saturate" => Ok(FilterKind::Saturate),
            "pixelate" => Ok(FilterKind::Pixelate),
            "sharpen" => Ok(FilterKind::Sharpen),
            other => Err(OpsError::UnknownFilter(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image() -> ImageBuf {
        let mut img = ImageBuf::filled(100, 100, &[40, 90, 160]);
        // Break up the flat field so spatial filters have structure.
        for y in 0..100 {
            for x in 0..50 {
                img.set_pixel(x, y, &[220, 30, 10]);
            }
        }
        img
    }

    #[test]
    fn test_every_filter_output_layout() {
        let img = test_image();
        for kind in FilterKind::ALL {
            let out = kind.apply(&img).unwrap();
            assert_eq!(out.dimensions(), (100, 100), "{}", kind);
            let expected_channels = match kind {
                FilterKind::Grayscale | FilterKind::Threshold | FilterKind::Edges => 1,
                _ => 3,
            };
            assert_eq!(out.channels(), expected_channels, "{}", kind);
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for kind in FilterKind::ALL {
            assert_eq!(kind.name().parse::<FilterKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("  SEPIA ".parse::<FilterKind>().unwrap(), FilterKind::Sepia);
    }

    #[test]
    fn test_parse_unknown_name() {
        let err = "posterize".parse::<FilterKind>().unwrap_err();
        assert!(matches!(err, OpsError::UnknownFilter(_)));
        assert!(err.to_string().contains("posterize"));
    }

    #[test]
    fn test_invert_every_pixel() {
        let img = ImageBuf::filled(50, 50, &[12, 34, 56]);
        let out = FilterKind::Invert.apply(&img).unwrap();
        for px in out.data().chunks_exact(3) {
            assert_eq!(px, &[255 - 12, 255 - 34, 255 - 56]);
        }
    }

    #[test]
    fn test_threshold_values_binary() {
        let out = FilterKind::Threshold.apply(&test_image()).unwrap();
        assert!(out.data().iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn test_cartoon_never_brightens() {
        // AND with the original can only clear bits.
        let img = test_image();
        let out = FilterKind::Cartoon.apply(&img).unwrap();
        for (o, i) in out.data().iter().zip(img.data()) {
            assert_eq!(o & i, *o);
        }
    }

    #[test]
    fn test_channel_gated_filters_reject_gray() {
        let gray = ImageBuf::filled(10, 10, &[128]);
        for kind in [
            FilterKind::Grayscale,
            FilterKind::Sepia,
            FilterKind::Threshold,
            FilterKind::Edges,
        ] {
            assert!(
                matches!(kind.apply(&gray), Err(OpsError::Unsupported(_))),
                "{}",
                kind
            );
        }
    }

    #[test]
    fn test_unchannelled_filters_accept_gray_and_rgba() {
        let gray = ImageBuf::filled(30, 30, &[128]);
        let rgba = ImageBuf::filled(30, 30, &[10, 20, 30, 255]);
        for kind in [
            FilterKind::Invert,
            FilterKind::Blur,
            FilterKind::Cartoon,
            FilterKind::Saturate,
            FilterKind::Pixelate,
            FilterKind::Sharpen,
        ] {
            assert_eq!(kind.apply(&gray).unwrap().channels(), 1, "{}", kind);
            assert_eq!(kind.apply(&rgba).unwrap().channels(), 4, "{}", kind);
        }
    }

    #[test]
    fn test_pixelate_flattens_detail() {
        let out = FilterKind::Pixelate.apply(&test_image()).unwrap();
        assert_eq!(out.dimensions(), (100, 100));
        // A 100-wide image squeezed through 20 cells cannot keep a
        // single-pixel-sharp boundary; neighboring columns near the seam
        // now differ gradually.
        let a = out.pixel(49, 50)[0] as i32;
        let b = out.pixel(54, 50)[0] as i32;
        assert!((a - b).abs() < 200);
    }
}
