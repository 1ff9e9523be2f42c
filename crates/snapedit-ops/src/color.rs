//! Per-pixel color transforms.
//!
//! These are the elementwise pieces the filter dispatch is built from:
//! luminance conversion, the sepia channel mix, inversion, binary
//! thresholding, linear gain, and the bitwise AND the cartoon filter needs.
//!
//! Transforms that read three color channels (grayscale, sepia, threshold)
//! reject other layouts with [`OpsError::Unsupported`]; the rest work on any
//! channel count.

use crate::{OpsError, OpsResult};
use snapedit_core::ImageBuf;

/// Rec.601 luma weights for RGB-to-gray conversion.
pub const LUMA_R: f32 = 0.299;
/// Green weight.
pub const LUMA_G: f32 = 0.587;
/// Blue weight.
pub const LUMA_B: f32 = 0.114;

/// Sepia channel-mixing matrix, rows in R, G, B output order.
const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

fn require_channels(img: &ImageBuf, expected: u8, op: &str) -> OpsResult<()> {
    if img.channels() != expected {
        return Err(OpsError::Unsupported(format!(
            "{} needs a {}-channel image, got {} channels",
            op,
            expected,
            img.channels()
        )));
    }
    Ok(())
}

/// Converts a 3-channel image to 1-channel luminance.
pub fn grayscale(img: &ImageBuf) -> OpsResult<ImageBuf> {
    require_channels(img, 3, "grayscale")?;

    let gray: Vec<u8> = img
        .data()
        .chunks_exact(3)
        .map(|px| {
            let y = LUMA_R * px[0] as f32 + LUMA_G * px[1] as f32 + LUMA_B * px[2] as f32;
            y.round().min(255.0) as u8
        })
        .collect();

    ImageBuf::from_data(img.width(), img.height(), 1, gray)
        .map_err(|e| OpsError::InvalidDimensions(e.to_string()))
}

/// Applies the sepia channel-mixing matrix to a 3-channel image.
pub fn sepia(img: &ImageBuf) -> OpsResult<ImageBuf> {
    require_channels(img, 3, "sepia")?;

    let mut out = Vec::with_capacity(img.sample_count());
    for px in img.data().chunks_exact(3) {
        let (r, g, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
        for row in &SEPIA {
            let v = row[0] * r + row[1] * g + row[2] * b;
            out.push(v.round().clamp(0.0, 255.0) as u8);
        }
    }

    ImageBuf::from_data(img.width(), img.height(), 3, out)
        .map_err(|e| OpsError::InvalidDimensions(e.to_string()))
}

/// Inverts every sample: `255 - v`.
pub fn invert(img: &ImageBuf) -> ImageBuf {
    let data: Vec<u8> = img.data().iter().map(|&v| 255 - v).collect();
    // Length and channels carried over from a valid buffer.
    ImageBuf::from_data(img.width(), img.height(), img.channels(), data)
        .expect("invert preserves layout")
}

/// Grayscale conversion followed by a binary threshold.
///
/// Values above `level` become 255, everything else 0. Output is
/// 1-channel.
pub fn threshold(img: &ImageBuf, level: u8) -> OpsResult<ImageBuf> {
    let gray = grayscale(img)?;
    let data: Vec<u8> = gray
        .data()
        .iter()
        .map(|&v| if v > level { 255 } else { 0 })
        .collect();
    ImageBuf::from_data(gray.width(), gray.height(), 1, data)
        .map_err(|e| OpsError::InvalidDimensions(e.to_string()))
}

/// Linear gain with saturation: `clamp(round(gain * v))`.
pub fn saturate(img: &ImageBuf, gain: f32) -> ImageBuf {
    let data: Vec<u8> = img
        .data()
        .iter()
        .map(|&v| (gain * v as f32).round().clamp(0.0, 255.0) as u8)
        .collect();
    ImageBuf::from_data(img.width(), img.height(), img.channels(), data)
        .expect("saturate preserves layout")
}

/// Elementwise bitwise AND of two images with identical layout.
pub fn bitwise_and(a: &ImageBuf, b: &ImageBuf) -> OpsResult<ImageBuf> {
    if a.dimensions() != b.dimensions() || a.channels() != b.channels() {
        return Err(OpsError::InvalidDimensions(format!(
            "bitwise_and layout mismatch: {}x{}x{} vs {}x{}x{}",
            a.width(),
            a.height(),
            a.channels(),
            b.width(),
            b.height(),
            b.channels()
        )));
    }
    let data: Vec<u8> = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(&x, &y)| x & y)
        .collect();
    ImageBuf::from_data(a.width(), a.height(), a.channels(), data)
        .map_err(|e| OpsError::InvalidDimensions(e.to_string()))
}
