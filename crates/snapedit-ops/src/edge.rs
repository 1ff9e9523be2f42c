//! Canny-style edge detection.
//!
//! The edges filter converts to grayscale and runs the classic three-stage
//! pipeline: Sobel gradients, non-maximum suppression along the gradient
//! direction, then hysteresis between the low and high thresholds. Gradient
//! magnitude is the L1 norm `|gx| + |gy|`, matching the thresholds the
//! filter contract states (low = 100, high = 200 on 8-bit magnitudes).

use crate::{OpsError, OpsResult};
use snapedit_core::ImageBuf;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Sobel kernels, horizontal and vertical.
const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Detects edges in a 1-channel image.
///
/// Returns a 1-channel image where edge pixels are 255 and everything else
/// is 0. `low` and `high` are the hysteresis thresholds on the gradient
/// magnitude.
pub fn canny(gray: &ImageBuf, low: f32, high: f32) -> OpsResult<ImageBuf> {
    if gray.channels() != 1 {
        return Err(OpsError::Unsupported(format!(
            "edge detection needs a 1-channel image, got {} channels",
            gray.channels()
        )));
    }
    if low > high {
        return Err(OpsError::InvalidParameter(format!(
            "low threshold {} exceeds high threshold {}",
            low, high
        )));
    }

    let width = gray.width() as usize;
    let height = gray.height() as usize;
    trace!(width, height, low, high, "canny");

    if width < 3 || height < 3 {
        // Too small for a 3x3 gradient; no edges by definition.
        return ImageBuf::new(gray.width(), gray.height(), 1)
            .map_err(|e| OpsError::InvalidDimensions(e.to_string()));
    }

    let (gx, gy) = sobel(gray.data(), width, height);

    // L1 gradient magnitude.
    let mag: Vec<f32> = gx
        .iter()
        .zip(&gy)
        .map(|(&x, &y)| (x.abs() + y.abs()) as f32)
        .collect();

    let thin = suppress_non_maxima(&mag, &gx, &gy, width, height);
    let edges = hysteresis(&thin, width, height, low, high);

    ImageBuf::from_data(gray.width(), gray.height(), 1, edges)
        .map_err(|e| OpsError::InvalidDimensions(e.to_string()))
}

/// Sobel gradients over an 8-bit single-channel buffer.
///
/// The one-pixel border keeps zero gradients.
fn sobel(src: &[u8], width: usize, height: usize) -> (Vec<i32>, Vec<i32>) {
    let mut gx = vec![0i32; width * height];
    let mut gy = vec![0i32; width * height];

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sx = 0i32;
            let mut sy = 0i32;

            for ky in 0..3 {
                for kx in 0..3 {
                    let v = src[(y + ky - 1) * width + (x + kx - 1)] as i32;
                    sx += v * SOBEL_X[ky][kx];
                    sy += v * SOBEL_Y[ky][kx];
                }
            }

            gx[y * width + x] = sx;
            gy[y * width + x] = sy;
        }
    }

    (gx, gy)
}

/// Keeps a pixel only if it is a local maximum along its gradient
/// direction, quantized to the four canonical orientations.
fn suppress_non_maxima(
    mag: &[f32],
    gx: &[i32],
    gy: &[i32],
    width: usize,
    height: usize,
) -> Vec<f32> {
    let mut out = vec![0.0f32; width * height];

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let idx = y * width + x;
            let m = mag[idx];
            if m == 0.0 {
                continue;
            }

            let angle = (gy[idx] as f32).atan2(gx[idx] as f32).to_degrees();
            let angle = if angle < 0.0 { angle + 180.0 } else { angle };

            // Neighbor pair along the gradient direction.
            let (a, b) = if !(22.5..157.5).contains(&angle) {
                (mag[idx - 1], mag[idx + 1])
            } else if angle < 67.5 {
                (mag[idx - width + 1], mag[idx + width - 1])
            } else if angle < 112.5 {
                (mag[idx - width], mag[idx + width])
            } else {
                (mag[idx - width - 1], mag[idx + width + 1])
            };

            if m >= a && m >= b {
                out[idx] = m;
            }
        }
    }

    out
}

/// Double-threshold hysteresis: strong pixels seed a flood fill that
/// promotes connected weak pixels.
fn hysteresis(mag: &[f32], width: usize, height: usize, low: f32, high: f32) -> Vec<u8> {
    let mut out = vec![0u8; width * height];
    let mut stack: Vec<usize> = Vec::new();

    for (idx, &m) in mag.iter().enumerate() {
        if m >= high && out[idx] == 0 {
            out[idx] = 255;
            stack.push(idx);

            while let Some(cur) = stack.pop() {
                let cx = cur % width;
                let cy = cur / width;

                for dy in -1i32..=1 {
                    for dx in -1i32..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = cx as i32 + dx;
                        let ny = cy as i32 + dy;
                        if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                            continue;
                        }
                        let nidx = ny as usize * width + nx as usize;
                        if out[nidx] == 0 && mag[nidx] >= low {
                            out[nidx] = 255;
                            stack.push(nidx);
                        }
                    }
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canny_rejects_color_input() {
        let img = ImageBuf::filled(8, 8, &[0, 0, 0]);
        assert!(matches!(
            canny(&img, 100.0, 200.0),
            Err(OpsError::Unsupported(_))
        ));
    }

    #[test]
    fn test_canny_flat_image_has_no_edges() {
        let img = ImageBuf::filled(16, 16, &[128]);
        let out = canny(&img, 100.0, 200.0).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_canny_finds_step_edge() {
        // Left half black, right half white.
        let mut img = ImageBuf::new(16, 16, 1).unwrap();
        for y in 0..16 {
            for x in 8..16 {
                img.set_pixel(x, y, &[255]);
            }
        }
        let out = canny(&img, 100.0, 200.0).unwrap();
        assert_eq!(out.channels(), 1);
        assert_eq!(out.dimensions(), (16, 16));
        // Some edge pixels fire along the boundary column.
        let hits = out.data().iter().filter(|&&v| v == 255).count();
        assert!(hits > 0);
        // Output stays binary.
        assert!(out.data().iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn test_canny_tiny_image() {
        let img = ImageBuf::filled(2, 2, &[255]);
        let out = canny(&img, 100.0, 200.0).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_canny_rejects_inverted_thresholds() {
        let img = ImageBuf::filled(8, 8, &[0]);
        assert!(canny(&img, 200.0, 100.0).is_err());
    }
}
