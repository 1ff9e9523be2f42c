//! Sticker compositing.
//!
//! A sticker is a 4-channel image blended over a 3-channel base at an
//! integer offset. The alpha channel is normalized to [0.0, 1.0] and each
//! color channel inside the placement rectangle becomes
//! `alpha * sticker + (1 - alpha) * base`, written back in place. The
//! sticker is never scaled; placement that would leave the base image is
//! rejected before any pixel is touched.

use crate::{OpsError, OpsResult};
use snapedit_core::{ImageBuf, Rect};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Blends `sticker` onto `base` at top-left offset (x, y).
///
/// Validation, in order: the sticker must have 4 channels, the base must
/// have 3, and the placement rectangle must lie entirely within the base.
/// On any failure the base is left untouched.
///
/// # Example
///
/// ```rust
/// use snapedit_core::ImageBuf;
/// use snapedit_ops::composite::overlay_sticker;
///
/// let mut base = ImageBuf::new(30, 30, 3).unwrap();
/// let sticker = ImageBuf::filled(10, 10, &[200, 50, 25, 255]);
/// overlay_sticker(&mut base, &sticker, 5, 5).unwrap();
/// assert_eq!(base.pixel(5, 5), &[200, 50, 25]);
/// assert_eq!(base.pixel(0, 0), &[0, 0, 0]);
/// ```
pub fn overlay_sticker(
    base: &mut ImageBuf,
    sticker: &ImageBuf,
    x: u32,
    y: u32,
) -> OpsResult<()> {
    if sticker.channels() != 4 {
        return Err(OpsError::InvalidSticker {
            got: sticker.channels(),
        });
    }
    if base.channels() != 3 {
        return Err(OpsError::Unsupported(format!(
            "sticker placement needs a 3-channel base image, got {} channels",
            base.channels()
        )));
    }

    let placement = Rect::new(x, y, sticker.width(), sticker.height());
    if !base.bounds().contains_rect(&placement) {
        return Err(OpsError::OutOfBounds {
            x,
            y,
            sticker_w: sticker.width(),
            sticker_h: sticker.height(),
            base_w: base.width(),
            base_h: base.height(),
        });
    }

    trace!(
        x,
        y,
        sticker_w = sticker.width(),
        sticker_h = sticker.height(),
        "overlay_sticker"
    );

    let base_w = base.width() as usize;
    let data = base.data_mut();

    for sy in 0..sticker.height() {
        for sx in 0..sticker.width() {
            let px = sticker.pixel(sx, sy);
            let alpha = px[3] as f32 / 255.0;

            let offset = ((y + sy) as usize * base_w + (x + sx) as usize) * 3;
            for c in 0..3 {
                let blended = alpha * px[c] as f32 + (1.0 - alpha) * data[offset + c] as f32;
                data[offset + c] = blended.round() as u8;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque_sticker(w: u32, h: u32, rgb: [u8; 3]) -> ImageBuf {
        ImageBuf::filled(w, h, &[rgb[0], rgb[1], rgb[2], 255])
    }

    #[test]
    fn test_opaque_sticker_replaces_rectangle() {
        let mut base = ImageBuf::new(30, 30, 3).unwrap();
        let sticker = opaque_sticker(10, 10, [200, 50, 25]);

        overlay_sticker(&mut base, &sticker, 5, 5).unwrap();

        for y in 0..30 {
            for x in 0..30 {
                let inside = (5..15).contains(&x) && (5..15).contains(&y);
                let expected: &[u8] = if inside { &[200, 50, 25] } else { &[0, 0, 0] };
                assert_eq!(base.pixel(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_transparent_sticker_changes_nothing() {
        let mut base = ImageBuf::filled(20, 20, &[9, 9, 9]);
        let before = base.clone();
        let sticker = ImageBuf::filled(5, 5, &[255, 255, 255, 0]);

        overlay_sticker(&mut base, &sticker, 0, 0).unwrap();
        assert_eq!(base, before);
    }

    #[test]
    fn test_half_alpha_blends() {
        let mut base = ImageBuf::filled(4, 4, &[0, 0, 0]);
        // Alpha 128 is 0.50196 of 255.
        let sticker = ImageBuf::filled(2, 2, &[200, 100, 50, 128]);

        overlay_sticker(&mut base, &sticker, 1, 1).unwrap();
        assert_eq!(base.pixel(1, 1), &[100, 50, 25]);
        assert_eq!(base.pixel(0, 0), &[0, 0, 0]);
    }

    #[test]
    fn test_rejects_three_channel_sticker() {
        let mut base = ImageBuf::new(20, 20, 3).unwrap();
        let before = base.clone();
        let not_a_sticker = ImageBuf::filled(5, 5, &[1, 2, 3]);

        let err = overlay_sticker(&mut base, &not_a_sticker, 0, 0).unwrap_err();
        assert!(matches!(err, OpsError::InvalidSticker { got: 3 }));
        assert_eq!(base, before);
    }

    #[test]
    fn test_rejects_gray_base() {
        let mut base = ImageBuf::filled(20, 20, &[128]);
        let sticker = opaque_sticker(5, 5, [1, 2, 3]);
        assert!(matches!(
            overlay_sticker(&mut base, &sticker, 0, 0),
            Err(OpsError::Unsupported(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_bounds_placement() {
        let mut base = ImageBuf::new(30, 30, 3).unwrap();
        let before = base.clone();
        let sticker = opaque_sticker(10, 10, [1, 2, 3]);

        // x + sticker width exceeds base width.
        let err = overlay_sticker(&mut base, &sticker, 25, 5).unwrap_err();
        assert!(matches!(err, OpsError::OutOfBounds { .. }));
        assert_eq!(base, before);

        assert!(overlay_sticker(&mut base, &sticker, 5, 25).is_err());
    }

    #[test]
    fn test_edge_touching_placement_is_valid() {
        let mut base = ImageBuf::new(30, 30, 3).unwrap();
        let sticker = opaque_sticker(10, 10, [7, 7, 7]);
        overlay_sticker(&mut base, &sticker, 20, 20).unwrap();
        assert_eq!(base.pixel(29, 29), &[7, 7, 7]);
    }
}
