//! PNG format support.
//!
//! The sticker catalog depends on PNG round-tripping RGBA intact, so reads
//! preserve the decoded channel count instead of normalizing everything to
//! RGB. Palette and sub-8-bit images are expanded and 16-bit images are
//! narrowed, so decoded data is always 8-bit gray, gray+alpha, RGB or RGBA;
//! gray+alpha is widened to RGBA because the editor has no 2-channel
//! layout.

use crate::{IoError, IoResult};
use snapedit_core::ImageBuf;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Reads a PNG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageBuf> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::normalize_to_color8());

    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let width = info.width;
    let height = info.height;
    let pixels = &buf[..info.buffer_size()];

    let (channels, data) = match info.color_type {
        png::ColorType::Grayscale => (1, pixels.to_vec()),
        png::ColorType::Rgb => (3, pixels.to_vec()),
        png::ColorType::Rgba => (4, pixels.to_vec()),
        png::ColorType::GrayscaleAlpha => {
            // Widen to RGBA, keeping the alpha.
            let rgba: Vec<u8> = pixels
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect();
            (4, rgba)
        }
        other => {
            return Err(IoError::UnsupportedLayout(format!(
                "unexpected color type after expansion: {:?}",
                other
            )));
        }
    };

    ImageBuf::from_data(width, height, channels, data)
        .map_err(|e| IoError::DecodeError(e.to_string()))
}

/// Writes an image as an 8-bit PNG.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageBuf) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);

    let color_type = match image.channels() {
        1 => png::ColorType::Grayscale,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => {
            return Err(IoError::EncodeError(format!(
                "unsupported channel count: {}",
                n
            )));
        }
    };

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");

        let mut img = ImageBuf::filled(16, 12, &[200, 100, 50]);
        img.set_pixel(3, 4, &[1, 2, 3]);
        write(&path, &img).unwrap();

        let back = read(&path).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_round_trip_rgba_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.png");

        let img = ImageBuf::filled(10, 10, &[9, 8, 7, 128]);
        write(&path, &img).unwrap();

        let back = read(&path).unwrap();
        assert_eq!(back.channels(), 4);
        assert_eq!(back.pixel(0, 0), &[9, 8, 7, 128]);
    }

    #[test]
    fn test_round_trip_grayscale_stays_single_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");

        let img = ImageBuf::filled(5, 5, &[77]);
        write(&path, &img).unwrap();

        let back = read(&path).unwrap();
        assert_eq!(back.channels(), 1);
        assert_eq!(back.pixel(2, 2), &[77]);
    }

    #[test]
    fn test_read_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(read(&path), Err(IoError::DecodeError(_))));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(read("/does/not/exist.png"), Err(IoError::Io(_))));
    }
}
