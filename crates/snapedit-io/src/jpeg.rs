//! JPEG format support.
//!
//! Decodes RGB and grayscale JPEGs; CMYK sources are converted to RGB.
//! Writing encodes at quality 90. JPEG has no alpha channel, so RGBA
//! images are flattened to RGB on write.

use crate::{IoError, IoResult};
use snapedit_core::ImageBuf;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const QUALITY: u8 = 90;

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageBuf> {
    let file = File::open(path.as_ref())?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let (channels, data) = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => (3, pixels),
        jpeg_decoder::PixelFormat::L8 => (1, pixels),
        jpeg_decoder::PixelFormat::L16 => {
            // Narrow to 8-bit via the high byte.
            let gray: Vec<u8> = pixels.chunks_exact(2).map(|l16| l16[0]).collect();
            (1, gray)
        }
        jpeg_decoder::PixelFormat::CMYK32 => {
            let rgb: Vec<u8> = pixels
                .chunks_exact(4)
                .flat_map(|cmyk| {
                    let c = cmyk[0] as f32 / 255.0;
                    let m = cmyk[1] as f32 / 255.0;
                    let y = cmyk[2] as f32 / 255.0;
                    let k = cmyk[3] as f32 / 255.0;

                    let r = ((1.0 - c) * (1.0 - k) * 255.0) as u8;
                    let g = ((1.0 - m) * (1.0 - k) * 255.0) as u8;
                    let b = ((1.0 - y) * (1.0 - k) * 255.0) as u8;

                    [r, g, b]
                })
                .collect();
            (3, rgb)
        }
    };

    ImageBuf::from_data(width, height, channels, data)
        .map_err(|e| IoError::DecodeError(e.to_string()))
}

/// Writes an image as a JPEG file at quality 90.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageBuf) -> IoResult<()> {
    use jpeg_encoder::{ColorType, Encoder};

    let (color_type, pixel_data): (ColorType, Vec<u8>) = match image.channels() {
        1 => (ColorType::Luma, image.data().to_vec()),
        3 => (ColorType::Rgb, image.data().to_vec()),
        4 => {
            // Flatten the alpha away.
            let rgb = image
                .data()
                .chunks_exact(4)
                .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
                .collect();
            (ColorType::Rgb, rgb)
        }
        n => {
            return Err(IoError::EncodeError(format!(
                "unsupported channel count: {}",
                n
            )));
        }
    };

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, QUALITY);
    encoder
        .encode(
            &pixel_data,
            image.width() as u16,
            image.height() as u16,
            color_type,
        )
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    std::fs::write(path.as_ref(), buffer)?;
    Ok(())
}
