//! # snapedit-io
//!
//! Image I/O for the snapedit editor: PNG and JPEG codecs plus the sticker
//! catalog loader.
//!
//! The editor works in 8-bit; reads narrow 16-bit sources down and writes
//! always emit 8-bit files. PNG reads preserve the channel count so RGBA
//! stickers keep their alpha and grayscale images stay single-channel.
//!
//! # Example
//!
//! ```rust,ignore
//! use snapedit_io::{read, write};
//!
//! let image = read("photo.jpg")?;
//! write("edited_image.png", &image)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod detect;
pub mod jpeg;
pub mod png;
pub mod stickers;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use stickers::{load_stickers, Sticker};

use snapedit_core::ImageBuf;
use std::path::Path;

/// Reads an image from a file, detecting the format from the extension.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the extension is not a
/// supported format, or decoding fails.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageBuf> {
    let path = path.as_ref();
    match Format::from_extension(path) {
        Format::Png => png::read(path),
        Format::Jpeg => jpeg::read(path),
        Format::Unknown => Err(IoError::UnsupportedFormat(extension_of(path))),
    }
}

/// Writes an image to a file, detecting the format from the extension.
///
/// # Errors
///
/// Returns an error if the file cannot be created, the extension is not a
/// supported format, or the image layout cannot be encoded.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageBuf) -> IoResult<()> {
    let path = path.as_ref();
    match Format::from_extension(path) {
        Format::Png => png::write(path, image),
        Format::Jpeg => jpeg::write(path, image),
        Format::Unknown => Err(IoError::UnsupportedFormat(extension_of(path))),
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_unknown_extension() {
        let err = read("image.webp").unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(ref e) if e == "webp"));
    }

    #[test]
    fn test_write_unknown_extension() {
        let img = ImageBuf::filled(2, 2, &[0, 0, 0]);
        assert!(write("out.tiff", &img).is_err());
    }

    #[test]
    fn test_png_round_trip_via_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rt.png");

        let img = ImageBuf::filled(8, 6, &[10, 20, 30, 200]);
        write(&path, &img).unwrap();
        let back = read(&path).unwrap();
        assert_eq!(back, img);
    }
}
