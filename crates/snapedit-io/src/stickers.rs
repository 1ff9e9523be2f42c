//! Sticker catalog loading.
//!
//! Stickers are transparent PNG files collected from a directory. The
//! directory is created when missing so a first run leaves the user an
//! obvious place to drop files into. Files that fail to decode are
//! skipped rather than aborting the whole catalog.

use crate::{png, IoResult};
use snapedit_core::ImageBuf;
use std::path::Path;
use tracing::debug;

/// A named catalog entry.
#[derive(Debug, Clone)]
pub struct Sticker {
    /// Display name, taken from the file stem.
    pub name: String,
    /// Decoded image. Compositing requires RGBA; other layouts are
    /// rejected at overlay time, not here.
    pub image: ImageBuf,
}

/// Loads every `.png` file in `dir` (case-insensitive extension match),
/// sorted by file name.
///
/// Creates the directory if it does not exist and returns an empty
/// catalog in that case.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or read. Files
/// that fail to decode are logged and skipped.
pub fn load_stickers<P: AsRef<Path>>(dir: P) -> IoResult<Vec<Sticker>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        debug!(path = %dir.display(), "sticker directory missing, creating");
        std::fs::create_dir_all(dir)?;
        return Ok(Vec::new());
    }

    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("png"))
        })
        .collect();
    paths.sort();

    let mut catalog = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sticker")
            .to_string();
        match png::read(&path) {
            Ok(image) => {
                debug!(name = %name, width = image.width(), height = image.height(), "loaded sticker");
                catalog.push(Sticker { name, image });
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping unreadable sticker");
            }
        }
    }

    Ok(catalog)
}
