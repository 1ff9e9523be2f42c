//! Presentation seam for the interactive session.
//!
//! The session never talks to a screen directly. Everything a user sees
//! goes through a [`Frontend`], so tests can substitute a recording
//! implementation and alternative frontends (a windowed preview, say)
//! can slot in without touching the session loop.

use snapedit_core::{ImageBuf, Rect};
use snapedit_ops::resize::{resize_f32, ResampleFilter};
use std::io::{self, BufRead, Write};

/// How the session shows images and asks for sticker placement.
pub trait Frontend {
    /// Presents the current image to the user.
    fn display(&mut self, image: &ImageBuf, out: &mut dyn Write) -> io::Result<()>;

    /// Asks the user to pick a placement region on `image`. Only the
    /// top-left corner is used for sticker placement.
    fn select_region(
        &mut self,
        image: &ImageBuf,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> io::Result<Rect>;
}

/// Terminal frontend that previews images with ANSI half-block cells.
///
/// Each character cell covers two vertically stacked pixels: the upper
/// one as the foreground color of `▀`, the lower one as the background.
/// Truecolor escape codes are near-universal in modern terminals.
pub struct ConsoleFrontend {
    preview_width: u32,
}

impl ConsoleFrontend {
    /// Default preview width in character cells.
    pub const DEFAULT_WIDTH: u32 = 64;

    /// Creates a frontend rendering previews `preview_width` cells wide.
    pub fn new(preview_width: u32) -> Self {
        Self {
            preview_width: preview_width.max(1),
        }
    }

    fn preview_size(&self, image: &ImageBuf) -> (u32, u32) {
        let (w, h) = image.dimensions();
        let dst_w = self.preview_width.min(w).max(1);
        // Terminal cells are roughly twice as tall as wide, but each cell
        // already holds two pixel rows, so plain proportional scaling
        // keeps the aspect about right.
        let dst_h = ((h as u64 * dst_w as u64) / w as u64).max(1) as u32;
        // Even row count so every cell has both halves.
        let dst_h = if dst_h % 2 == 1 { dst_h + 1 } else { dst_h };
        (dst_w, dst_h)
    }
}

impl Default for ConsoleFrontend {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH)
    }
}

impl Frontend for ConsoleFrontend {
    fn display(&mut self, image: &ImageBuf, out: &mut dyn Write) -> io::Result<()> {
        if image.is_empty() {
            writeln!(out, "(empty image)")?;
            return out.flush();
        }
        let (dst_w, dst_h) = self.preview_size(image);
        let channels = image.channels() as usize;

        let samples = resize_f32(
            &image.to_f32(),
            image.width() as usize,
            image.height() as usize,
            channels,
            dst_w as usize,
            dst_h as usize,
            ResampleFilter::Bilinear,
        )
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

        let rgb_at = |x: u32, y: u32| -> (u8, u8, u8) {
            let idx = (y as usize * dst_w as usize + x as usize) * channels;
            let px = &samples[idx..idx + channels];
            let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            match channels {
                1 => {
                    let g = to_u8(px[0]);
                    (g, g, g)
                }
                _ => (to_u8(px[0]), to_u8(px[1]), to_u8(px[2])),
            }
        };

        for row in (0..dst_h).step_by(2) {
            for col in 0..dst_w {
                let (tr, tg, tb) = rgb_at(col, row);
                let (br, bg, bb) = rgb_at(col, row + 1);
                write!(
                    out,
                    "\x1b[38;2;{tr};{tg};{tb}m\x1b[48;2;{br};{bg};{bb}m\u{2580}"
                )?;
            }
            writeln!(out, "\x1b[0m")?;
        }
        writeln!(
            out,
            "{}x{} ({} channel{})",
            image.width(),
            image.height(),
            image.channels(),
            if image.channels() == 1 { "" } else { "s" }
        )?;
        out.flush()
    }

    fn select_region(
        &mut self,
        image: &ImageBuf,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> io::Result<Rect> {
        write!(
            out,
            "Placement x y (0..{} 0..{}): ",
            image.width(),
            image.height()
        )?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed during placement",
            ));
        }

        let mut parts = line.split_whitespace();
        let parse = |s: Option<&str>| -> io::Result<u32> {
            s.and_then(|v| v.parse().ok()).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "expected two non-negative integers",
                )
            })
        };
        let x = parse(parts.next())?;
        let y = parse(parts.next())?;

        Ok(Rect::new(x, y, 0, 0))
    }
}
