//! Interactive editing session.
//!
//! A session moves through three states: waiting for an image source,
//! editing a loaded image, and terminated. While editing, commands are
//! read one line at a time; anything that goes wrong with a single
//! command is reported and the loop continues, so only source
//! acquisition failures and closed input end the session early.

use crate::camera;
use crate::frontend::Frontend;
use anyhow::{Context, Result};
use snapedit_core::ImageBuf;
use snapedit_io::Sticker;
use snapedit_ops::{overlay_sticker, FilterKind};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

const DEFAULT_SAVE_PATH: &str = "edited_image.png";

/// Where the session gets its initial image.
#[derive(Debug, Clone)]
pub enum SourceMode {
    /// Load from a file path.
    File(PathBuf),
    /// Capture a single webcam frame.
    Camera,
    /// Ask the user to choose interactively.
    Prompt,
}

/// One interactive editing session over a command stream.
pub struct Session<F, R, W> {
    frontend: F,
    input: R,
    output: W,
    stickers: Vec<Sticker>,
}

impl<F: Frontend, R: BufRead, W: Write> Session<F, R, W> {
    /// Creates a session reading commands from `input` and writing
    /// prompts and previews to `output`.
    pub fn new(frontend: F, input: R, output: W, stickers: Vec<Sticker>) -> Self {
        Self {
            frontend,
            input,
            output,
            stickers,
        }
    }

    /// Runs the session to completion.
    ///
    /// # Errors
    ///
    /// Fails if the initial image cannot be acquired or the terminal
    /// I/O itself breaks. Per-command failures are reported to the
    /// user instead.
    pub fn run(&mut self, source: SourceMode) -> Result<()> {
        let mut image = self.acquire(source)?;
        info!(
            width = image.width(),
            height = image.height(),
            channels = image.channels(),
            "image loaded"
        );

        loop {
            self.frontend.display(&image, &mut self.output)?;
            write!(self.output, "[S]ave  [F]ilter  s[T]icker  [Q]uit > ")?;
            self.output.flush()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => {
                    writeln!(self.output)?;
                    break;
                }
            };

            match line.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
                Some('s') => self.save(&image)?,
                Some('f') => self.apply_filter(&mut image)?,
                Some('t') => self.place_sticker(&mut image)?,
                Some('q') => break,
                Some(_) | None => {
                    writeln!(self.output, "Unknown command: {}", line.trim())?;
                }
            }
        }

        info!("session ended");
        Ok(())
    }

    fn acquire(&mut self, source: SourceMode) -> Result<ImageBuf> {
        match source {
            SourceMode::File(path) => snapedit_io::read(&path)
                .with_context(|| format!("failed to load {}", path.display())),
            SourceMode::Camera => camera::capture_frame(),
            SourceMode::Prompt => loop {
                writeln!(self.output, "1) Load image from file")?;
                writeln!(self.output, "2) Capture from camera")?;
                write!(self.output, "> ")?;
                self.output.flush()?;

                let line = self
                    .read_line()?
                    .context("input closed before an image source was chosen")?;
                match line.trim() {
                    "1" => {
                        write!(self.output, "Path: ")?;
                        self.output.flush()?;
                        let path = self
                            .read_line()?
                            .context("input closed before a path was given")?;
                        return self.acquire(SourceMode::File(PathBuf::from(path.trim())));
                    }
                    "2" => return self.acquire(SourceMode::Camera),
                    other => {
                        writeln!(self.output, "Please enter 1 or 2, not {:?}", other)?;
                    }
                }
            },
        }
    }

    fn save(&mut self, image: &ImageBuf) -> Result<()> {
        write!(
            self.output,
            "Save path (blank for {}): ",
            DEFAULT_SAVE_PATH
        )?;
        self.output.flush()?;

        let line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(()),
        };
        let trimmed = line.trim();
        let path = if trimmed.is_empty() {
            PathBuf::from(DEFAULT_SAVE_PATH)
        } else {
            PathBuf::from(trimmed)
        };

        match snapedit_io::write(&path, image) {
            Ok(()) => {
                info!(path = %path.display(), "image saved");
                writeln!(self.output, "Saved to {}", path.display())?;
            }
            Err(e) => {
                writeln!(self.output, "Could not save: {}", e)?;
            }
        }
        Ok(())
    }

    fn apply_filter(&mut self, image: &mut ImageBuf) -> Result<()> {
        let names: Vec<&str> = FilterKind::ALL.iter().map(|f| f.name()).collect();
        writeln!(self.output, "Filters: {}", names.join(", "))?;
        write!(self.output, "Filter name: ")?;
        self.output.flush()?;

        let line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(()),
        };

        let kind = match FilterKind::from_str(&line) {
            Ok(kind) => kind,
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(());
            }
        };

        match kind.apply(image) {
            Ok(filtered) => {
                info!(filter = kind.name(), "filter applied");
                *image = filtered;
            }
            Err(e) => {
                writeln!(self.output, "Could not apply {}: {}", kind, e)?;
            }
        }
        Ok(())
    }

    fn place_sticker(&mut self, image: &mut ImageBuf) -> Result<()> {
        if self.stickers.is_empty() {
            writeln!(self.output, "No stickers loaded.")?;
            return Ok(());
        }

        for (i, sticker) in self.stickers.iter().enumerate() {
            writeln!(
                self.output,
                "{}) {} ({}x{})",
                i + 1,
                sticker.name,
                sticker.image.width(),
                sticker.image.height()
            )?;
        }
        write!(self.output, "Sticker number: ")?;
        self.output.flush()?;

        let line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(()),
        };

        let index = match line.trim().parse::<usize>() {
            Ok(n) if (1..=self.stickers.len()).contains(&n) => n - 1,
            _ => {
                writeln!(self.output, "Not a valid sticker number: {}", line.trim())?;
                return Ok(());
            }
        };
        let sticker = self.stickers[index].image.clone();

        let region = match self
            .frontend
            .select_region(image, &mut self.input, &mut self.output)
        {
            Ok(region) => region,
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => {
                writeln!(self.output, "Invalid placement: {}", e)?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        match overlay_sticker(image, &sticker, region.x, region.y) {
            Ok(()) => {
                info!(
                    sticker = %self.stickers[index].name,
                    x = region.x,
                    y = region.y,
                    "sticker placed"
                );
            }
            Err(e) => {
                writeln!(self.output, "Could not place sticker: {}", e)?;
            }
        }
        Ok(())
    }

    /// Reads a line of input, returning `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("input stream closed");
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ConsoleFrontend;
    use std::io::Cursor;
    use std::path::Path;

    fn write_png(path: &Path, image: &ImageBuf) {
        snapedit_io::write(path, image).unwrap();
    }

    fn run_scripted(
        source: SourceMode,
        stickers: Vec<Sticker>,
        script: &str,
    ) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = {
            let mut session = Session::new(
                ConsoleFrontend::new(8),
                Cursor::new(script.as_bytes().to_vec()),
                &mut out,
                stickers,
            );
            session.run(source)
        };
        (result, String::from_utf8(out).unwrap())
    }

    fn red_sticker(size: u32) -> Sticker {
        Sticker {
            name: "red".into(),
            image: ImageBuf::filled(size, size, &[255, 0, 0, 255]),
        }
    }

    #[test]
    fn test_filter_then_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        write_png(&input, &ImageBuf::filled(50, 50, &[10, 20, 30]));

        let script = format!("F\ninvert\nS\n{}\nQ\n", output.display());
        let (result, _) = run_scripted(SourceMode::File(input), vec![red_sticker(4)], &script);
        result.unwrap();

        let saved = snapedit_io::read(&output).unwrap();
        assert_eq!(saved.pixel(25, 25), &[245, 235, 225]);
    }

    #[test]
    fn test_sticker_modifies_exactly_the_placement_rect() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("base.png");
        let output = dir.path().join("out.png");
        write_png(&input, &ImageBuf::filled(30, 30, &[0, 0, 0]));

        let script = format!("T\n1\n5 5\nS\n{}\nQ\n", output.display());
        let (result, _) = run_scripted(SourceMode::File(input), vec![red_sticker(10)], &script);
        result.unwrap();

        let saved = snapedit_io::read(&output).unwrap();
        assert_eq!(saved.pixel(5, 5), &[255, 0, 0]);
        assert_eq!(saved.pixel(14, 14), &[255, 0, 0]);
        assert_eq!(saved.pixel(4, 4), &[0, 0, 0]);
        assert_eq!(saved.pixel(15, 15), &[0, 0, 0]);
    }

    #[test]
    fn test_unknown_command_and_filter_are_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        write_png(&input, &ImageBuf::filled(4, 4, &[1, 2, 3]));

        let (result, out) = run_scripted(
            SourceMode::File(input),
            vec![red_sticker(2)],
            "x\nF\nnotafilter\nQ\n",
        );
        result.unwrap();
        assert!(out.contains("Unknown command: x"));
        assert!(out.contains("notafilter"));
    }

    #[test]
    fn test_bad_sticker_index_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        write_png(&input, &ImageBuf::filled(4, 4, &[1, 2, 3]));

        let (result, out) = run_scripted(
            SourceMode::File(input),
            vec![red_sticker(2)],
            "T\n9\nT\nnope\nQ\n",
        );
        result.unwrap();
        assert!(out.contains("Not a valid sticker number: 9"));
        assert!(out.contains("Not a valid sticker number: nope"));
    }

    #[test]
    fn test_out_of_bounds_placement_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        write_png(&input, &ImageBuf::filled(8, 8, &[0, 0, 0]));

        let script = format!("T\n1\n7 7\nS\n{}\nQ\n", output.display());
        let (result, out) = run_scripted(SourceMode::File(input), vec![red_sticker(4)], &script);
        result.unwrap();
        assert!(out.contains("Could not place sticker"));

        // Base untouched by the failed overlay.
        let saved = snapedit_io::read(&output).unwrap();
        assert_eq!(saved.pixel(7, 7), &[0, 0, 0]);
    }

    #[test]
    fn test_eof_terminates_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        write_png(&input, &ImageBuf::filled(4, 4, &[1, 2, 3]));

        let (result, _) = run_scripted(SourceMode::File(input), vec![red_sticker(2)], "");
        result.unwrap();
    }

    #[test]
    fn test_prompt_source_retries_until_valid_choice() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        write_png(&input, &ImageBuf::filled(4, 4, &[1, 2, 3]));

        let script = format!("3\n1\n{}\nQ\n", input.display());
        let (result, out) = run_scripted(SourceMode::Prompt, vec![red_sticker(2)], &script);
        result.unwrap();
        assert!(out.contains("Please enter 1 or 2"));
    }

    #[test]
    fn test_missing_source_file_is_fatal() {
        let (result, _) = run_scripted(
            SourceMode::File(PathBuf::from("/no/such/image.png")),
            vec![red_sticker(2)],
            "Q\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_sticker_on_grayscale_base_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("gray.png");
        write_png(&input, &ImageBuf::filled(8, 8, &[100]));

        let (result, out) = run_scripted(
            SourceMode::File(input),
            vec![red_sticker(2)],
            "T\n1\n0 0\nQ\n",
        );
        result.unwrap();
        assert!(out.contains("Could not place sticker"));
    }
}
