//! snapedit - interactive command-line image editor
//!
//! Loads an image from a file or webcam, then applies filters and
//! transparent PNG stickers interactively before saving the result.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod camera;
mod frontend;
mod session;

use frontend::ConsoleFrontend;
use session::{Session, SourceMode};

#[derive(Parser)]
#[command(name = "snapedit")]
#[command(author, version, about = "Interactive command-line image editor")]
#[command(long_about = "
An interactive image editor for the terminal.

Load an image from a file or webcam, then edit it with single-key
commands: apply one of ten filters, place transparent PNG stickers,
and save the result as PNG or JPEG.

Examples:
  snapedit photo.jpg                  # Edit a file
  snapedit --camera                   # Capture from the webcam
  snapedit                            # Choose a source interactively
  snapedit photo.png -s ~/stickers    # Custom sticker directory
")]
struct Cli {
    /// Image to edit (omit to choose a source interactively)
    input: Option<PathBuf>,

    /// Capture the initial image from the default camera
    #[arg(long, conflicts_with = "input")]
    camera: bool,

    /// Directory of transparent PNG stickers
    #[arg(short, long, default_value = "stickers")]
    stickers: PathBuf,

    /// Preview width in terminal cells
    #[arg(short = 'w', long, default_value_t = ConsoleFrontend::DEFAULT_WIDTH)]
    preview_width: u32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let stickers = snapedit_io::load_stickers(&cli.stickers)
        .with_context(|| format!("failed to load stickers from {}", cli.stickers.display()))?;
    if stickers.is_empty() {
        bail!(
            "no stickers found; please add transparent PNG files to {}",
            cli.stickers.display()
        );
    }

    let source = match (cli.input, cli.camera) {
        (Some(path), _) => SourceMode::File(path),
        (None, true) => SourceMode::Camera,
        (None, false) => SourceMode::Prompt,
    };

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut session = Session::new(
        ConsoleFrontend::new(cli.preview_width),
        stdin,
        stdout,
        stickers,
    );
    session.run(source)
}
