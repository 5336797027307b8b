//! deckview - A full-viewport, paginated deck viewer
//!
//! This is the binary entry point. All logic lives in the workspace crates.

mod headless;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{bail, Result};

use deck_core::logging::LogMode;
use headless::runner::Viewport;

/// deckview - Page through a deck with external content spliced in
#[derive(Parser, Debug)]
#[command(name = "deckview")]
#[command(about = "A full-viewport, paginated deck viewer", long_about = None)]
struct Args {
    /// Path to the deck file (pages separated by form feeds)
    #[arg(value_name = "DECK")]
    deck: PathBuf,

    /// Run in headless mode (JSON output, commands on stdin)
    #[arg(long)]
    headless: bool,

    /// Write a commented .deckview/config.toml next to the deck and exit
    #[arg(long)]
    init_config: bool,

    /// Headless viewport width
    #[arg(long, default_value_t = 770.0)]
    width: f32,

    /// Headless viewport height
    #[arg(long, default_value_t = 1000.0)]
    height: f32,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let log_mode = if args.headless {
        LogMode::Headless
    } else {
        LogMode::Tui
    };
    deck_core::logging::init(log_mode)?;

    let deck_dir = deck_app::engine::deck_dir(&args.deck);
    if args.init_config {
        deck_app::config::init_config_dir(&deck_dir)?;
        eprintln!(
            "Wrote {}",
            deck_app::config::config_dir(&deck_dir).display()
        );
        return Ok(());
    }

    if !args.deck.is_file() {
        bail!("Deck not found: {}", args.deck.display());
    }

    if args.headless {
        let viewport = Viewport {
            width: args.width,
            height: args.height,
        };
        headless::runner::run_headless(&args.deck, viewport).await?;
    } else {
        deck_tui::run_with_deck(&args.deck).await?;
    }

    Ok(())
}
