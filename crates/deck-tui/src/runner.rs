//! Main TUI runner - entry point and event loop
//!
//! Contains the viewer lifecycle:
//! - `run_with_deck`: Main entry point for a deck file
//! - `run_loop`: Main event loop processing terminal events and engine messages

use std::path::Path;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use deck_app::{Engine, PresentationShell, TextDeckShell};
use deck_core::prelude::*;

use crate::layout::ScreenAreas;
use crate::{event, render, terminal};

/// Run the TUI viewer for a text deck
pub async fn run_with_deck(deck_path: &Path) -> Result<()> {
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    // Engine loads settings and insertions, spawns the signal handler and
    // starts the deck watcher
    let mut engine = Engine::with_shell_factory(deck_path.to_path_buf(), |settings| {
        TextDeckShell::new(settings.behavior.browser.clone())
    });
    info!("Viewing {}", deck_path.display());

    // Initialize terminal
    let mut term = ratatui::init();
    if let Err(e) = crossterm::execute!(std::io::stdout(), EnableMouseCapture) {
        warn!("Mouse capture unavailable: {}", e);
    }

    let size = term.size()?;
    engine.process_message(event::resize_message(size.width, size.height));
    engine.start();

    let result = run_loop(&mut term, &mut engine);

    engine.shutdown().await;

    // Restore terminal
    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Main event loop
fn run_loop<S>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<S>) -> Result<()>
where
    S: PresentationShell + Sync + 'static,
{
    let mut areas = ScreenAreas::default();

    while !engine.should_quit() {
        // Process engine messages (shell results, timers, watcher, signals)
        engine.drain_pending_messages();
        if engine.should_quit() {
            break;
        }

        // Render
        terminal.draw(|frame| areas = render::view(frame, &engine.state))?;

        // Handle terminal events
        if let Some(message) = event::poll(&areas, &engine.state.settings.input)? {
            engine.process_message(message);
        }
    }

    Ok(())
}
