//! Headless mode runner - main event loop without TUI
//!
//! Processes stdin commands and engine messages and emits every engine
//! event as JSON on stdout.

use std::path::Path;

use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use deck_app::gesture::{PointerEvent, PointerPhase};
use deck_app::{Engine, EngineEvent, Message, PresentationShell, TextDeckShell};
use deck_core::prelude::*;
use deck_core::{Direction, NavigationIntent};

use super::HeadlessEvent;

/// Viewport used until the first `resize` command
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Run in headless mode - output JSON events instead of TUI
pub async fn run_headless(deck_path: &Path, viewport: Viewport) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("deckview starting in HEADLESS mode");
    info!("Deck: {}", deck_path.display());
    info!("═══════════════════════════════════════════════════════");

    // Create engine (handles all shared initialization)
    let mut engine = Engine::with_shell_factory(deck_path.to_path_buf(), |settings| {
        TextDeckShell::new(settings.behavior.browser.clone())
    });
    let mut events = engine.subscribe();

    // Spawn headless-specific stdin reader
    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(stdin_tx);
    });

    engine.process_message(Message::Resize {
        width: viewport.width,
        height: viewport.height,
    });
    engine.start();
    emit_pending_events(&mut events);

    // Main event loop
    let result = headless_event_loop(&mut engine, &mut events).await;

    // Shutdown
    engine.shutdown().await;
    emit_pending_events(&mut events);

    info!("deckview headless mode exiting");
    result
}

/// Main headless event loop
async fn headless_event_loop<S>(
    engine: &mut Engine<S>,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()>
where
    S: PresentationShell + Sync + 'static,
{
    loop {
        // Check for shutdown
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        // Wait for next message
        if !engine.step().await {
            info!("Message channel closed");
            break;
        }

        emit_pending_events(events);
    }

    Ok(())
}

/// Write every event broadcast since the last call
fn emit_pending_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => HeadlessEvent::from_engine(&event).emit(),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output skipped {} events", skipped);
            }
            Err(_) => break,
        }
    }
}

/// Parse one stdin command into the messages it stands for.
///
/// Returns `None` for unknown or malformed commands.
pub fn parse_command(line: &str) -> Option<Vec<Message>> {
    let mut parts = line.split_whitespace();
    let command = parts.next()?;
    let args: Vec<f32> = parts.map(|p| p.parse::<f32>().ok()).collect::<Option<_>>()?;

    let navigate = |intent| Some(vec![Message::Navigate(intent)]);

    match (command, args.as_slice()) {
        ("next" | "right", []) => navigate(NavigationIntent::next(Direction::Right)),
        ("down", []) => navigate(NavigationIntent::next(Direction::Down)),
        ("prev" | "left", []) => navigate(NavigationIntent::prev(Direction::Left)),
        ("up", []) => navigate(NavigationIntent::prev(Direction::Up)),
        ("start", []) => navigate(NavigationIntent::JumpToStart),
        ("tap", []) => Some(vec![Message::IndicatorTap]),
        ("wheel", [delta_y]) => Some(vec![Message::Wheel { delta_y: *delta_y }]),
        ("swipe", [x0, y0, x1, y1]) => Some(vec![
            Message::Pointer(PointerEvent::new(PointerPhase::Start, *x0, *y0)),
            Message::Pointer(PointerEvent::new(PointerPhase::Move, *x1, *y1)),
            Message::Pointer(PointerEvent::new(PointerPhase::End, *x1, *y1)),
        ]),
        ("resize", [width, height]) => Some(vec![Message::Resize {
            width: *width,
            height: *height,
        }]),
        ("donate", []) => Some(vec![Message::DonatePressed]),
        ("form", []) => Some(vec![Message::FormPressed]),
        ("open", []) => Some(vec![Message::OpenInsertion]),
        ("dismiss", []) => Some(vec![Message::DismissNotice]),
        ("retry", []) => Some(vec![Message::RetryLoad]),
        ("q" | "quit", []) => Some(vec![Message::Quit]),
        _ => None,
    }
}

/// Spawn stdin reader task that sends commands to message channel (blocking version)
fn spawn_stdin_reader_blocking(msg_tx: mpsc::Sender<Message>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        match line {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let Some(messages) = parse_command(trimmed) else {
                    warn!("Unknown stdin command: {}", trimmed);
                    HeadlessEvent::command_rejected(trimmed).emit();
                    continue;
                };

                let quit = messages.iter().any(|m| matches!(m, Message::Quit));
                for msg in messages {
                    if msg_tx.blocking_send(msg).is_err() {
                        info!("Stdin reader: engine gone");
                        return;
                    }
                }
                if quit {
                    info!("Stdin: quit requested");
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    info!("Stdin reader exiting");
}
