//! Headless mode - JSON event output for scripted runs
//!
//! This module provides a headless (non-TUI) mode for deckview that outputs
//! structured JSON events to stdout and reads navigation commands from stdin.
//! This enables reliable parsing in test scripts, avoiding the complexity of
//! parsing ANSI escape codes from the TUI.
//!
//! # Event Format
//!
//! Events are output as NDJSON (newline-delimited JSON), one event per line.
//! Each event has an "event" field indicating its type, along with event-specific data.
//!
//! # Example Output
//!
//! ```json
//! {"event":"document_loaded","page_count":12,"total":14,"timestamp":1704700001000}
//! {"event":"ready","timestamp":1704700002000}
//! {"event":"position_changed","position":2,"total":14,"page":2,"insertion":null,"timestamp":1704700003000}
//! ```

pub mod runner;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use deck_app::signals::ShutdownCause;
use deck_app::EngineEvent;
use deck_core::{CapsuleStage, Direction, TransitionPhase};

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Document opened and sequence built
    DocumentLoaded {
        page_count: u32,
        total: u32,
        timestamp: i64,
    },

    /// Preload progress
    LoadingProgress {
        loaded: u32,
        page_count: u32,
        progress: f64,
        timestamp: i64,
    },

    /// Loading overlay dismissed
    Ready { timestamp: i64 },

    /// Renderer or document failed
    LoadFailed {
        stage: String,
        message: String,
        timestamp: i64,
    },

    /// Sequence position changed
    PositionChanged {
        position: u32,
        total: u32,
        page: Option<u32>,
        insertion: Option<String>,
        timestamp: i64,
    },

    /// Transition phase changed
    TransitionChanged {
        phase: TransitionPhase,
        direction: Option<Direction>,
        timestamp: i64,
    },

    /// Indicator text changed
    IndicatorChanged { label: String, timestamp: i64 },

    /// Capsule latch advanced
    CapsulesChanged {
        stage: CapsuleStage,
        donate_visible: bool,
        form_visible: bool,
        timestamp: i64,
    },

    /// Donate capsule label changed
    DonateLabelChanged { label: String, timestamp: i64 },

    /// External link opened
    LinkOpened { url: String, timestamp: i64 },

    /// Notice overlay shown
    NoticeShown { message: String, timestamp: i64 },

    /// Unknown or malformed stdin command
    CommandRejected { command: String, timestamp: i64 },

    /// Engine shut down
    Shutdown {
        cause: ShutdownCause,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        // Serialize to JSON
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // Write to stdout with newline (NDJSON format)
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn command_rejected(command: &str) -> Self {
        Self::CommandRejected {
            command: command.to_string(),
            timestamp: Self::now(),
        }
    }

    /// Stamp an engine event for output
    pub fn from_engine(event: &EngineEvent) -> Self {
        let timestamp = Self::now();
        match event.clone() {
            EngineEvent::DocumentLoaded { page_count, total } => Self::DocumentLoaded {
                page_count,
                total,
                timestamp,
            },
            EngineEvent::LoadingProgress {
                loaded,
                page_count,
                progress,
            } => Self::LoadingProgress {
                loaded,
                page_count,
                progress,
                timestamp,
            },
            EngineEvent::Ready => Self::Ready { timestamp },
            EngineEvent::LoadFailed { stage, message } => Self::LoadFailed {
                stage: stage.as_str().to_string(),
                message,
                timestamp,
            },
            EngineEvent::PositionChanged {
                position,
                total,
                page,
                insertion,
            } => Self::PositionChanged {
                position,
                total,
                page,
                insertion,
                timestamp,
            },
            EngineEvent::TransitionChanged { phase, direction } => Self::TransitionChanged {
                phase,
                direction,
                timestamp,
            },
            EngineEvent::IndicatorChanged { label } => Self::IndicatorChanged { label, timestamp },
            EngineEvent::CapsulesChanged {
                stage,
                donate_visible,
                form_visible,
            } => Self::CapsulesChanged {
                stage,
                donate_visible,
                form_visible,
                timestamp,
            },
            EngineEvent::DonateLabelChanged { label } => {
                Self::DonateLabelChanged { label, timestamp }
            }
            EngineEvent::LinkOpened { url } => Self::LinkOpened { url, timestamp },
            EngineEvent::NoticeShown { message } => Self::NoticeShown { message, timestamp },
            EngineEvent::Shutdown { cause } => Self::Shutdown { cause, timestamp },
        }
    }
}
