//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON; the
//! TUI ignores them and renders straight from state.

use deck_core::{CapsuleStage, Direction, TransitionPhase};

use crate::signals::ShutdownCause;
use crate::state::LoadStage;

/// Domain events emitted by the Engine.
///
/// Each event is derived by comparing state snapshots taken before and after
/// a message was processed, so subscribers see a consistent view.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Document Lifecycle
    // ─────────────────────────────────────────────────────────
    /// A document was opened and the sequence rebuilt
    DocumentLoaded { page_count: u32, total: u32 },

    /// Pages finished their first render pass
    LoadingProgress {
        loaded: u32,
        page_count: u32,
        progress: f64,
    },

    /// The loading overlay was dismissed
    Ready,

    /// Renderer or document failed; the error screen is up
    LoadFailed { stage: LoadStage, message: String },

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    /// The sequence position changed
    PositionChanged {
        position: u32,
        total: u32,
        /// Underlying page, when the position shows one
        page: Option<u32>,
        /// Insertion URL, when the position shows one
        insertion: Option<String>,
    },

    /// The transition phase changed
    TransitionChanged {
        phase: TransitionPhase,
        direction: Option<Direction>,
    },

    /// The indicator text changed
    IndicatorChanged { label: String },

    // ─────────────────────────────────────────────────────────
    // Call To Action
    // ─────────────────────────────────────────────────────────
    /// The capsule latch advanced
    CapsulesChanged {
        stage: CapsuleStage,
        donate_visible: bool,
        form_visible: bool,
    },

    /// The donate capsule label changed
    DonateLabelChanged { label: String },

    /// A link was handed to the system browser
    LinkOpened { url: String },

    /// A notice overlay appeared
    NoticeShown { message: String },

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Engine is shutting down
    Shutdown { cause: ShutdownCause },
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::DocumentLoaded { .. } => "document_loaded",
            Self::LoadingProgress { .. } => "loading_progress",
            Self::Ready => "ready",
            Self::LoadFailed { .. } => "load_failed",
            Self::PositionChanged { .. } => "position_changed",
            Self::TransitionChanged { .. } => "transition_changed",
            Self::IndicatorChanged { .. } => "indicator_changed",
            Self::CapsulesChanged { .. } => "capsules_changed",
            Self::DonateLabelChanged { .. } => "donate_label_changed",
            Self::LinkOpened { .. } => "link_opened",
            Self::NoticeShown { .. } => "notice_shown",
            Self::Shutdown { .. } => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_labels_are_unique() {
        let events = [
            EngineEvent::DocumentLoaded {
                page_count: 1,
                total: 1,
            },
            EngineEvent::LoadingProgress {
                loaded: 0,
                page_count: 1,
                progress: 0.0,
            },
            EngineEvent::Ready,
            EngineEvent::LoadFailed {
                stage: LoadStage::Document,
                message: String::new(),
            },
            EngineEvent::PositionChanged {
                position: 1,
                total: 1,
                page: Some(1),
                insertion: None,
            },
            EngineEvent::TransitionChanged {
                phase: TransitionPhase::Idle,
                direction: None,
            },
            EngineEvent::IndicatorChanged {
                label: "1".to_string(),
            },
            EngineEvent::CapsulesChanged {
                stage: CapsuleStage::Single,
                donate_visible: false,
                form_visible: false,
            },
            EngineEvent::DonateLabelChanged {
                label: "DONATE".to_string(),
            },
            EngineEvent::LinkOpened { url: String::new() },
            EngineEvent::NoticeShown {
                message: String::new(),
            },
            EngineEvent::Shutdown {
                cause: ShutdownCause::UserQuit,
            },
        ];

        let mut labels: Vec<_> = events.iter().map(|e| e.event_type()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), events.len());
    }

    #[test]
    fn test_shutdown_label() {
        let event = EngineEvent::Shutdown {
            cause: ShutdownCause::Interrupt,
        };
        assert_eq!(event.event_type(), "shutdown");
    }
}
