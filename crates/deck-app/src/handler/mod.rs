//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `document`: Renderer/document lifecycle, cache and preload pumping
//! - `navigation`: Navigation controller (guards and transition phases)
//! - `carousel`: Idle indicator carousel
//! - `capsules`: Call-to-action latch and donate feedback
//! - `keys`: Key event handlers

pub(crate) mod capsules;
pub(crate) mod carousel;
pub(crate) mod document;
pub(crate) mod keys;
pub(crate) mod navigation;
pub(crate) mod update;


use std::time::Duration;

use crate::message::Message;
use crate::shell::{RenderOptions, RenderPurpose};
use crate::timer::{Timer, TimerSlot};

// Re-export main entry point
pub use keys::handle_key;
pub use navigation::{request_navigation, NavigationRejected};
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Initialize the rendering engine
    InitializeRenderer { generation: u64 },

    /// Open the deck document
    LoadDocument { generation: u64 },

    /// Render one page
    RenderPage {
        generation: u64,
        page: u32,
        options: RenderOptions,
        purpose: RenderPurpose,
    },

    /// Deliver `Message::TimerFired(timer)` after a delay, replacing any
    /// pending timer in the same slot
    ScheduleTimer { timer: Timer, after: Duration },

    /// Drop pending timers
    CancelTimers(Vec<TimerSlot>),

    /// Write text to the clipboard
    CopyText { text: String },

    /// Open a link outside the viewer
    OpenLink { url: String },
}

impl UpdateAction {
    pub fn schedule(timer: Timer, after_ms: u64) -> Self {
        Self::ScheduleTimer {
            timer,
            after: Duration::from_millis(after_ms),
        }
    }
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Actions for the event loop to perform, in order
    pub actions: Vec<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            actions: Vec::new(),
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            actions: vec![action],
        }
    }

    pub fn actions(actions: Vec<UpdateAction>) -> Self {
        Self {
            message: None,
            actions,
        }
    }
}
