//! deck-app - Viewer state and orchestration for deckview
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! viewer: navigation controller, idle carousel, call-to-action capsules and
//! input adapters as a pure `update()` function, plus the Engine that runs
//! timers and presentation-shell calls, configuration loading and deck
//! watching.

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod gesture;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod shell;
pub mod signals;
pub mod state;
pub mod timer;
pub mod watcher;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{NavigationRejected, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use shell::{PresentationShell, TextDeckShell};
pub use state::ViewerState;
