//! Configuration file parsing for deckview
//!
//! Supports:
//! - `.deckview/config.toml` - Viewer settings
//! - `.deckview/insertions.toml` - External content spliced into the deck
//!
//! Both files live next to the deck file.

pub mod settings;
pub mod types;

pub use settings::{config_dir, init_config_dir, load_insertions, load_settings};
pub use types::*;
