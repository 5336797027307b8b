//! deck-tui - Terminal presentation for deckview
//!
//! Draws the viewer state with ratatui and translates crossterm keyboard,
//! mouse and resize events into viewer messages.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::run_with_deck;
