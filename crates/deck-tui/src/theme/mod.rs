//! Colors and styles for the viewer

pub mod palette;
pub mod styles;
