//! Color palette

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black; // Viewport background
pub const PAGE_BG: Color = Color::Rgb(245, 243, 238); // Paper
pub const POPUP_BG: Color = Color::DarkGray;

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;

// --- Text ---
pub const PAGE_TEXT: Color = Color::Rgb(30, 30, 30);
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_RED: Color = Color::Red;

// --- Capsules ---
pub const CAPSULE_DONATE: Color = Color::Rgb(234, 179, 8);
pub const CAPSULE_FORM: Color = Color::Rgb(88, 166, 255);
pub const CAPSULE_TEXT: Color = Color::Black;
