//! Semantic style builders

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn page() -> Style {
    Style::default().fg(palette::PAGE_TEXT).bg(palette::PAGE_BG)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

/// Style for text that is fading out or not yet settled
pub fn faded(style: Style) -> Style {
    style.add_modifier(Modifier::DIM)
}

pub fn capsule(color: ratatui::style::Color) -> Style {
    Style::default()
        .fg(palette::CAPSULE_TEXT)
        .bg(color)
        .add_modifier(Modifier::BOLD)
}

/// Rounded panel used by overlays
pub fn overlay_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette::BORDER_ACTIVE))
        .style(Style::default().bg(palette::POPUP_BG))
}

pub fn panel_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette::BORDER_DIM))
}
