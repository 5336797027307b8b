//! Floating capsule: the indicator and the call-to-action buttons

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Color;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget};

use crate::theme::{palette, styles};

/// A rounded button with a centered, possibly multi-line label
pub struct Capsule<'a> {
    label: &'a str,
    color: Color,
    fading: bool,
}

impl<'a> Capsule<'a> {
    pub fn new(label: &'a str, color: Color) -> Self {
        Self {
            label,
            color,
            fading: false,
        }
    }

    /// The primary indicator
    pub fn indicator(label: &'a str) -> Self {
        Self::new(label, palette::ACCENT)
    }

    pub fn fading(mut self, fading: bool) -> Self {
        self.fading = fading;
        self
    }
}

impl Widget for Capsule<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let mut style = styles::capsule(self.color);
        if self.fading {
            style = styles::faded(style);
        }

        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style)
            .style(style);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self.label.lines().map(Line::from).collect();
        let top_pad = inner.height.saturating_sub(lines.len() as u16) / 2;
        let text_area = Rect::new(
            inner.x,
            inner.y + top_pad,
            inner.width,
            inner.height - top_pad,
        );
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(style)
            .render(text_area, buf);
    }
}
