//! Full-viewport loading overlay with preload progress

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Clear, Gauge, Paragraph, Widget};

use super::modal_overlay::centered_rect;
use crate::theme::{palette, styles};

pub struct LoadingOverlay<'a> {
    name: &'a str,
    /// Loaded fraction, 0.0 to 1.0
    progress: f64,
}

impl<'a> LoadingOverlay<'a> {
    pub fn new(name: &'a str, progress: f64) -> Self {
        Self {
            name,
            progress: progress.clamp(0.0, 1.0),
        }
    }
}

impl Widget for LoadingOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        buf.set_style(area, Style::default().bg(palette::DEEPEST_BG));

        let panel = centered_rect(40, 5, area);
        let [title, _, gauge] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(panel);

        Paragraph::new(Line::from(format!("Loading {}", self.name)).centered())
            .style(styles::text_secondary())
            .render(title, buf);

        Gauge::default()
            .gauge_style(Style::default().fg(palette::ACCENT).bg(palette::POPUP_BG))
            .ratio(self.progress)
            .label(format!("{:.0}%", self.progress * 100.0))
            .render(gauge, buf);
    }
}
