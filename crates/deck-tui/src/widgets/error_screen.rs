//! Full-viewport error screen for a failed load

use deck_app::state::{LoadFailure, LoadStage};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Widget, Wrap};

use super::modal_overlay::centered_rect;
use crate::theme::styles;

pub struct ErrorScreen<'a> {
    failure: &'a LoadFailure,
}

impl<'a> ErrorScreen<'a> {
    pub fn new(failure: &'a LoadFailure) -> Self {
        Self { failure }
    }

    fn title(&self) -> &'static str {
        match self.failure.stage {
            LoadStage::Renderer => "Could not start the renderer",
            LoadStage::Document => "Could not load the document",
        }
    }
}

impl Widget for ErrorScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let panel = centered_rect(60, 9, area);
        let block = styles::panel_block().title(" Error ");
        let inner = block.inner(panel);
        block.render(panel, buf);

        let lines = vec![
            Line::styled(self.title(), styles::status_red()),
            Line::from(""),
            Line::styled(self.failure.message.as_str(), styles::text_secondary()),
            Line::from(""),
            Line::from(vec![
                Span::styled("r", styles::accent_bold()),
                Span::styled(" retry   ", styles::text_muted()),
                Span::styled("q", styles::accent_bold()),
                Span::styled(" quit", styles::text_muted()),
            ]),
        ];

        Paragraph::new(lines)
            .centered()
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
