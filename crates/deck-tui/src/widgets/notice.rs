//! Modal notice shown when the viewer cannot do something for the user

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Clear, Paragraph, Widget, Wrap};

use super::modal_overlay::{centered_rect, dim_background};
use crate::theme::styles;

pub struct NoticeDialog<'a> {
    message: &'a str,
}

impl<'a> NoticeDialog<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Widget for NoticeDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        dim_background(buf, area);

        let text_width = self.message.lines().map(str::len).max().unwrap_or(0) as u16;
        let width = (text_width + 4).clamp(24, area.width.saturating_sub(4).max(24));
        let height = self.message.lines().count() as u16 + 5;
        let dialog = centered_rect(width, height, area);

        Clear.render(dialog, buf);
        let block = styles::overlay_block().title(" Notice ");
        let inner = block.inner(dialog);
        block.render(dialog, buf);

        let mut lines: Vec<Line> = self.message.lines().map(Line::from).collect();
        lines.push(Line::from(""));
        lines.push(Line::styled("Esc to dismiss", styles::text_muted()).alignment(Alignment::Center));

        Paragraph::new(lines)
            .style(styles::text_primary())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_notice_shows_message_and_hint() {
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(
            NoticeDialog::new("Please copy this donation information:\n\nAccount 1234"),
            area,
        );

        assert!(term.buffer_contains("Notice"));
        assert!(term.buffer_contains("Account 1234"));
        assert!(term.buffer_contains("Esc to dismiss"));
    }
}
