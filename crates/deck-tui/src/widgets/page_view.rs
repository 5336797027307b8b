//! The fitted page: rendered deck text, or an insertion card

use deck_app::ViewerState;
use deck_core::{Insertion, SequenceSlot, TransitionPhase};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Clear, Paragraph, Widget, Wrap};

use crate::theme::styles;

pub struct PageView<'a> {
    state: &'a ViewerState,
}

impl<'a> PageView<'a> {
    pub fn new(state: &'a ViewerState) -> Self {
        Self { state }
    }

    /// Page content fades while the old page leaves and the new one arrives
    fn style(&self) -> Style {
        match self.state.navigation.transition.phase {
            TransitionPhase::Exiting | TransitionPhase::Entering => styles::faded(styles::page()),
            TransitionPhase::Idle | TransitionPhase::Settling => styles::page(),
        }
    }

    fn page_lines(&self, page: u32) -> Vec<Line<'a>> {
        match &self.state.visible {
            Some(rendered) if rendered.page == page => {
                rendered.lines.iter().map(|l| Line::from(l.as_str())).collect()
            }
            _ => Vec::new(),
        }
    }

    fn insertion_lines(insertion: &'a Insertion) -> Vec<Line<'a>> {
        let mut lines = vec![Line::from("")];
        lines.extend(
            insertion
                .title_lines
                .iter()
                .map(|l| Line::styled(l.as_str(), Style::default().add_modifier(Modifier::BOLD))),
        );
        lines.push(Line::from(""));
        lines.push(Line::from(insertion.url.as_str()).style(Style::default().add_modifier(Modifier::UNDERLINED)));
        lines.push(Line::from(""));
        lines.push(Line::from("o to open"));
        lines
    }
}

impl Widget for PageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        Clear.render(area, buf);
        let style = self.style();
        buf.set_style(area, style);

        let paragraph = match self.state.current_slot() {
            SequenceSlot::Page(page) => Paragraph::new(self.page_lines(page)),
            SequenceSlot::Insertion(insertion) => {
                Paragraph::new(Self::insertion_lines(insertion))
                    .centered()
                    .wrap(Wrap { trim: true })
            }
            SequenceSlot::Vacant => Paragraph::new(Vec::<Line>::new()),
        };
        paragraph.style(style).render(area, buf);
    }
}
