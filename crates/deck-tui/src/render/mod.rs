//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use deck_app::ViewerState;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::layout::{self, ScreenAreas};
use crate::theme::palette;
use crate::widgets;

/// Render the complete UI (View function in TEA)
///
/// This is a pure rendering function. Returns the layout it drew so mouse
/// presses can be hit-tested against the floating controls.
pub fn view(frame: &mut Frame, state: &ViewerState) -> ScreenAreas {
    let area = frame.area();

    // Fill entire terminal with deepest background color
    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    // A failed load replaces everything with the error screen
    if let Some(failure) = state.load.failure() {
        frame.render_widget(widgets::ErrorScreen::new(failure), area);
        return ScreenAreas {
            viewport: area,
            ..ScreenAreas::default()
        };
    }

    let areas = layout::create(area, state);

    frame.render_widget(widgets::PageView::new(state), areas.page);

    if let Some(rect) = areas.form {
        frame.render_widget(widgets::Capsule::new("FORM", palette::CAPSULE_FORM), rect);
    }
    if let Some(rect) = areas.donate {
        frame.render_widget(
            widgets::Capsule::new(state.capsules.donate_label.as_str(), palette::CAPSULE_DONATE)
                .fading(state.capsules.label_fading),
            rect,
        );
    }

    let label = state.indicator_label();
    frame.render_widget(
        widgets::Capsule::indicator(&label).fading(state.indicator.fading),
        areas.indicator,
    );

    if state.is_loading() {
        let name = state.source_name();
        frame.render_widget(
            widgets::LoadingOverlay::new(&name, state.cache.progress()),
            area,
        );
        return ScreenAreas {
            viewport: area,
            ..ScreenAreas::default()
        };
    }

    if let Some(notice) = &state.notice {
        frame.render_widget(widgets::NoticeDialog::new(notice), area);
    }

    areas
}
