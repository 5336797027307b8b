//! Screen layout for the viewer
//!
//! The page is centered in the viewport. The indicator and the capsules
//! float over the bottom edge, stacked with the same geometry the viewer
//! uses in pixel units, scaled down to terminal rows.

use deck_app::ViewerState;
use deck_core::{capsule_offset, indicator_height, PageSize};
use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthStr;

/// Stacked capsules are this many pixel units tall
const CAPSULE_HEIGHT: f32 = 50.0;

/// Horizontal padding inside the indicator and capsules (border included)
const CAPSULE_PADDING: u16 = 6;

/// Screen areas for the viewer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Whole terminal
    pub viewport: Rect,

    /// Fitted page, centered in the viewport
    pub page: Rect,

    /// Primary indicator (page number, insertion title or NEXT)
    pub indicator: Rect,

    /// Donate capsule, once revealed
    pub donate: Option<Rect>,

    /// Form capsule, once revealed
    pub form: Option<Rect>,
}

impl ScreenAreas {
    /// Which floating control, if any, contains the cell
    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        let position = Position::new(column, row);
        if self.indicator.contains(position) {
            Some(Hit::Indicator)
        } else if self.donate.is_some_and(|r| r.contains(position)) {
            Some(Hit::Donate)
        } else if self.form.is_some_and(|r| r.contains(position)) {
            Some(Hit::Form)
        } else {
            None
        }
    }
}

/// Floating control under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Indicator,
    Donate,
    Form,
}

/// Create the viewer layout for the current state
pub fn create(area: Rect, state: &ViewerState) -> ScreenAreas {
    let cell_height = state.settings.input.cell_height.max(1.0);
    let lines = state.indicator_lines();

    let page = centered_page(area, state.page_size);

    let label = state.indicator_label();
    let label_width = label.lines().map(|l| l.width()).max().unwrap_or(0) as u16;
    let indicator_rows = to_rows(indicator_height(lines), cell_height).max(lines as u16 + 2);
    let indicator = bottom_anchored(
        area,
        label_width + CAPSULE_PADDING,
        indicator_rows,
        to_rows(capsule_offset(lines, 0), cell_height),
    );

    let capsule_rows = to_rows(CAPSULE_HEIGHT, cell_height).max(3);
    let latch = state.capsules.latch;
    let mut stacked = 0;

    let donate = latch.donate_visible().then(|| {
        stacked += 1;
        let width = state.capsules.donate_label.as_str().width() as u16;
        bottom_anchored(
            area,
            width + CAPSULE_PADDING,
            capsule_rows,
            to_rows(capsule_offset(lines, stacked), cell_height),
        )
    });

    let form = latch.form_visible().then(|| {
        stacked += 1;
        bottom_anchored(
            area,
            "FORM".width() as u16 + CAPSULE_PADDING,
            capsule_rows,
            to_rows(capsule_offset(lines, stacked), cell_height),
        )
    });

    ScreenAreas {
        viewport: area,
        page,
        indicator,
        donate,
        form,
    }
}

/// Center the fitted page in the area, clamped to it
pub fn centered_page(area: Rect, size: PageSize) -> Rect {
    if size.is_empty() {
        return Rect::new(area.x, area.y, 0, 0);
    }
    let width = (size.width.round() as u16).min(area.width);
    let height = (size.height.round() as u16).min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Rect horizontally centered, with its bottom edge `offset` rows above the
/// bottom of the area
fn bottom_anchored(area: Rect, width: u16, height: u16, offset: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let bottom = area.bottom().saturating_sub(offset).max(area.y + height);
    Rect::new(
        area.x + (area.width - width) / 2,
        bottom - height,
        width,
        height,
    )
}

fn to_rows(units: f32, cell_height: f32) -> u16 {
    (units / cell_height).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_app::config::Settings;
    use deck_core::{CapsuleStage, LatchStep};
    use std::path::PathBuf;

    fn state() -> ViewerState {
        let mut state = ViewerState::new(PathBuf::from("deck.txt"), Settings::default(), vec![]);
        state.mapper = state.mapper.with_page_count(10);
        state.viewport = PageSize::new(80.0, 24.0);
        state.refit_page();
        state
    }

    #[test]
    fn test_page_is_centered() {
        let state = state();
        let areas = create(Rect::new(0, 0, 80, 24), &state);

        assert_eq!(areas.page.height, 24);
        assert_eq!(areas.page.width, 18);
        assert_eq!(areas.page.x, 31);
    }

    #[test]
    fn test_empty_page_size_gives_empty_rect() {
        let rect = centered_page(Rect::new(0, 0, 80, 24), PageSize::default());
        assert_eq!(rect.area(), 0);
    }

    #[test]
    fn test_indicator_sits_above_bottom_margin() {
        let state = state();
        let areas = create(Rect::new(0, 0, 80, 24), &state);

        // 30 units of margin at 16 units per row
        assert_eq!(areas.indicator.bottom(), 22);
        assert_eq!(areas.indicator.height, 3);
        assert!(areas.donate.is_none());
        assert!(areas.form.is_none());
    }

    #[test]
    fn test_capsules_stack_above_indicator() {
        let mut state = state();
        let latch = &mut state.capsules.latch;
        let thresholds = Some(deck_core::CtaThresholds { donate: 1, form: 1 });
        latch.observe(1, thresholds);
        latch.apply(LatchStep::DonateReveal);
        latch.apply(LatchStep::DonateSettled);
        latch.observe(1, thresholds);
        latch.apply(LatchStep::FormReveal);
        assert_eq!(latch.stage(), CapsuleStage::RevealingForm);

        let areas = create(Rect::new(0, 0, 80, 40), &state);
        let donate = areas.donate.unwrap();
        let form = areas.form.unwrap();

        assert!(donate.bottom() <= areas.indicator.y);
        assert!(form.bottom() <= donate.y);
    }

    #[test]
    fn test_hit_testing() {
        let areas = ScreenAreas {
            viewport: Rect::new(0, 0, 80, 24),
            page: Rect::new(31, 0, 18, 24),
            indicator: Rect::new(36, 19, 8, 3),
            donate: Some(Rect::new(34, 14, 12, 3)),
            form: None,
        };

        assert_eq!(areas.hit(37, 20), Some(Hit::Indicator));
        assert_eq!(areas.hit(35, 15), Some(Hit::Donate));
        assert_eq!(areas.hit(0, 0), None);
    }

    #[test]
    fn test_tiny_terminal_does_not_overflow() {
        let state = state();
        let area = Rect::new(0, 0, 4, 2);
        let areas = create(area, &state);

        assert!(areas.indicator.width <= 4);
        assert!(areas.indicator.bottom() <= area.bottom());
    }
}
