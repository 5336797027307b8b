use super::*;
use crate::test_utils::TestTerminal;
use deck_app::config::Settings;
use deck_app::shell::RenderedPage;
use deck_app::state::{DonateLabel, LoadFailure, LoadPhase, LoadStage};
use deck_core::{ContentCache, CtaThresholds, Insertion, LatchStep, PageSize};
use std::path::PathBuf;

fn loaded_state() -> ViewerState {
    let insertion = Insertion {
        id: Some("guest".to_string()),
        after_page: 2,
        before_page: 3,
        url: "https://example.com/guest".to_string(),
        title_lines: vec!["Guest".to_string(), "Speaker".to_string()],
    };
    let mut state = ViewerState::new(
        PathBuf::from("/decks/talk.txt"),
        Settings::default(),
        vec![insertion],
    );
    state.mapper = state.mapper.with_page_count(4);
    state.cache = ContentCache::new(4);
    state.load = LoadPhase::Loaded;
    state.loading_settled = true;
    state.navigation.initialized = true;
    state.viewport = PageSize::new(80.0, 24.0);
    state.refit_page();
    state.visible = Some(RenderedPage {
        page: 1,
        width: 18.0,
        height: 24.0,
        lines: vec!["Opening".to_string()],
    });
    state
}

fn reveal_donate(state: &mut ViewerState) {
    let latch = &mut state.capsules.latch;
    latch.observe(1, Some(CtaThresholds { donate: 1, form: 9 }));
    latch.apply(LatchStep::DonateReveal);
    latch.apply(LatchStep::DonateSettled);
}

#[test]
fn test_loading_overlay_hides_the_page() {
    let state = ViewerState::new(PathBuf::from("/decks/talk.txt"), Settings::default(), vec![]);
    let mut term = TestTerminal::new();
    let mut areas = ScreenAreas::default();
    term.draw_with(|frame| areas = view(frame, &state));

    assert!(term.buffer_contains("Loading talk.txt"));
    assert_eq!(areas.indicator.area(), 0);
}

#[test]
fn test_loaded_page_shows_text_and_page_number() {
    let state = loaded_state();
    let mut term = TestTerminal::new();
    let mut areas = ScreenAreas::default();
    term.draw_with(|frame| areas = view(frame, &state));

    assert!(term.buffer_contains("Opening"));
    assert!(term.line_contains(areas.indicator.y + 1, "1"));
    assert!(!term.buffer_contains("Loading"));
}

#[test]
fn test_indicator_shows_next_when_carousel_flips() {
    let mut state = loaded_state();
    state.indicator.show_page_number = false;
    let mut term = TestTerminal::new();
    term.draw_with(|frame| {
        view(frame, &state);
    });

    assert!(term.buffer_contains("NEXT"));
}

#[test]
fn test_insertion_title_in_indicator() {
    let mut state = loaded_state();
    state.navigation.position = 3;
    let mut term = TestTerminal::new();
    let mut areas = ScreenAreas::default();
    term.draw_with(|frame| areas = view(frame, &state));

    // The page column is narrow; the card wraps but keeps its hint
    assert!(term.buffer_contains("o to open"));
    assert!(term.buffer_contains("Speaker"));
    assert_eq!(areas.indicator.height, 4);
}

#[test]
fn test_error_screen_replaces_viewer() {
    let mut state = loaded_state();
    state.load = LoadPhase::Failed(LoadFailure {
        stage: LoadStage::Document,
        message: "no such file".to_string(),
    });
    let mut term = TestTerminal::new();
    term.draw_with(|frame| {
        view(frame, &state);
    });

    assert!(term.buffer_contains("no such file"));
    assert!(!term.buffer_contains("Opening"));
}

#[test]
fn test_donate_capsule_and_copied_label() {
    let mut state = loaded_state();
    reveal_donate(&mut state);

    let mut term = TestTerminal::with_size(80, 40);
    let mut areas = ScreenAreas::default();
    term.draw_with(|frame| areas = view(frame, &state));
    assert!(areas.donate.is_some());
    assert!(areas.form.is_none());
    assert!(term.buffer_contains("DONATE"));

    state.capsules.donate_label = DonateLabel::InfoCopied;
    term.draw_with(|frame| {
        view(frame, &state);
    });
    assert!(term.buffer_contains("INFO COPIED"));
}

#[test]
fn test_notice_overlay() {
    let mut state = loaded_state();
    state.notice = Some("Could not open link:\n\nhttps://example.com".to_string());
    let mut term = TestTerminal::new();
    term.draw_with(|frame| {
        view(frame, &state);
    });

    assert!(term.buffer_contains("Could not open link:"));
    assert!(term.buffer_contains("Esc to dismiss"));
}
