//! Viewer state (Model in TEA pattern)

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tokio::time::Instant;

use crate::config::Settings;
use crate::gesture::SwipeTracker;
use crate::shell::RenderedPage;
use crate::signals::ShutdownCause;
use deck_core::{
    fit_page, CapsuleLatch, ContentCache, CtaThresholds, Insertion, PageSize, SequenceMapper,
    SequenceSlot, Transition,
};

/// Which asynchronous boundary a load failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStage {
    Renderer,
    Document,
}

impl LoadStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStage::Renderer => "renderer",
            LoadStage::Document => "document",
        }
    }
}

/// A whole-document failure shown on the error screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub stage: LoadStage,
    pub message: String,
}

/// Document lifecycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing requested yet
    #[default]
    NotStarted,
    InitializingRenderer,
    LoadingDocument,
    Loaded,
    Failed(LoadFailure),
}

impl LoadPhase {
    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            LoadPhase::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadPhase::Loaded)
    }
}

/// Navigation controller state
#[derive(Debug, Clone)]
pub struct NavigationState {
    /// Current sequence position (1-based)
    pub position: u32,
    pub transition: Transition,
    /// Set shortly after the first document load; never cleared
    pub initialized: bool,
    /// When the last directional navigation was accepted
    pub last_accepted: Option<Instant>,
    /// Position to show once the exit animation ends
    pub target: Option<u32>,
    /// Identifies the transition in flight
    pub navigation_id: u64,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            position: 1,
            transition: Transition::idle(),
            initialized: false,
            last_accepted: None,
            target: None,
            navigation_id: 0,
        }
    }
}

/// Indicator label carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorState {
    /// Page number (or insertion title) instead of "NEXT"
    pub show_page_number: bool,
    /// Mid cross-fade
    pub fading: bool,
    /// Incremented whenever the carousel is stopped or restarted
    pub epoch: u64,
    pub running: bool,
}

impl Default for IndicatorState {
    fn default() -> Self {
        Self {
            show_page_number: true,
            fading: false,
            epoch: 0,
            running: false,
        }
    }
}

/// Label of the donate capsule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DonateLabel {
    #[default]
    Donate,
    InfoCopied,
}

impl DonateLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonateLabel::Donate => "DONATE",
            DonateLabel::InfoCopied => "INFO COPIED",
        }
    }
}

/// Call-to-action capsules
#[derive(Debug, Clone, Copy, Default)]
pub struct CapsuleState {
    pub latch: CapsuleLatch,
    /// Reveal positions for the current document, if enabled
    pub thresholds: Option<CtaThresholds>,
    pub donate_label: DonateLabel,
    pub label_fading: bool,
    pub feedback_epoch: u64,
}

/// Complete viewer state
#[derive(Debug)]
pub struct ViewerState {
    pub settings: Settings,
    /// Deck file path
    pub source: PathBuf,
    pub mapper: SequenceMapper,
    pub cache: ContentCache,
    pub navigation: NavigationState,
    pub indicator: IndicatorState,
    pub capsules: CapsuleState,

    pub load: LoadPhase,
    /// Incremented on every load attempt; stale results are ignored
    pub generation: u64,
    /// Loading overlay dismissed
    pub loading_settled: bool,
    /// Preload renders in flight
    pub in_flight: BTreeSet<u32>,

    /// Viewport in shell units
    pub viewport: PageSize,
    /// Fitted size of the visible page
    pub page_size: PageSize,
    /// Latest render of the page on screen
    pub visible: Option<RenderedPage>,

    /// Dismissible message overlay
    pub notice: Option<String>,
    /// Last link handed to the shell
    pub last_link: Option<String>,
    pub links_opened: u32,

    pub swipe: SwipeTracker,
    quitting: Option<ShutdownCause>,
}

impl ViewerState {
    pub fn new(source: PathBuf, settings: Settings, insertions: Vec<Insertion>) -> Self {
        Self {
            settings,
            source,
            mapper: SequenceMapper::new(0, insertions),
            cache: ContentCache::new(0),
            navigation: NavigationState::default(),
            indicator: IndicatorState::default(),
            capsules: CapsuleState::default(),
            load: LoadPhase::NotStarted,
            generation: 0,
            loading_settled: false,
            in_flight: BTreeSet::new(),
            viewport: PageSize::default(),
            page_size: PageSize::default(),
            visible: None,
            notice: None,
            last_link: None,
            links_opened: 0,
            swipe: SwipeTracker::default(),
            quitting: None,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Display name of the deck
    pub fn source_name(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }

    /// Record the first reason to stop; later requests keep it
    pub fn request_quit(&mut self, cause: ShutdownCause) {
        self.quitting.get_or_insert(cause);
    }

    pub fn should_quit(&self) -> bool {
        self.quitting.is_some()
    }

    pub fn shutdown_cause(&self) -> Option<ShutdownCause> {
        self.quitting
    }

    /// Total sequence length
    pub fn total(&self) -> u32 {
        self.mapper.len()
    }

    pub fn position(&self) -> u32 {
        self.navigation.position
    }

    /// What the current position shows
    pub fn current_slot(&self) -> SequenceSlot<'_> {
        self.mapper.resolve(self.navigation.position)
    }

    /// Underlying page on screen, if the position shows one
    pub fn current_page(&self) -> Option<u32> {
        self.current_slot().page()
    }

    /// Insertion on screen, if any
    pub fn current_insertion(&self) -> Option<&Insertion> {
        match self.current_slot() {
            SequenceSlot::Insertion(insertion) => Some(insertion),
            _ => None,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.navigation.position >= self.total()
    }

    /// Loading overlay visible
    pub fn is_loading(&self) -> bool {
        !self.loading_settled && self.load.failure().is_none()
    }

    /// Indicator text: the page number or insertion title, or "NEXT"
    pub fn indicator_label(&self) -> String {
        if !self.indicator.show_page_number {
            return "NEXT".to_string();
        }
        match self.current_slot() {
            SequenceSlot::Insertion(insertion) => insertion.title_text(),
            SequenceSlot::Page(page) => page.to_string(),
            SequenceSlot::Vacant => self
                .mapper
                .to_underlying_page(self.navigation.position)
                .to_string(),
        }
    }

    /// Number of title lines used by the indicator (1 for page numbers)
    pub fn indicator_lines(&self) -> usize {
        self.current_insertion()
            .map(|insertion| insertion.title_lines.len().max(1))
            .unwrap_or(1)
    }

    /// Recompute the fitted page size from the viewport
    pub fn refit_page(&mut self) {
        self.page_size = fit_page(self.viewport, self.settings.document.aspect_ratio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insertion(after: u32, title: &[&str]) -> Insertion {
        Insertion {
            id: None,
            after_page: after,
            before_page: after + 1,
            url: "https://example.com".to_string(),
            title_lines: title.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn state(page_count: u32) -> ViewerState {
        let mut state = ViewerState::new(
            PathBuf::from("/decks/brand.txt"),
            Settings::default(),
            vec![insertion(1, &["Journeying", "Friday"])],
        );
        state.mapper = state.mapper.with_page_count(page_count);
        state
    }

    #[test]
    fn test_new_state_defaults() {
        let state = state(0);
        assert_eq!(state.position(), 1);
        assert!(!state.navigation.initialized);
        assert!(state.navigation.transition.is_idle());
        assert!(state.is_loading());
        assert!(!state.should_quit());
        assert_eq!(state.source_name(), "brand.txt");
    }

    #[test]
    fn test_indicator_label_for_page_and_insertion() {
        let mut state = state(4);
        assert_eq!(state.indicator_label(), "1");

        state.navigation.position = 2;
        assert_eq!(state.indicator_label(), "Journeying\nFriday");
        assert_eq!(state.indicator_lines(), 2);

        state.navigation.position = 3;
        assert_eq!(state.indicator_label(), "2");

        state.indicator.show_page_number = false;
        assert_eq!(state.indicator_label(), "NEXT");
    }

    #[test]
    fn test_current_slot_is_derived_from_mapper() {
        let mut state = state(4);
        state.navigation.position = 2;
        assert!(state.current_insertion().is_some());
        assert_eq!(state.current_page(), None);

        state.navigation.position = 5;
        assert_eq!(state.current_page(), Some(4));
        assert!(state.is_at_end());
    }

    #[test]
    fn test_failed_load_hides_overlay() {
        let mut state = state(4);
        state.load = LoadPhase::Failed(LoadFailure {
            stage: LoadStage::Document,
            message: "boom".to_string(),
        });
        assert!(!state.is_loading());
    }

    #[test]
    fn test_refit_page_uses_aspect_ratio() {
        let mut state = state(4);
        state.viewport = PageSize::new(200.0, 100.0);
        state.refit_page();
        assert_eq!(state.page_size.height, 100.0);
        assert!((state.page_size.width - 77.0).abs() < 0.01);
    }
}
