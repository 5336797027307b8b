//! Configuration types for deckview
//!
//! Defines `Settings` (the contents of `.deckview/config.toml`) and its
//! per-section sub-types. Every field has a default so a partial file is
//! always valid.

use std::time::Duration;

use deck_core::{CallToActionPolicy, ThresholdRule, DEFAULT_ASPECT_RATIO, DEFAULT_PRELOAD_CAP};
use serde::{Deserialize, Serialize};

/// Application settings (.deckview/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub document: DocumentSettings,

    #[serde(default)]
    pub navigation: NavigationSettings,

    #[serde(default)]
    pub loading: LoadingSettings,

    #[serde(default)]
    pub preload: PreloadSettings,

    #[serde(default)]
    pub carousel: CarouselSettings,

    #[serde(default)]
    pub input: InputSettings,

    #[serde(default)]
    pub call_to_action: CallToActionSettings,

    #[serde(default)]
    pub watcher: WatcherSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,
}

/// Document geometry
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DocumentSettings {
    /// Page width divided by page height
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f32,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: default_aspect_ratio(),
        }
    }
}

fn default_aspect_ratio() -> f32 {
    DEFAULT_ASPECT_RATIO
}

/// Transition timings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavigationSettings {
    /// Minimum interval between two accepted navigations
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Duration of the exit animation before the position changes
    #[serde(default = "default_exit_ms")]
    pub exit_ms: u64,

    /// Duration of the enter animation
    #[serde(default = "default_enter_ms")]
    pub enter_ms: u64,

    /// Settle time before the controller returns to idle
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Delay after the first document load before navigation is allowed
    #[serde(default = "default_initialize_delay_ms")]
    pub initialize_delay_ms: u64,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            exit_ms: default_exit_ms(),
            enter_ms: default_enter_ms(),
            settle_ms: default_settle_ms(),
            initialize_delay_ms: default_initialize_delay_ms(),
        }
    }
}

impl NavigationSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_exit_ms() -> u64 {
    200
}

fn default_enter_ms() -> u64 {
    100
}

fn default_settle_ms() -> u64 {
    300
}

fn default_initialize_delay_ms() -> u64 {
    100
}

/// Loading overlay
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoadingSettings {
    /// Delay between readiness and dismissing the overlay
    #[serde(default = "default_loading_settle_ms")]
    pub settle_ms: u64,
}

impl Default for LoadingSettings {
    fn default() -> Self {
        Self {
            settle_ms: default_loading_settle_ms(),
        }
    }
}

fn default_loading_settle_ms() -> u64 {
    800
}

/// Background preloading
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PreloadSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of preload renders in flight
    #[serde(default = "default_preload_cap")]
    pub cap: usize,
}

impl Default for PreloadSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            cap: default_preload_cap(),
        }
    }
}

fn default_preload_cap() -> usize {
    DEFAULT_PRELOAD_CAP
}

/// Idle indicator carousel
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CarouselSettings {
    /// Time between label toggles
    #[serde(default = "default_carousel_period_ms")]
    pub period_ms: u64,

    /// Cross-fade before the label toggles
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,

    /// Delay before the carousel resumes after navigation
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            period_ms: default_carousel_period_ms(),
            fade_ms: default_fade_ms(),
            restart_delay_ms: default_restart_delay_ms(),
        }
    }
}

fn default_carousel_period_ms() -> u64 {
    3000
}

fn default_fade_ms() -> u64 {
    300
}

fn default_restart_delay_ms() -> u64 {
    1500
}

/// Gesture thresholds
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InputSettings {
    /// Minimum swipe length, in pixel units
    #[serde(default = "default_swipe_min_distance")]
    pub swipe_min_distance: f32,

    /// Approximate pixel width of one terminal cell
    #[serde(default = "default_cell_width")]
    pub cell_width: f32,

    /// Approximate pixel height of one terminal cell
    #[serde(default = "default_cell_height")]
    pub cell_height: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            swipe_min_distance: default_swipe_min_distance(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
        }
    }
}

fn default_swipe_min_distance() -> f32 {
    250.0
}

fn default_cell_width() -> f32 {
    8.0
}

fn default_cell_height() -> f32 {
    16.0
}

/// Call-to-action capsules
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CallToActionSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Documents shorter than this never show capsules
    #[serde(default = "default_min_pages")]
    pub min_pages: u32,

    #[serde(default = "default_donate_rule")]
    pub donate: ThresholdRule,

    #[serde(default = "default_form_rule")]
    pub form: ThresholdRule,

    /// Text copied by the donate capsule
    #[serde(default)]
    pub copy_text: String,

    /// URL opened by the form capsule
    #[serde(default)]
    pub form_url: String,

    /// How long "INFO COPIED" stays visible
    #[serde(default = "default_feedback_ms")]
    pub feedback_ms: u64,

    /// Cross-fade of the donate label
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
}

impl Default for CallToActionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_pages: default_min_pages(),
            donate: default_donate_rule(),
            form: default_form_rule(),
            copy_text: String::new(),
            form_url: String::new(),
            feedback_ms: default_feedback_ms(),
            fade_ms: default_fade_ms(),
        }
    }
}

impl CallToActionSettings {
    pub fn policy(&self) -> CallToActionPolicy {
        CallToActionPolicy {
            enabled: self.enabled,
            min_pages: self.min_pages,
            donate: self.donate,
            form: self.form,
        }
    }
}

fn default_min_pages() -> u32 {
    CallToActionPolicy::default().min_pages
}

fn default_donate_rule() -> ThresholdRule {
    CallToActionPolicy::default().donate
}

fn default_form_rule() -> ThresholdRule {
    CallToActionPolicy::default().form
}

fn default_feedback_ms() -> u64 {
    3000
}

/// Document file watcher
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WatcherSettings {
    /// Reload the deck when its file changes
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Debounce duration in milliseconds
    #[serde(default = "default_watcher_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: default_watcher_debounce_ms(),
        }
    }
}

fn default_watcher_debounce_ms() -> u64 {
    500
}

/// Behavior settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Browser used to open links (empty = system default)
    #[serde(default)]
    pub browser: String,
}

fn default_true() -> bool {
    true
}

/// Insertions file (.deckview/insertions.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InsertionsFile {
    #[serde(default)]
    pub insertions: Vec<deck_core::RawInsertion>,
}
