//! Call-to-action capsules and external links
//!
//! The reveal latch lives in `deck_core::cta`; this module feeds it the
//! current position and turns its steps into timers. The donate label
//! feedback is a chain of three timers guarded by `feedback_epoch`.

use deck_core::prelude::*;
use deck_core::{CapsuleStage, LatchStep, REVEAL_STEP_MS};

use crate::state::{DonateLabel, ViewerState};
use crate::timer::{FeedbackStep, Timer};

use super::{UpdateAction, UpdateResult};

/// Check the thresholds against the current position
pub(crate) fn observe(state: &mut ViewerState) -> Vec<UpdateAction> {
    let position = state.navigation.position;
    let thresholds = state.capsules.thresholds;
    match state.capsules.latch.observe(position, thresholds) {
        Some(step) => {
            debug!("Capsule reveal started at position {}", position);
            vec![UpdateAction::schedule(Timer::Capsule(step), REVEAL_STEP_MS)]
        }
        None => Vec::new(),
    }
}

pub(crate) fn handle_step(state: &mut ViewerState, step: LatchStep) -> UpdateResult {
    match state.capsules.latch.apply(step) {
        Some(next) => {
            UpdateResult::action(UpdateAction::schedule(Timer::Capsule(next), REVEAL_STEP_MS))
        }
        None => {
            // A resting stage may already be past the next threshold
            let stage = state.capsules.latch.stage();
            if matches!(stage, CapsuleStage::Dual | CapsuleStage::Triple) {
                debug!("Capsules settled at {}", stage.as_str());
                UpdateResult::actions(observe(state))
            } else {
                UpdateResult::none()
            }
        }
    }
}

pub(crate) fn handle_donate_pressed(state: &mut ViewerState) -> UpdateResult {
    if !state.capsules.latch.donate_visible() {
        debug!("Donate capsule not revealed yet");
        return UpdateResult::none();
    }

    let text = state.settings.call_to_action.copy_text.trim();
    if text.is_empty() {
        warn!("Donate pressed but call_to_action.copy_text is empty");
        return UpdateResult::none();
    }

    UpdateResult::action(UpdateAction::CopyText {
        text: text.to_string(),
    })
}

pub(crate) fn handle_copy_finished(
    state: &mut ViewerState,
    result: std::result::Result<(), String>,
) -> UpdateResult {
    match result {
        Ok(()) => {
            info!("Donation info copied");
            let capsules = &mut state.capsules;
            capsules.feedback_epoch += 1;
            capsules.label_fading = true;
            UpdateResult::action(UpdateAction::schedule(
                Timer::CopyFeedback {
                    step: FeedbackStep::ShowCopied,
                    epoch: capsules.feedback_epoch,
                },
                state.settings.call_to_action.fade_ms,
            ))
        }
        Err(message) => {
            warn!("Copy failed, showing donation info instead: {}", message);
            state.notice = Some(format!(
                "Please copy this donation information:\n\n{}",
                state.settings.call_to_action.copy_text.trim()
            ));
            UpdateResult::none()
        }
    }
}

pub(crate) fn handle_feedback(state: &mut ViewerState, step: FeedbackStep, epoch: u64) -> UpdateResult {
    if epoch != state.capsules.feedback_epoch {
        return UpdateResult::none();
    }

    let settings = &state.settings.call_to_action;
    let capsules = &mut state.capsules;
    match step {
        FeedbackStep::ShowCopied => {
            capsules.donate_label = DonateLabel::InfoCopied;
            capsules.label_fading = false;
            UpdateResult::action(UpdateAction::schedule(
                Timer::CopyFeedback {
                    step: FeedbackStep::BeginRevert,
                    epoch,
                },
                settings.feedback_ms,
            ))
        }
        FeedbackStep::BeginRevert => {
            capsules.label_fading = true;
            UpdateResult::action(UpdateAction::schedule(
                Timer::CopyFeedback {
                    step: FeedbackStep::ShowDonate,
                    epoch,
                },
                settings.fade_ms,
            ))
        }
        FeedbackStep::ShowDonate => {
            capsules.donate_label = DonateLabel::Donate;
            capsules.label_fading = false;
            UpdateResult::none()
        }
    }
}

pub(crate) fn handle_form_pressed(state: &mut ViewerState) -> UpdateResult {
    if !state.capsules.latch.form_visible() {
        debug!("Form capsule not revealed yet");
        return UpdateResult::none();
    }

    let url = state.settings.call_to_action.form_url.trim();
    if url.is_empty() {
        warn!("Form pressed but call_to_action.form_url is empty");
        return UpdateResult::none();
    }

    UpdateResult::action(UpdateAction::OpenLink {
        url: url.to_string(),
    })
}

/// Open the insertion on screen outside the viewer
pub(crate) fn handle_open_insertion(state: &mut ViewerState) -> UpdateResult {
    match state.current_insertion() {
        Some(insertion) => UpdateResult::action(UpdateAction::OpenLink {
            url: insertion.url.clone(),
        }),
        None => UpdateResult::none(),
    }
}

pub(crate) fn handle_link_opened(
    state: &mut ViewerState,
    url: String,
    result: std::result::Result<(), String>,
) -> UpdateResult {
    match result {
        Ok(()) => {
            info!("Opened {}", url);
            state.links_opened += 1;
            state.last_link = Some(url);
        }
        Err(message) => {
            warn!("Failed to open {}: {}", url, message);
            state.notice = Some(format!("Could not open link:\n\n{}", url));
        }
    }
    UpdateResult::none()
}

pub(crate) fn handle_dismiss_notice(state: &mut ViewerState) -> UpdateResult {
    state.notice = None;
    UpdateResult::none()
}
