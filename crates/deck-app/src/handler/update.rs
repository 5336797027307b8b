//! Main update function - handles state transitions (TEA pattern)
//!
//! Handler implementations live in:
//! - `document`: renderer/document lifecycle, page renders, preloading
//! - `navigation`: guards and transition phases
//! - `carousel`: idle indicator carousel
//! - `capsules`: call-to-action reveal, donate feedback, links, notices

use deck_core::prelude::*;

use crate::gesture::wheel_intent;
use crate::message::Message;
use crate::signals::ShutdownCause;
use crate::state::{LoadStage, ViewerState};
use crate::timer::{Timer, TimerSlot};

use super::{
    capsules, carousel, document, keys::handle_key, navigation, UpdateAction, UpdateResult,
};

/// Process a message and update state
/// Returns optional follow-up message and/or actions
pub fn update(state: &mut ViewerState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            info!("Quit requested");
            state.request_quit(ShutdownCause::UserQuit);
            UpdateResult::action(UpdateAction::CancelTimers(TimerSlot::ALL.to_vec()))
        }

        Message::Signal(cause) => {
            info!("Stopping on {} signal", cause.as_str());
            state.request_quit(cause);
            UpdateResult::action(UpdateAction::CancelTimers(TimerSlot::ALL.to_vec()))
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        // ─────────────────────────────────────────────────────────
        // Input Adapters
        // ─────────────────────────────────────────────────────────
        Message::Pointer(event) => {
            let min_distance = state.settings.input.swipe_min_distance;
            match state.swipe.handle(event, min_distance) {
                Some(intent) => UpdateResult::message(Message::Navigate(intent)),
                None => UpdateResult::none(),
            }
        }

        Message::Wheel { delta_y } => match wheel_intent(delta_y) {
            Some(intent) => UpdateResult::message(Message::Navigate(intent)),
            None => UpdateResult::none(),
        },

        Message::IndicatorTap => navigation::handle_indicator_tap(state),

        Message::Navigate(intent) => navigation::handle_navigate(state, intent),

        Message::Resize { width, height } => document::handle_resize(state, width, height),

        // ─────────────────────────────────────────────────────────
        // Document Lifecycle
        // ─────────────────────────────────────────────────────────
        Message::Start => document::handle_start(state),

        Message::RendererReady { generation } => document::handle_renderer_ready(state, generation),

        Message::RendererFailed {
            generation,
            message,
        } => document::handle_load_failed(state, generation, LoadStage::Renderer, message),

        Message::DocumentLoaded { generation, info } => {
            document::handle_document_loaded(state, generation, info)
        }

        Message::DocumentFailed {
            generation,
            message,
        } => document::handle_load_failed(state, generation, LoadStage::Document, message),

        Message::PageRendered {
            generation,
            purpose,
            page,
        } => document::handle_page_rendered(state, generation, purpose, page),

        Message::PageRenderFailed {
            generation,
            purpose,
            page,
            message,
        } => document::handle_page_render_failed(state, generation, purpose, page, message),

        Message::RetryLoad => document::handle_retry(state),

        // ─────────────────────────────────────────────────────────
        // File Watcher
        // ─────────────────────────────────────────────────────────
        Message::DocumentChanged => document::handle_document_changed(state),

        Message::WatcherError { message } => {
            warn!("Deck watcher error: {}", message);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Call To Action
        // ─────────────────────────────────────────────────────────
        Message::DonatePressed => capsules::handle_donate_pressed(state),
        Message::FormPressed => capsules::handle_form_pressed(state),
        Message::OpenInsertion => capsules::handle_open_insertion(state),
        Message::CopyFinished { result } => capsules::handle_copy_finished(state, result),
        Message::LinkOpened { url, result } => capsules::handle_link_opened(state, url, result),
        Message::DismissNotice => capsules::handle_dismiss_notice(state),

        // ─────────────────────────────────────────────────────────
        // Timers
        // ─────────────────────────────────────────────────────────
        Message::TimerFired(timer) => handle_timer(state, timer),
    }
}

fn handle_timer(state: &mut ViewerState, timer: Timer) -> UpdateResult {
    if state.should_quit() {
        return UpdateResult::none();
    }

    match timer {
        Timer::AnimationReady { generation } => document::handle_animation_ready(state, generation),
        Timer::LoadingSettled { generation } => document::handle_loading_settled(state, generation),
        Timer::ExitElapsed { navigation } => navigation::handle_exit_elapsed(state, navigation),
        Timer::EnterElapsed { navigation } => navigation::handle_enter_elapsed(state, navigation),
        Timer::SettleElapsed { navigation } => navigation::handle_settle_elapsed(state, navigation),
        Timer::CarouselTick { epoch } => carousel::handle_tick(state, epoch),
        Timer::CarouselFade { epoch } => carousel::handle_fade(state, epoch),
        Timer::Capsule(step) => capsules::handle_step(state, step),
        Timer::CopyFeedback { step, epoch } => capsules::handle_feedback(state, step, epoch),
    }
}
