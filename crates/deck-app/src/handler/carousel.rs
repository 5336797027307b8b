//! Idle indicator carousel
//!
//! While idle the indicator alternates between the page label and "NEXT".
//! Each cycle fades the label out, toggles it halfway through the fade and
//! fades back in. Every start or stop bumps the epoch so ticks from an older
//! cycle are ignored.

use crate::state::ViewerState;
use crate::timer::{Timer, TimerSlot};

use super::{UpdateAction, UpdateResult};

/// Stop the carousel and show the page label
pub(crate) fn stop(state: &mut ViewerState) -> Vec<UpdateAction> {
    let indicator = &mut state.indicator;
    indicator.epoch += 1;
    indicator.running = false;
    indicator.fading = false;
    indicator.show_page_number = true;

    vec![UpdateAction::CancelTimers(vec![
        TimerSlot::CarouselTick,
        TimerSlot::CarouselFade,
    ])]
}

/// (Re)start the carousel; the first toggle happens `delay_ms` plus one
/// period from now
pub(crate) fn start(state: &mut ViewerState, delay_ms: u64) -> Vec<UpdateAction> {
    let period_ms = state.settings.carousel.period_ms;
    let indicator = &mut state.indicator;
    indicator.epoch += 1;
    indicator.running = true;
    indicator.fading = false;

    vec![
        UpdateAction::CancelTimers(vec![TimerSlot::CarouselFade]),
        UpdateAction::schedule(
            Timer::CarouselTick {
                epoch: indicator.epoch,
            },
            delay_ms + period_ms,
        ),
    ]
}

pub(crate) fn handle_tick(state: &mut ViewerState, epoch: u64) -> UpdateResult {
    if !state.indicator.running || epoch != state.indicator.epoch {
        return UpdateResult::none();
    }

    state.indicator.fading = true;

    let carousel = &state.settings.carousel;
    UpdateResult::actions(vec![
        UpdateAction::schedule(Timer::CarouselFade { epoch }, carousel.fade_ms),
        UpdateAction::schedule(Timer::CarouselTick { epoch }, carousel.period_ms),
    ])
}

pub(crate) fn handle_fade(state: &mut ViewerState, epoch: u64) -> UpdateResult {
    if !state.indicator.running || epoch != state.indicator.epoch {
        return UpdateResult::none();
    }

    state.indicator.show_page_number = !state.indicator.show_page_number;
    state.indicator.fading = false;
    UpdateResult::none()
}
