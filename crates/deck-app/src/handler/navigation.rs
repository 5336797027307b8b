//! Navigation controller
//!
//! An accepted step runs `Exiting -> Entering -> Settling -> Idle`. The
//! position changes exactly once per accepted intent, when the exit
//! animation ends. Intents that arrive while a transition runs, before the
//! first document load settled, inside the debounce window or that would
//! leave the sequence are dropped without any state change.

use tokio::time::Instant;

use deck_core::prelude::*;
use deck_core::{NavigationIntent, StepKind, Transition, TransitionPhase};

use crate::state::ViewerState;
use crate::timer::Timer;

use super::{carousel, document, UpdateAction, UpdateResult};

/// Why an intent was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationRejected {
    /// Navigation is not enabled yet
    NotInitialized,
    /// A transition is running
    Busy,
    /// Too soon after the previous accepted navigation
    Debounced,
    /// The target lies outside the sequence
    OutOfRange,
    /// Already at the first position
    AlreadyAtStart,
}

/// Apply the controller guards to an intent.
///
/// On acceptance returns the actions that drive the transition.
pub fn request_navigation(
    state: &mut ViewerState,
    intent: NavigationIntent,
    now: Instant,
) -> std::result::Result<Vec<UpdateAction>, NavigationRejected> {
    match intent {
        NavigationIntent::Step { step, direction } => {
            let navigation = &state.navigation;
            if !navigation.initialized {
                return Err(NavigationRejected::NotInitialized);
            }
            if !navigation.transition.is_idle() {
                return Err(NavigationRejected::Busy);
            }
            if let Some(last) = navigation.last_accepted {
                if now.saturating_duration_since(last) < state.settings.navigation.debounce() {
                    return Err(NavigationRejected::Debounced);
                }
            }

            let target = match step {
                StepKind::Next => navigation.position.checked_add(1),
                StepKind::Prev => navigation.position.checked_sub(1),
            }
            .filter(|target| state.mapper.contains(*target))
            .ok_or(NavigationRejected::OutOfRange)?;

            let mut actions = carousel::stop(state);

            let navigation = &mut state.navigation;
            navigation.last_accepted = Some(now);
            navigation.navigation_id += 1;
            navigation.target = Some(target);
            navigation.transition = Transition {
                direction: Some(direction),
                phase: TransitionPhase::Exiting,
            };
            debug!(
                "Navigating {} -> {} ({})",
                navigation.position, target, direction
            );

            actions.push(UpdateAction::schedule(
                Timer::ExitElapsed {
                    navigation: navigation.navigation_id,
                },
                state.settings.navigation.exit_ms,
            ));
            Ok(actions)
        }

        NavigationIntent::JumpToStart => {
            if !state.navigation.transition.is_idle() {
                return Err(NavigationRejected::Busy);
            }
            if state.mapper.is_empty() {
                return Err(NavigationRejected::OutOfRange);
            }
            if state.navigation.position == 1 {
                return Err(NavigationRejected::AlreadyAtStart);
            }

            debug!("Jumping to start from {}", state.navigation.position);
            let mut actions = carousel::stop(state);
            state.navigation.position = 1;
            actions.extend(document::show_current(state));
            let delay = state.settings.carousel.restart_delay_ms;
            actions.extend(carousel::start(state, delay));
            Ok(actions)
        }
    }
}

/// Route an intent through the guards, logging rejections at debug level
pub(crate) fn handle_navigate(state: &mut ViewerState, intent: NavigationIntent) -> UpdateResult {
    match request_navigation(state, intent, Instant::now()) {
        Ok(actions) => UpdateResult::actions(actions),
        Err(reason) => {
            debug!("Navigation {:?} dropped: {:?}", intent, reason);
            UpdateResult::none()
        }
    }
}

/// Tap on the indicator: back to the start from the last position,
/// otherwise a step forward
pub(crate) fn handle_indicator_tap(state: &mut ViewerState) -> UpdateResult {
    let intent = if state.is_at_end() {
        NavigationIntent::JumpToStart
    } else {
        NavigationIntent::next(deck_core::Direction::Right)
    };
    handle_navigate(state, intent)
}

fn is_current(state: &ViewerState, navigation: u64, phase: TransitionPhase) -> bool {
    state.navigation.navigation_id == navigation && state.navigation.transition.phase == phase
}

pub(crate) fn handle_exit_elapsed(state: &mut ViewerState, navigation: u64) -> UpdateResult {
    if !is_current(state, navigation, TransitionPhase::Exiting) {
        return UpdateResult::none();
    }

    let Some(target) = state.navigation.target.take() else {
        return UpdateResult::none();
    };

    state.navigation.position = target;
    state.navigation.transition.phase = TransitionPhase::Entering;

    let mut actions = document::show_current(state);
    actions.push(UpdateAction::schedule(
        Timer::EnterElapsed { navigation },
        state.settings.navigation.enter_ms,
    ));
    UpdateResult::actions(actions)
}

pub(crate) fn handle_enter_elapsed(state: &mut ViewerState, navigation: u64) -> UpdateResult {
    if !is_current(state, navigation, TransitionPhase::Entering) {
        return UpdateResult::none();
    }

    state.navigation.transition.phase = TransitionPhase::Settling;
    UpdateResult::action(UpdateAction::schedule(
        Timer::SettleElapsed { navigation },
        state.settings.navigation.settle_ms,
    ))
}

pub(crate) fn handle_settle_elapsed(state: &mut ViewerState, navigation: u64) -> UpdateResult {
    if !is_current(state, navigation, TransitionPhase::Settling) {
        return UpdateResult::none();
    }

    state.navigation.transition = Transition::idle();
    let delay = state.settings.carousel.restart_delay_ms;
    UpdateResult::actions(carousel::start(state, delay))
}
