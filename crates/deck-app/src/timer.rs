//! Timed events of the viewer
//!
//! Every delayed state change is an explicit [`Timer`] scheduled through
//! `UpdateAction::ScheduleTimer` and delivered back as
//! `Message::TimerFired`. Each timer carries the token of the cycle that
//! scheduled it (document generation, navigation id or epoch) so handlers
//! can ignore a fire that was superseded while it sat in the queue.

use deck_core::LatchStep;

/// A delayed event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Navigation becomes available after the first document load
    AnimationReady { generation: u64 },

    /// Dismiss the loading overlay after every page rendered
    LoadingSettled { generation: u64 },

    /// Exit animation done; the position changes now
    ExitElapsed { navigation: u64 },

    /// Enter animation done
    EnterElapsed { navigation: u64 },

    /// Settle done; the controller returns to idle
    SettleElapsed { navigation: u64 },

    /// Start a label cross-fade and schedule the next one
    CarouselTick { epoch: u64 },

    /// Mid-fade: toggle the indicator label
    CarouselFade { epoch: u64 },

    /// Next step of a capsule reveal
    Capsule(LatchStep),

    /// Next step of the donate label feedback
    CopyFeedback { step: FeedbackStep, epoch: u64 },
}

/// Steps of the donate label cross-fades after a successful copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackStep {
    /// Fade finished: show "INFO COPIED"
    ShowCopied,
    /// Feedback period over: start fading out
    BeginRevert,
    /// Fade finished: back to "DONATE"
    ShowDonate,
}

/// Scheduling slot. Scheduling a timer replaces the pending timer of the
/// same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerSlot {
    Animation,
    LoadingSettle,
    Transition,
    CarouselTick,
    CarouselFade,
    Capsule,
    CopyFeedback,
}

impl TimerSlot {
    pub const ALL: [TimerSlot; 7] = [
        TimerSlot::Animation,
        TimerSlot::LoadingSettle,
        TimerSlot::Transition,
        TimerSlot::CarouselTick,
        TimerSlot::CarouselFade,
        TimerSlot::Capsule,
        TimerSlot::CopyFeedback,
    ];
}

impl Timer {
    pub fn slot(&self) -> TimerSlot {
        match self {
            Timer::AnimationReady { .. } => TimerSlot::Animation,
            Timer::LoadingSettled { .. } => TimerSlot::LoadingSettle,
            Timer::ExitElapsed { .. } | Timer::EnterElapsed { .. } | Timer::SettleElapsed { .. } => {
                TimerSlot::Transition
            }
            Timer::CarouselTick { .. } => TimerSlot::CarouselTick,
            Timer::CarouselFade { .. } => TimerSlot::CarouselFade,
            Timer::Capsule(_) => TimerSlot::Capsule,
            Timer::CopyFeedback { .. } => TimerSlot::CopyFeedback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_timers_share_a_slot() {
        assert_eq!(
            Timer::ExitElapsed { navigation: 1 }.slot(),
            Timer::SettleElapsed { navigation: 1 }.slot()
        );
    }

    #[test]
    fn test_carousel_timers_use_separate_slots() {
        assert_ne!(
            Timer::CarouselTick { epoch: 1 }.slot(),
            Timer::CarouselFade { epoch: 1 }.slot()
        );
    }
}
