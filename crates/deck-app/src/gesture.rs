//! Pointer gestures: swipe tracking and wheel mapping
//!
//! Adapters only classify input. Debouncing belongs to the navigation
//! controller, so nothing here keeps a cooldown.

use deck_core::{Direction, NavigationIntent};

/// Phase of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A single pointer sample, in pixel units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
    /// Number of active pointers (touch points) when the event fired
    pub pointers: u8,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            phase,
            x,
            y,
            pointers: 1,
        }
    }
}

/// Tracks one single-pointer swipe from start to end
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
    last: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed a pointer event. Returns an intent when a swipe completes.
    pub fn handle(&mut self, event: PointerEvent, min_distance: f32) -> Option<NavigationIntent> {
        if event.pointers != 1 && event.phase != PointerPhase::End {
            self.reset();
            return None;
        }

        match event.phase {
            PointerPhase::Start => {
                self.start = Some((event.x, event.y));
                self.last = self.start;
                None
            }
            PointerPhase::Move => {
                if self.start.is_some() {
                    self.last = Some((event.x, event.y));
                }
                None
            }
            PointerPhase::End => {
                let start = self.start?;
                self.reset();
                classify_swipe(event.x - start.0, event.y - start.1, min_distance)
            }
            PointerPhase::Cancel => {
                self.reset();
                None
            }
        }
    }
}

/// Map a displacement to a swipe intent.
///
/// Accepted when the displacement is at least `min_distance` long and mostly
/// horizontal. Dragging right goes back, dragging left goes forward.
pub fn classify_swipe(dx: f32, dy: f32, min_distance: f32) -> Option<NavigationIntent> {
    let distance = (dx * dx + dy * dy).sqrt();
    if distance < min_distance || dx.abs() <= dy.abs() {
        return None;
    }

    if dx > 0.0 {
        Some(NavigationIntent::prev(Direction::Left))
    } else {
        Some(NavigationIntent::next(Direction::Right))
    }
}

/// Map a wheel tick to an intent; scrolling down goes back
pub fn wheel_intent(delta_y: f32) -> Option<NavigationIntent> {
    if delta_y > 0.0 {
        Some(NavigationIntent::prev(Direction::Up))
    } else if delta_y < 0.0 {
        Some(NavigationIntent::next(Direction::Down))
    } else {
        None
    }
}
