//! Core domain type definitions

use serde::Serialize;

/// Spatial direction used to animate a page transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which way through the sequence a step goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Next,
    Prev,
}

/// A navigation request, as produced by every input adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationIntent {
    /// Move one position with a directional animation
    Step {
        step: StepKind,
        direction: Direction,
    },
    /// Return to position 1 without the exit/enter choreography
    JumpToStart,
}

impl NavigationIntent {
    pub fn next(direction: Direction) -> Self {
        Self::Step {
            step: StepKind::Next,
            direction,
        }
    }

    pub fn prev(direction: Direction) -> Self {
        Self::Step {
            step: StepKind::Prev,
            direction,
        }
    }
}

/// Animation phase of the current transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPhase {
    #[default]
    Idle,
    Exiting,
    Entering,
    Settling,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::Idle => "idle",
            TransitionPhase::Exiting => "exiting",
            TransitionPhase::Entering => "entering",
            TransitionPhase::Settling => "settling",
        }
    }
}

/// Transition descriptor exposed for animation styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Transition {
    pub direction: Option<Direction>,
    pub phase: TransitionPhase,
}

impl Transition {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.phase == TransitionPhase::Idle
    }
}

/// Size of a rendered page in shell units (pixels, or cells for a terminal)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
