//! # deck-core - Core Domain Types
//!
//! Foundation crate for deckview. Provides the sequencing, caching and
//! preload-scheduling logic of the viewer along with error handling and
//! logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, toml, tracing).
//!
//! ## Public API
//!
//! ### Sequencing (`sequence`, `insertion`)
//! - [`SequenceMapper`] - Merges document pages and insertions into one walk
//! - [`SequenceSlot`] - What a sequence position shows
//! - [`RawInsertion`] / [`Insertion`] - On-disk and canonical insertion rules
//! - [`normalize_insertions()`] - Validate, filter and sort insertion rules
//!
//! ### Loading (`cache`, `preload`)
//! - [`ContentCache`] - Pages that completed a render pass, readiness and progress
//! - [`next_batch()`] - Priority order for off-screen preload renders
//!
//! ### Call to action (`cta`)
//! - [`CallToActionPolicy`] - Tunable thresholds for the capsules
//! - [`CapsuleLatch`] - One-way reveal latch
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use deck_core::prelude::*;
//! ```

pub mod cache;
pub mod cta;
pub mod error;
pub mod insertion;
pub mod layout;
pub mod logging;
pub mod preload;
pub mod sequence;
pub mod types;

/// Prelude for common imports used throughout all deckview crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use cache::ContentCache;
pub use cta::{
    CallToActionPolicy, CapsuleLatch, CapsuleStage, CtaThresholds, LatchStep, ThresholdRule,
    REVEAL_STEP_MS,
};
pub use error::{Error, Result, ResultExt};
pub use insertion::{
    find_insertion, normalize_insertions, Insertion, NormalizedInsertions, RawInsertion,
    RejectReason, RejectedInsertion, TitleSpec,
};
pub use layout::{capsule_offset, fit_page, indicator_height, DEFAULT_ASPECT_RATIO};
pub use preload::{batch_with_neighbours, next_batch, preload_width, DEFAULT_PRELOAD_CAP};
pub use sequence::{SequenceMapper, SequenceSlot};
pub use types::{Direction, NavigationIntent, PageSize, StepKind, Transition, TransitionPhase};
