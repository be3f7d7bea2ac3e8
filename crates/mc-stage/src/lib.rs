//! # mc-stage: Mind Circus Stage System
//!
//! Defines the stages of the arcade and the bookkeeping shared between them.
//! Controllers never touch statistics directly; they emit [`RoundOutcome`]s
//! and the [`StatsAggregator`] folds them into per-stage [`StageStats`].
//!
//! ## Architecture
//!
//! ```text
//! StageCatalog ──> StageSelector (active stage id)
//!                        │
//!   RoundOutcome ──> StatsAggregator ──> StageStats per stage
//!                        │
//!                  SessionJournal (bounded history)
//! ```

pub mod catalog;
pub mod journal;
pub mod outcome;
pub mod selector;
pub mod stage;
pub mod stats;

pub use catalog::*;
pub use journal::*;
pub use outcome::*;
pub use selector::*;
pub use stage::*;
pub use stats::*;
