//! Game controllers: one state machine per stage kind
//!
//! Every controller implements [`StageController`]; the [`Controller`] enum
//! is the tagged variant the arcade mounts for the active stage.
//!
//! ## Lifecycle
//!
//! 1. `mount`: build a fresh controller for a stage
//! 2. `start`: begin a round (reflex, recall) or draw a new riddle (puzzle)
//! 3. `tick`: fire the pending timer once its deadline has passed
//! 4. `handle_input`: apply player input, possibly ending the round
//! 5. `teardown`: cancel the pending timer before the controller is dropped

mod puzzle;
mod recall;
mod reflex;

use std::sync::Arc;

use mc_stage::{ControllerKind, RoundOutcome, StageStats};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::ArcadeConfig;
use crate::content::{ContentBanks, Symbol};

pub use puzzle::*;
pub use recall::*;
pub use reflex::*;

/// Player input routed to the active controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PlayerInput {
    /// Reflex tap
    Tap,
    /// Recall guess, compared by identity with the missing symbol
    Guess(Symbol),
    /// Puzzle answer by index into the current riddle's answers
    Answer(usize),
}

/// Read-only snapshot of a controller for a presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControllerView {
    Reflex {
        phase: ReflexPhase,
        message: String,
        last_reaction_ms: Option<u32>,
    },
    Recall {
        phase: RecallPhase,
        hint: String,
        /// Symbols on the board, in order
        symbols: Vec<Symbol>,
        /// True once the line-up is face down: the guess phase, and after a
        /// finished round. Never true before the first round.
        concealed: bool,
    },
    Puzzle {
        feedback: String,
        prompt: Option<String>,
        answers: Vec<String>,
    },
}

/// The interface every stage controller implements
pub trait StageController {
    /// Which kind of stage this controller plays
    fn kind(&self) -> ControllerKind;

    /// Begin a round
    fn start(&mut self, now_ms: f64);

    /// Apply input; returns the outcome when the input ends a round.
    /// Input that does not fit the current phase is ignored.
    fn handle_input(
        &mut self,
        input: &PlayerInput,
        now_ms: f64,
        stats: &StageStats,
    ) -> Option<RoundOutcome>;

    /// Fire the pending timer if due. Returns true if the state changed.
    fn tick(&mut self, now_ms: f64) -> bool;

    /// Deadline of the pending timer, if any
    fn next_deadline(&self) -> Option<f64>;

    /// Cancel outstanding timers; called before the controller is dropped
    fn teardown(&mut self);

    /// Snapshot for display
    fn view(&self) -> ControllerView;
}

/// Tagged variant over the controller kinds
#[derive(Debug)]
pub enum Controller {
    Reflex(ReflexController),
    Recall(RecallController),
    Puzzle(PuzzleController),
}

impl Controller {
    /// Build a fresh controller of the given kind
    pub fn mount(
        kind: ControllerKind,
        config: &ArcadeConfig,
        content: Arc<ContentBanks>,
        rng: StdRng,
    ) -> Self {
        match kind {
            ControllerKind::Reflex => Self::Reflex(ReflexController::new(config.reflex, content, rng)),
            ControllerKind::Recall => Self::Recall(RecallController::new(config.recall, content, rng)),
            ControllerKind::Puzzle => Self::Puzzle(PuzzleController::new(content, rng)),
        }
    }

    fn as_dyn(&self) -> &dyn StageController {
        match self {
            Self::Reflex(c) => c,
            Self::Recall(c) => c,
            Self::Puzzle(c) => c,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn StageController {
        match self {
            Self::Reflex(c) => c,
            Self::Recall(c) => c,
            Self::Puzzle(c) => c,
        }
    }
}

impl StageController for Controller {
    fn kind(&self) -> ControllerKind {
        self.as_dyn().kind()
    }

    fn start(&mut self, now_ms: f64) {
        self.as_dyn_mut().start(now_ms)
    }

    fn handle_input(
        &mut self,
        input: &PlayerInput,
        now_ms: f64,
        stats: &StageStats,
    ) -> Option<RoundOutcome> {
        self.as_dyn_mut().handle_input(input, now_ms, stats)
    }

    fn tick(&mut self, now_ms: f64) -> bool {
        self.as_dyn_mut().tick(now_ms)
    }

    fn next_deadline(&self) -> Option<f64> {
        self.as_dyn().next_deadline()
    }

    fn teardown(&mut self) {
        self.as_dyn_mut().teardown()
    }

    fn view(&self) -> ControllerView {
        self.as_dyn().view()
    }
}
