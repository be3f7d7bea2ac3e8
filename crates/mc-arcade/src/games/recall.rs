//! Recall Controller
//!
//! ready → memorize → guess → ready. A shuffled line-up is shown for a fixed
//! time, then one symbol vanishes and the player names it. The guess is
//! checked against the stored missing symbol, never against the board.

use std::sync::Arc;

use mc_stage::{ControllerKind, FailureKind, RoundOutcome, StageStats};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::RecallConfig;
use crate::content::{ContentBanks, Symbol};
use crate::timing::OneShotTimer;

use super::{ControllerView, PlayerInput, StageController};

const READY_HINT: &str = "Peek at the weird squad. One will ghost you. 👻";
const MEMORIZE_HINT: &str = "Study the gang. Someone will sneak off in 3…2…1…";
const GUESS_HINT: &str = "Who dipped out? Tap the missing friend.";
const CORRECT_HINT: &str = "Legendary memory flex! 🌈";
const WRONG_HINT: &str = "Oops! Emojis demand justice. Try again. 🙈";

/// Recall round phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecallPhase {
    #[default]
    Ready,
    Memorize,
    Guess,
}

#[derive(Debug, Clone, Default)]
struct RecallRound {
    phase: RecallPhase,
    /// Symbols on the board, in display order
    displayed: Vec<Symbol>,
    missing: Option<Symbol>,
    /// Every symbol of the drawn pattern
    palette: Vec<Symbol>,
}

#[derive(Debug)]
pub struct RecallController {
    config: RecallConfig,
    content: Arc<ContentBanks>,
    rng: StdRng,
    timer: OneShotTimer,
    round: RecallRound,
    hint: String,
}

impl RecallController {
    pub fn new(config: RecallConfig, content: Arc<ContentBanks>, rng: StdRng) -> Self {
        Self {
            config,
            content,
            rng,
            timer: OneShotTimer::new(),
            round: RecallRound::default(),
            hint: READY_HINT.to_string(),
        }
    }

    pub fn phase(&self) -> RecallPhase {
        self.round.phase
    }

    /// Symbols currently on the board
    pub fn displayed(&self) -> &[Symbol] {
        &self.round.displayed
    }

    /// The full pattern of the current round, for offering guess choices
    pub fn palette(&self) -> &[Symbol] {
        &self.round.palette
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// The symbol that vanishes (or vanished) this round
    pub fn missing(&self) -> Option<&Symbol> {
        self.round.missing.as_ref()
    }

    /// Name the missing symbol. Ignored outside the guess phase.
    pub fn guess(&mut self, candidate: &Symbol, stats: &StageStats) -> Option<RoundOutcome> {
        if self.round.phase != RecallPhase::Guess {
            return None;
        }
        // The round ends whatever the answer
        self.round.phase = RecallPhase::Ready;

        if self.round.missing.as_ref() == Some(candidate) {
            self.hint = CORRECT_HINT.to_string();
            Some(RoundOutcome::success(stats.streak + 1))
        } else {
            self.hint = WRONG_HINT.to_string();
            Some(RoundOutcome::failure(FailureKind::Wrong))
        }
    }

    fn reveal(&mut self) {
        if let Some(missing) = &self.round.missing {
            self.round.displayed.retain(|s| s != missing);
        }
        self.round.phase = RecallPhase::Guess;
        self.hint = GUESS_HINT.to_string();
        log::debug!("Recall: reveal, {} symbols left", self.round.displayed.len());
    }
}

impl StageController for RecallController {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Recall
    }

    fn start(&mut self, now_ms: f64) {
        let Some(pattern) = self.content.patterns.choose(&mut self.rng) else {
            log::warn!("Recall: pattern bank is empty, round not started");
            return;
        };
        let palette = pattern.symbols().to_vec();
        if palette.is_empty() {
            log::warn!("Recall: drew an empty pattern, round not started");
            return;
        }

        let mut line_up = palette.clone();
        line_up.shuffle(&mut self.rng);
        let missing = line_up.remove(self.rng.random_range(0..line_up.len()));
        // Back in at any slot, possibly where it was
        let slot = self.rng.random_range(0..=line_up.len());
        line_up.insert(slot, missing.clone());

        self.round = RecallRound {
            phase: RecallPhase::Memorize,
            displayed: line_up,
            missing: Some(missing),
            palette,
        };
        self.hint = MEMORIZE_HINT.to_string();
        self.timer.schedule(now_ms, self.config.reveal_delay_ms);
    }

    fn handle_input(
        &mut self,
        input: &PlayerInput,
        _now_ms: f64,
        stats: &StageStats,
    ) -> Option<RoundOutcome> {
        match input {
            PlayerInput::Guess(candidate) => self.guess(candidate, stats),
            _ => None,
        }
    }

    fn tick(&mut self, now_ms: f64) -> bool {
        if self.round.phase != RecallPhase::Memorize {
            return false;
        }
        if self.timer.fire_if_due(now_ms).is_some() {
            self.reveal();
            true
        } else {
            false
        }
    }

    fn next_deadline(&self) -> Option<f64> {
        self.timer.deadline_ms()
    }

    fn teardown(&mut self) {
        self.timer.cancel();
        self.round = RecallRound::default();
    }

    fn view(&self) -> ControllerView {
        ControllerView::Recall {
            phase: self.round.phase,
            hint: self.hint.clone(),
            symbols: self.round.displayed.clone(),
            concealed: match self.round.phase {
                RecallPhase::Memorize => false,
                RecallPhase::Guess => true,
                // Face down after a finished round; nothing to hide before the first
                RecallPhase::Ready => !self.round.displayed.is_empty(),
            },
        }
    }
}
