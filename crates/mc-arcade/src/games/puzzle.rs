//! Puzzle Controller
//!
//! Multiple-choice riddles. A correct answer scores and moves on to another
//! riddle; a wrong one keeps the same riddle up for another try.

use std::sync::Arc;

use mc_stage::{ControllerKind, FailureKind, RoundOutcome, StageStats};
use rand::prelude::*;

use crate::content::{ContentBanks, Riddle};

use super::{ControllerView, PlayerInput, StageController};

const WELCOME_FEEDBACK: &str = "Pick the punchline that feeds your frontal lobe.";
const LOADED_FEEDBACK: &str = "Mindful mischief activated! Choose the brain-friendly punchline.";
const INCORRECT_FEEDBACK: &str =
    "Plot twist! That punchline wobbled. Take a mindful breath and try again.";

#[derive(Debug)]
pub struct PuzzleController {
    content: Arc<ContentBanks>,
    rng: StdRng,
    /// Index into the riddle bank
    current: Option<usize>,
    feedback: String,
}

impl PuzzleController {
    /// Mounting loads the first riddle
    pub fn new(content: Arc<ContentBanks>, rng: StdRng) -> Self {
        let mut controller = Self {
            content,
            rng,
            current: None,
            feedback: WELCOME_FEEDBACK.to_string(),
        };
        controller.load_next(true);
        controller
    }

    /// Pick the next riddle uniformly at random.
    ///
    /// With `exclude_current`, riddles other than the current one are
    /// preferred; when no other riddle exists the pick is unrestricted.
    pub fn load_next(&mut self, exclude_current: bool) {
        let bank_len = self.content.riddles.len();
        let candidates: Vec<usize> = (0..bank_len)
            .filter(|&i| !(exclude_current && self.current == Some(i)))
            .collect();

        let next = match candidates.choose(&mut self.rng) {
            Some(&i) => Some(i),
            None if bank_len > 0 => Some(self.rng.random_range(0..bank_len)),
            None => None,
        };

        self.current = next;
        self.feedback = LOADED_FEEDBACK.to_string();
        log::debug!("Puzzle: riddle {:?} of {}", next, bank_len);
    }

    /// The riddle on screen
    pub fn current(&self) -> Option<&Riddle> {
        self.current.and_then(|i| self.content.riddles.get(i))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Choose an answer by index. Unknown indices are ignored.
    pub fn answer(&mut self, choice: usize, stats: &StageStats) -> Option<RoundOutcome> {
        let riddle = self.current()?;
        let answer = riddle.answers.get(choice)?;

        if answer.correct {
            let feedback = format!("{} ✅ {}", answer.text, riddle.insight);
            self.load_next(true);
            // Keep the insight of the solved riddle on screen
            self.feedback = feedback;
            Some(RoundOutcome::success(stats.streak + 1))
        } else {
            self.feedback = INCORRECT_FEEDBACK.to_string();
            Some(RoundOutcome::failure(FailureKind::Incorrect))
        }
    }
}

impl StageController for PuzzleController {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Puzzle
    }

    /// Skip to another riddle
    fn start(&mut self, _now_ms: f64) {
        self.load_next(true);
    }

    fn handle_input(
        &mut self,
        input: &PlayerInput,
        _now_ms: f64,
        stats: &StageStats,
    ) -> Option<RoundOutcome> {
        match input {
            PlayerInput::Answer(choice) => self.answer(*choice, stats),
            _ => None,
        }
    }

    fn tick(&mut self, _now_ms: f64) -> bool {
        false
    }

    fn next_deadline(&self) -> Option<f64> {
        None
    }

    fn teardown(&mut self) {}

    fn view(&self) -> ControllerView {
        let riddle = self.current();
        ControllerView::Puzzle {
            feedback: self.feedback.clone(),
            prompt: riddle.map(|r| r.prompt.clone()),
            answers: riddle
                .map(|r| r.answers.iter().map(|a| a.text.clone()).collect())
                .unwrap_or_default(),
        }
    }
}
