//! Autoplay: seeded bot sessions against a manual clock
//!
//! The bot plays through the public arcade API the way a person would: it
//! watches the recall board before the reveal, taps some time after the
//! reflex cue, and reads the riddle answers. `skill` in `[0, 1]` controls
//! how often it gets things right and how fast it reacts.

use mc_core::{ArcadeResult, Clock, ManualClock};
use mc_stage::{ControllerKind, RoundOutcome, StageId, StageStats};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::arcade::Arcade;
use crate::content::Symbol;
use crate::games::Controller;

/// Bot parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    /// Rounds per stage
    pub rounds: u32,
    /// 0.0 = clueless, 1.0 = perfect
    pub skill: f64,
    pub seed: u64,
    /// Idle time between rounds (ms)
    pub pause_ms: f64,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            rounds: 20,
            skill: 0.7,
            seed: 0,
            pause_ms: 800.0,
        }
    }
}

/// Summary of one stage's autoplay run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoplayReport {
    pub stage: StageId,
    pub kind: ControllerKind,
    pub rounds: u32,
    pub successes: u32,
    pub failures: u32,
    /// Stage stats after the run
    pub stats: StageStats,
    /// Simulated time spent (ms)
    pub elapsed_ms: f64,
}

impl AutoplayReport {
    pub fn success_rate(&self) -> f64 {
        let finished = self.successes + self.failures;
        if finished == 0 {
            0.0
        } else {
            self.successes as f64 / finished as f64
        }
    }
}

pub struct Autoplayer {
    config: AutoplayConfig,
    rng: StdRng,
    clock: ManualClock,
}

impl Autoplayer {
    pub fn new(config: AutoplayConfig) -> Self {
        let config = AutoplayConfig {
            skill: config.skill.clamp(0.0, 1.0),
            pause_ms: config.pause_ms.max(0.0),
            ..config
        };
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            clock: ManualClock::new(),
            config,
        }
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Play every catalog stage in order
    pub fn play_all(&mut self, arcade: &mut Arcade) -> ArcadeResult<Vec<AutoplayReport>> {
        let ids: Vec<StageId> = arcade.catalog().ids().cloned().collect();
        ids.iter().map(|id| self.play(arcade, id)).collect()
    }

    /// Select `stage` and play the configured number of rounds on it
    pub fn play(&mut self, arcade: &mut Arcade, stage: &StageId) -> ArcadeResult<AutoplayReport> {
        arcade.select_stage(stage)?;
        let kind = arcade.active_stage().controller;
        let started_ms = self.clock.now_ms();

        let mut successes = 0;
        let mut failures = 0;
        for _ in 0..self.config.rounds {
            let outcome = match kind {
                ControllerKind::Reflex => self.play_reflex(arcade)?,
                ControllerKind::Recall => self.play_recall(arcade)?,
                ControllerKind::Puzzle => self.play_puzzle(arcade)?,
            };
            match outcome {
                Some(o) if o.is_success() => successes += 1,
                Some(_) => failures += 1,
                None => {}
            }
            self.clock.advance(self.config.pause_ms);
        }

        let report = AutoplayReport {
            stage: stage.clone(),
            kind,
            rounds: self.config.rounds,
            successes,
            failures,
            stats: arcade.stats(stage).copied().unwrap_or_default(),
            elapsed_ms: self.clock.now_ms() - started_ms,
        };
        log::info!(
            "Autoplay {}: {}/{} won",
            report.stage,
            report.successes,
            report.rounds
        );
        Ok(report)
    }

    fn play_reflex(&mut self, arcade: &mut Arcade) -> ArcadeResult<Option<RoundOutcome>> {
        let now = self.clock.now_ms();
        arcade.start(now);
        let Some(cue) = arcade.next_deadline() else {
            return Ok(None);
        };

        let jumpiness = (1.0 - self.config.skill) * 0.3;
        if self.rng.random_bool(jumpiness) {
            let fraction = self.rng.random_range(0.0..0.95);
            self.clock.set(now + (cue - now) * fraction);
        } else {
            let reaction = 150.0
                + (1.0 - self.config.skill) * 350.0
                + self.rng.random_range(0.0..80.0);
            self.clock.set(cue);
            arcade.tick(self.clock.now_ms());
            self.clock.advance(reaction);
        }
        arcade.tap(self.clock.now_ms())
    }

    fn play_recall(&mut self, arcade: &mut Arcade) -> ArcadeResult<Option<RoundOutcome>> {
        arcade.start(self.clock.now_ms());
        let memorized = recall_board(arcade);
        let Some(reveal) = arcade.next_deadline() else {
            return Ok(None);
        };
        self.clock.set(reveal);
        arcade.tick(self.clock.now_ms());

        let remaining = recall_board(arcade);
        let vanished = memorized.iter().find(|s| !remaining.contains(*s)).cloned();
        let pick = if self.rng.random_bool(self.config.skill) {
            vanished
        } else {
            remaining.choose(&mut self.rng).cloned().or(vanished)
        };

        let Some(pick) = pick else {
            return Ok(None);
        };
        self.clock.advance(self.rng.random_range(400.0..1500.0));
        arcade.guess(pick, self.clock.now_ms())
    }

    fn play_puzzle(&mut self, arcade: &mut Arcade) -> ArcadeResult<Option<RoundOutcome>> {
        let riddle = match arcade.controller() {
            Controller::Puzzle(puzzle) => puzzle.current().cloned(),
            _ => None,
        };
        let Some(riddle) = riddle else {
            return Ok(None);
        };

        let wrong: Vec<usize> = (0..riddle.answers.len())
            .filter(|&i| !riddle.answers[i].correct)
            .collect();
        let choice = if self.rng.random_bool(self.config.skill) {
            riddle.correct_index()
        } else {
            wrong.choose(&mut self.rng).copied().or(riddle.correct_index())
        };

        let Some(choice) = choice else {
            return Ok(None);
        };
        self.clock.advance(self.rng.random_range(1000.0..4000.0));
        arcade.answer(choice, self.clock.now_ms())
    }
}

fn recall_board(arcade: &Arcade) -> Vec<Symbol> {
    match arcade.controller() {
        Controller::Recall(recall) => recall.displayed().to_vec(),
        _ => Vec::new(),
    }
}
