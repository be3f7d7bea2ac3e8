//! Reflex Controller
//!
//! idle → waiting → ready → idle. `start` arms a timer with a random delay;
//! the `tick` that fires it shows the cue, and the time of that tick becomes
//! the reference for the reaction time. Tapping before the cue loses the round.

use std::sync::Arc;

use mc_core::whole_ms;
use mc_stage::{ControllerKind, FailureKind, RoundOutcome, StageStats};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ReflexConfig;
use crate::content::ContentBanks;
use crate::timing::OneShotTimer;

use super::{ControllerView, PlayerInput, StageController};

const IDLE_MESSAGE: &str = "Click start and wait for the punchline!";
const CUE_MESSAGE: &str = "SMASH THAT BIG BUTTON! 🫡";
const EARLY_MESSAGE: &str = "Too eager! Give the neurons a drum roll next time. 🥁";

/// Reflex round phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReflexPhase {
    #[default]
    Idle,
    Waiting,
    Ready,
}

/// How a successful reaction is praised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionRating {
    Lightning,
    Spicy,
    Steady,
}

impl ReactionRating {
    pub fn classify(reaction_ms: u32, config: &ReflexConfig) -> Self {
        if reaction_ms < config.lightning_ms {
            Self::Lightning
        } else if reaction_ms < config.spicy_ms {
            Self::Spicy
        } else {
            Self::Steady
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Lightning => "Lightning brain! ⚡️",
            Self::Spicy => "Spicy synapse speed! 🌶️",
            Self::Steady => "Nice catch! Keep the giggles limber. 😎",
        }
    }
}

#[derive(Debug, Clone, Default)]
struct ReflexRound {
    phase: ReflexPhase,
    /// Instant the cue appeared
    armed_at_ms: Option<f64>,
}

#[derive(Debug)]
pub struct ReflexController {
    config: ReflexConfig,
    content: Arc<ContentBanks>,
    rng: StdRng,
    timer: OneShotTimer,
    round: ReflexRound,
    message: String,
    last_reaction_ms: Option<u32>,
}

impl ReflexController {
    pub fn new(config: ReflexConfig, content: Arc<ContentBanks>, rng: StdRng) -> Self {
        Self {
            config,
            content,
            rng,
            timer: OneShotTimer::new(),
            round: ReflexRound::default(),
            message: IDLE_MESSAGE.to_string(),
            last_reaction_ms: None,
        }
    }

    pub fn phase(&self) -> ReflexPhase {
        self.round.phase
    }

    pub fn armed_at_ms(&self) -> Option<f64> {
        self.round.armed_at_ms
    }

    pub fn last_reaction_ms(&self) -> Option<u32> {
        self.last_reaction_ms
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn draw_delay(&mut self) -> f64 {
        let (min, max) = (self.config.min_delay_ms, self.config.max_delay_ms);
        if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        }
    }

    /// Tap on the big button
    pub fn register_input(&mut self, now_ms: f64) -> Option<RoundOutcome> {
        match self.round.phase {
            ReflexPhase::Idle => None,
            ReflexPhase::Waiting => {
                self.timer.cancel();
                self.round = ReflexRound::default();
                self.message = EARLY_MESSAGE.to_string();
                log::debug!("Reflex: early tap at {:.0}ms", now_ms);
                Some(RoundOutcome::failure(FailureKind::Early))
            }
            ReflexPhase::Ready => {
                let armed_at = self.round.armed_at_ms.unwrap_or(now_ms);
                let reaction = whole_ms(now_ms - armed_at);
                self.round = ReflexRound::default();
                self.last_reaction_ms = Some(reaction);
                self.message = ReactionRating::classify(reaction, &self.config)
                    .message()
                    .to_string();
                log::debug!("Reflex: reaction {}ms", reaction);
                Some(RoundOutcome::success(reaction))
            }
        }
    }
}

impl StageController for ReflexController {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Reflex
    }

    fn start(&mut self, now_ms: f64) {
        let delay = self.draw_delay();
        // schedule() drops any timer left from a round in progress
        let handle = self.timer.schedule(now_ms, delay);
        self.round = ReflexRound {
            phase: ReflexPhase::Waiting,
            armed_at_ms: None,
        };
        if let Some(phrase) = self.content.phrases.choose(&mut self.rng) {
            self.message = phrase.clone();
        }
        log::debug!(
            "Reflex: waiting, cue #{} at {:.0}ms",
            handle.generation,
            handle.deadline_ms
        );
    }

    fn handle_input(
        &mut self,
        input: &PlayerInput,
        now_ms: f64,
        _stats: &StageStats,
    ) -> Option<RoundOutcome> {
        match input {
            PlayerInput::Tap => self.register_input(now_ms),
            _ => None,
        }
    }

    fn tick(&mut self, now_ms: f64) -> bool {
        if self.round.phase != ReflexPhase::Waiting {
            return false;
        }
        match self.timer.fire_if_due(now_ms) {
            Some(handle) => {
                self.round.phase = ReflexPhase::Ready;
                // The cue appears now, however late after its deadline
                self.round.armed_at_ms = Some(now_ms);
                self.message = CUE_MESSAGE.to_string();
                log::debug!(
                    "Reflex: cue #{} shown {:.0}ms after deadline",
                    handle.generation,
                    now_ms - handle.deadline_ms
                );
                true
            }
            None => false,
        }
    }

    fn next_deadline(&self) -> Option<f64> {
        self.timer.deadline_ms()
    }

    fn teardown(&mut self) {
        self.timer.cancel();
        self.round = ReflexRound::default();
    }

    fn view(&self) -> ControllerView {
        ControllerView::Reflex {
            phase: self.round.phase,
            message: self.message.clone(),
            last_reaction_ms: self.last_reaction_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(seed: u64) -> ReflexController {
        ReflexController::new(
            ReflexConfig::default(),
            Arc::new(ContentBanks::mind_circus()),
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_delay_within_window() {
        for seed in 0..50 {
            let mut reflex = controller(seed);
            reflex.start(1000.0);
            let deadline = reflex.next_deadline().unwrap();
            assert!(deadline >= 1000.0 + 1400.0);
            assert!(deadline < 1000.0 + 3600.0);
            assert_eq!(reflex.phase(), ReflexPhase::Waiting);
        }
    }

    #[test]
    fn test_tap_while_idle_is_noop() {
        let mut reflex = controller(1);
        assert!(reflex.register_input(500.0).is_none());
        assert_eq!(reflex.phase(), ReflexPhase::Idle);
        assert_eq!(reflex.message(), IDLE_MESSAGE);
    }

    #[test]
    fn test_early_tap_fails_and_cancels_cue() {
        let mut reflex = controller(2);
        reflex.start(0.0);

        let outcome = reflex.register_input(100.0);
        assert_eq!(outcome, Some(RoundOutcome::failure(FailureKind::Early)));
        assert_eq!(reflex.phase(), ReflexPhase::Idle);
        assert!(reflex.next_deadline().is_none());

        // The stale cue never shows up
        assert!(!reflex.tick(10_000.0));
        assert_eq!(reflex.phase(), ReflexPhase::Idle);
    }

    #[test]
    fn test_reaction_measured_from_cue() {
        let mut reflex = controller(3);
        reflex.start(0.0);
        let cue = reflex.next_deadline().unwrap();

        assert!(!reflex.tick(cue - 1.0));
        assert!(reflex.tick(cue));
        assert_eq!(reflex.phase(), ReflexPhase::Ready);
        assert_eq!(reflex.armed_at_ms(), Some(cue));

        let outcome = reflex.register_input(cue + 180.0).unwrap();
        assert_eq!(outcome.score(), Some(180));
        assert_eq!(reflex.phase(), ReflexPhase::Idle);
        assert_eq!(reflex.last_reaction_ms(), Some(180));
        assert_eq!(reflex.message(), ReactionRating::Lightning.message());
    }

    #[test]
    fn test_late_tick_does_not_inflate_reaction() {
        let mut reflex = controller(8);
        reflex.start(0.0);
        let cue = reflex.next_deadline().unwrap();

        // Host only gets round to firing the timer 300ms after its deadline
        assert!(reflex.tick(cue + 300.0));
        assert_eq!(reflex.armed_at_ms(), Some(cue + 300.0));

        let outcome = reflex.register_input(cue + 300.0 + 180.0).unwrap();
        assert_eq!(outcome.score(), Some(180));
        assert_eq!(reflex.last_reaction_ms(), Some(180));
    }

    #[test]
    fn test_restart_replaces_pending_cue() {
        let mut reflex = controller(4);
        reflex.start(0.0);
        let first = reflex.next_deadline().unwrap();

        reflex.start(5000.0);
        let second = reflex.next_deadline().unwrap();
        assert!(second >= 6400.0);

        // Nothing fires at the old deadline
        assert!(!reflex.tick(first));
        assert_eq!(reflex.phase(), ReflexPhase::Waiting);
        assert!(reflex.tick(second));
    }

    #[test]
    fn test_restart_while_ready_rearms() {
        let mut reflex = controller(5);
        reflex.start(0.0);
        let cue = reflex.next_deadline().unwrap();
        reflex.tick(cue);
        assert_eq!(reflex.phase(), ReflexPhase::Ready);

        reflex.start(cue + 10.0);
        assert_eq!(reflex.phase(), ReflexPhase::Waiting);
        assert!(reflex.armed_at_ms().is_none());
        assert_eq!(
            reflex.register_input(cue + 20.0),
            Some(RoundOutcome::failure(FailureKind::Early))
        );
    }

    #[test]
    fn test_teardown_cancels() {
        let mut reflex = controller(6);
        reflex.start(0.0);
        reflex.teardown();
        assert!(reflex.next_deadline().is_none());
        assert!(!reflex.tick(f64::MAX));
    }

    #[test]
    fn test_rating_thresholds() {
        let config = ReflexConfig::default();
        assert_eq!(ReactionRating::classify(219, &config), ReactionRating::Lightning);
        assert_eq!(ReactionRating::classify(220, &config), ReactionRating::Spicy);
        assert_eq!(ReactionRating::classify(349, &config), ReactionRating::Spicy);
        assert_eq!(ReactionRating::classify(350, &config), ReactionRating::Steady);
    }

    #[test]
    fn test_waiting_message_from_phrase_bank() {
        let mut reflex = controller(7);
        reflex.start(0.0);
        let banks = ContentBanks::mind_circus();
        assert!(banks.phrases.iter().any(|p| p == reflex.message()));
    }
}
