// ============================================================================
// SESSION: an Arcade bound to a clock
// Every call reads the clock itself, so callers never pass timestamps
// ============================================================================

use mc_arcade::{Arcade, ArcadeView, Symbol};
use mc_core::{ArcadeResult, Clock};
use mc_stage::{RoundOutcome, StageId};

pub struct Session<C: Clock> {
    arcade: Arcade,
    clock: C,
}

impl<C: Clock> Session<C> {
    pub fn new(arcade: Arcade, clock: C) -> Self {
        Self { arcade, clock }
    }

    pub fn arcade(&self) -> &Arcade {
        &self.arcade
    }

    pub fn arcade_mut(&mut self) -> &mut Arcade {
        &mut self.arcade
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    pub fn select_stage(&mut self, id: &str) -> ArcadeResult<bool> {
        self.arcade.select_stage(&StageId::new(id))
    }

    pub fn start(&mut self) {
        let now = self.clock.now_ms();
        self.arcade.start(now);
    }

    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        self.arcade.tick(now)
    }

    pub fn tap(&mut self) -> ArcadeResult<Option<RoundOutcome>> {
        let now = self.clock.now_ms();
        self.arcade.tap(now)
    }

    pub fn guess(&mut self, symbol: &str) -> ArcadeResult<Option<RoundOutcome>> {
        let now = self.clock.now_ms();
        self.arcade.guess(Symbol::new(symbol), now)
    }

    pub fn answer(&mut self, choice: usize) -> ArcadeResult<Option<RoundOutcome>> {
        let now = self.clock.now_ms();
        self.arcade.answer(choice, now)
    }

    /// Time left before the pending timer fires; 0 when already overdue.
    /// Hosts use this to arm their own `setTimeout` before calling `tick`.
    pub fn ms_until_deadline(&self) -> Option<f64> {
        let now = self.clock.now_ms();
        self.arcade
            .next_deadline()
            .map(|deadline| (deadline - now).max(0.0))
    }

    pub fn view(&self) -> ArcadeView {
        self.arcade.view()
    }
}
