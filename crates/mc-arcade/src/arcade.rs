//! Arcade: the session tying stages, controllers and statistics together
//!
//! The arcade mounts one controller at a time, forwards input to it, and
//! routes every [`RoundOutcome`] to the [`StatsAggregator`] under the active
//! stage id. Controllers never see the aggregator; they borrow their own
//! stage's stats read-only while handling input.

use std::sync::Arc;

use mc_core::ArcadeResult;
use mc_stage::{
    Progress, RoundOutcome, SessionJournal, StageCatalog, StageDefinition, StageId,
    StageSelector, StageStats, StatsAggregator,
};
use rand::prelude::*;

use crate::config::ArcadeConfig;
use crate::content::{ContentBanks, Symbol};
use crate::games::{Controller, PlayerInput, StageController};
use crate::view::{ArcadeView, StageCard};

/// A play session
pub struct Arcade {
    config: ArcadeConfig,
    catalog: StageCatalog,
    content: Arc<ContentBanks>,
    selector: StageSelector,
    stats: StatsAggregator,
    journal: SessionJournal,
    controller: Controller,
    /// Seeds each mounted controller
    rng: StdRng,
}

impl Arcade {
    /// Create a session after validating every input
    pub fn new(
        config: ArcadeConfig,
        catalog: StageCatalog,
        content: ContentBanks,
    ) -> ArcadeResult<Self> {
        config
            .validate()
            .inspect_err(|e| log::warn!("Rejected arcade config: {}", e))?;
        catalog
            .validate()
            .inspect_err(|e| log::warn!("Rejected stage catalog: {}", e))?;
        content
            .validate()
            .inspect_err(|e| log::warn!("Rejected content banks: {}", e))?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let content = Arc::new(content);
        let selector = StageSelector::new(&catalog);
        let first = catalog.first();
        let controller = Controller::mount(
            first.controller,
            &config,
            content.clone(),
            StdRng::seed_from_u64(rng.random()),
        );

        log::info!(
            "Arcade opened: {} stages, starting on {}",
            catalog.len(),
            first.id
        );

        Ok(Self {
            stats: StatsAggregator::new(&catalog),
            journal: SessionJournal::new(config.journal_capacity),
            config,
            catalog,
            content,
            selector,
            controller,
            rng,
        })
    }

    /// Built-in stages and content
    pub fn mind_circus(config: ArcadeConfig) -> ArcadeResult<Self> {
        Self::new(config, StageCatalog::mind_circus(), ContentBanks::mind_circus())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // STAGE SWITCHING
    // ═══════════════════════════════════════════════════════════════════════════

    /// Switch to another stage. The round in progress on the stage being
    /// left is discarded; returning later starts from a fresh controller.
    pub fn select_stage(&mut self, id: &StageId) -> ArcadeResult<bool> {
        let kind = self.catalog.require(id)?.controller;
        if !self.selector.select(id)? {
            return Ok(false);
        }

        self.controller.teardown();
        self.controller = Controller::mount(
            kind,
            &self.config,
            self.content.clone(),
            StdRng::seed_from_u64(self.rng.random()),
        );
        Ok(true)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ROUND EVENTS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Start a round on the active stage
    pub fn start(&mut self, now_ms: f64) {
        self.tick(now_ms);
        self.controller.start(now_ms);
    }

    /// Fire due timers. Returns true if the active controller changed state.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.controller.tick(now_ms)
    }

    /// Forward input to the active controller and record any outcome.
    /// Input never fires timers: a cue the host has not ticked into view
    /// has not been shown yet.
    pub fn input(&mut self, input: PlayerInput, now_ms: f64) -> ArcadeResult<Option<RoundOutcome>> {
        let stage = self.selector.active().clone();
        let stats = self.stats.get(&stage).copied().unwrap_or_default();
        let Some(outcome) = self.controller.handle_input(&input, now_ms, &stats) else {
            return Ok(None);
        };

        self.stats.apply(&stage, outcome)?;
        self.journal.record(stage, now_ms, outcome);
        Ok(Some(outcome))
    }

    /// Reflex tap
    pub fn tap(&mut self, now_ms: f64) -> ArcadeResult<Option<RoundOutcome>> {
        self.input(PlayerInput::Tap, now_ms)
    }

    /// Recall guess
    pub fn guess(&mut self, symbol: Symbol, now_ms: f64) -> ArcadeResult<Option<RoundOutcome>> {
        self.input(PlayerInput::Guess(symbol), now_ms)
    }

    /// Puzzle answer
    pub fn answer(&mut self, choice: usize, now_ms: f64) -> ArcadeResult<Option<RoundOutcome>> {
        self.input(PlayerInput::Answer(choice), now_ms)
    }

    /// Deadline of the active controller's pending timer
    pub fn next_deadline(&self) -> Option<f64> {
        self.controller.next_deadline()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn active_stage_id(&self) -> &StageId {
        self.selector.active()
    }

    pub fn active_stage(&self) -> &StageDefinition {
        // The selector only holds catalog ids
        self.catalog
            .get(self.selector.active())
            .unwrap_or_else(|| self.catalog.first())
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn stats(&self, id: &StageId) -> Option<&StageStats> {
        self.stats.get(id)
    }

    pub fn aggregator(&self) -> &StatsAggregator {
        &self.stats
    }

    pub fn progress(&self) -> Progress {
        self.stats.progress()
    }

    pub fn journal(&self) -> &SessionJournal {
        &self.journal
    }

    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    pub fn content(&self) -> &ContentBanks {
        &self.content
    }

    /// Zero all stats and clear the journal
    pub fn reset_stats(&mut self) {
        self.stats.reset();
        self.journal.clear();
        log::info!("Arcade stats reset");
    }

    /// Everything a presentation layer needs to draw the arcade
    pub fn view(&self) -> ArcadeView {
        let cards = self
            .catalog
            .iter()
            .map(|def| StageCard::new(def, self.stats.get(&def.id).copied().unwrap_or_default()))
            .collect();

        ArcadeView {
            stage: self.active_stage().clone(),
            controller: self.controller.view(),
            next_deadline_ms: self.controller.next_deadline(),
            cards,
            progress: self.stats.progress(),
        }
    }
}

impl Drop for Arcade {
    fn drop(&mut self) {
        self.controller.teardown();
    }
}
