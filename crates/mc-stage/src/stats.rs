//! Per-stage statistics and the aggregator that owns them
//!
//! The aggregator is the only writer of [`StageStats`]. Controllers read a
//! borrowed record (for the streak-based scores) and report outcomes back.

use std::collections::HashMap;

use mc_core::{ArcadeError, ArcadeResult};
use serde::{Deserialize, Serialize};

use crate::catalog::StageCatalog;
use crate::outcome::{FailureKind, RoundOutcome, SuccessPayload};
use crate::stage::StageId;

/// Result of the most recent round on a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LastResult {
    #[default]
    None,
    Success,
    Fail,
}

/// Mutable statistics record for one stage
///
/// Invariants: `top_streak >= streak`; `best` never increases once set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStats {
    pub plays: u32,
    pub best: Option<u32>,
    pub streak: u32,
    pub top_streak: u32,
    pub completions: u32,
    pub last_result: LastResult,
}

impl StageStats {
    fn record_success(&mut self, payload: SuccessPayload) {
        self.plays += 1;
        self.last_result = LastResult::Success;
        self.streak += 1;
        self.top_streak = self.top_streak.max(self.streak);
        self.completions += 1;
        if let Some(score) = payload.score {
            self.best = Some(self.best.map_or(score, |best| best.min(score)));
        }
    }

    fn record_failure(&mut self) {
        self.plays += 1;
        self.last_result = LastResult::Fail;
        self.streak = 0;
    }

    /// A stage counts as conquered once any streak was achieved
    pub fn is_conquered(&self) -> bool {
        self.top_streak > 0
    }

    /// Badge shown on the stats card
    pub fn badge(&self) -> &'static str {
        if self.is_conquered() {
            "On Fire 🔥"
        } else {
            "Warming Up"
        }
    }
}

/// Session-wide completion summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed_stages: usize,
    pub total_stages: usize,
    pub percent: u32,
}

impl Progress {
    fn compute(completed_stages: usize, total_stages: usize) -> Self {
        let percent = if total_stages == 0 {
            0
        } else {
            (100.0 * completed_stages as f64 / total_stages as f64).round() as u32
        };
        Self {
            completed_stages,
            total_stages,
            percent,
        }
    }
}

/// Owns one [`StageStats`] per catalog stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsAggregator {
    order: Vec<StageId>,
    stats: HashMap<StageId, StageStats>,
}

impl StatsAggregator {
    /// Zeroed stats for every stage in the catalog
    pub fn new(catalog: &StageCatalog) -> Self {
        Self::for_stages(catalog.ids().cloned())
    }

    /// Zeroed stats for an explicit list of stage ids
    pub fn for_stages(ids: impl IntoIterator<Item = StageId>) -> Self {
        let mut order = Vec::new();
        let mut stats = HashMap::new();
        for id in ids {
            if stats.insert(id.clone(), StageStats::default()).is_none() {
                order.push(id);
            }
        }
        Self { order, stats }
    }

    fn entry(&mut self, stage: &StageId) -> ArcadeResult<&mut StageStats> {
        self.stats
            .get_mut(stage)
            .ok_or_else(|| ArcadeError::UnknownStage(stage.to_string()))
    }

    /// Record a won round
    pub fn on_success(&mut self, stage: &StageId, payload: SuccessPayload) -> ArcadeResult<&StageStats> {
        let stats = self.entry(stage)?;
        stats.record_success(payload);
        log::debug!(
            "[{}] success score={:?} streak={} best={:?}",
            stage,
            payload.score,
            stats.streak,
            stats.best
        );
        Ok(stats)
    }

    /// Record a lost round; the kind is informational only
    pub fn on_failure(&mut self, stage: &StageId, kind: FailureKind) -> ArcadeResult<&StageStats> {
        let stats = self.entry(stage)?;
        stats.record_failure();
        log::debug!("[{}] failure ({}) plays={}", stage, kind.as_str(), stats.plays);
        Ok(stats)
    }

    /// Dispatch an outcome to `on_success` / `on_failure`
    pub fn apply(&mut self, stage: &StageId, outcome: RoundOutcome) -> ArcadeResult<&StageStats> {
        match outcome {
            RoundOutcome::Success(payload) => self.on_success(stage, payload),
            RoundOutcome::Failure { kind } => self.on_failure(stage, kind),
        }
    }

    /// Stats of one stage
    pub fn get(&self, stage: &StageId) -> Option<&StageStats> {
        self.stats.get(stage)
    }

    /// Stats in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&StageId, &StageStats)> {
        self.order
            .iter()
            .filter_map(|id| self.stats.get(id).map(|s| (id, s)))
    }

    /// Number of stages with `top_streak > 0`
    pub fn completed_stages(&self) -> usize {
        self.stats.values().filter(|s| s.is_conquered()).count()
    }

    pub fn total_stages(&self) -> usize {
        self.order.len()
    }

    /// `round(100 × completed / total)`
    pub fn progress_percent(&self) -> u32 {
        self.progress().percent
    }

    pub fn progress(&self) -> Progress {
        Progress::compute(self.completed_stages(), self.total_stages())
    }

    /// Zero every record
    pub fn reset(&mut self) {
        for stats in self.stats.values_mut() {
            *stats = StageStats::default();
        }
    }
}
