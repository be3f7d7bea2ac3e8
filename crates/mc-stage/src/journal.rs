//! SessionJournal: bounded history of finished rounds
//!
//! Captures what happened in a session, in order, for summaries and export.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use mc_core::{ArcadeError, ArcadeResult};
use serde::{Deserialize, Serialize};

use crate::outcome::RoundOutcome;
use crate::stage::StageId;

/// Default number of rounds kept
pub const DEFAULT_JOURNAL_CAPACITY: usize = 256;

/// One finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub stage: StageId,
    /// Session clock timestamp (ms) at which the round ended
    pub at_ms: f64,
    pub outcome: RoundOutcome,
}

/// Bounded, oldest-first history of rounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionJournal {
    /// When this session was opened
    pub started_at: DateTime<Utc>,
    capacity: usize,
    records: VecDeque<RoundRecord>,
    /// Rounds evicted because the journal was full
    dropped: u64,
}

impl SessionJournal {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            started_at: Utc::now(),
            capacity,
            records: VecDeque::with_capacity(capacity.min(DEFAULT_JOURNAL_CAPACITY)),
            dropped: 0,
        }
    }

    /// Append a record, evicting the oldest when full
    pub fn push(&mut self, record: RoundRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
            self.dropped += 1;
        }
        self.records.push_back(record);
    }

    pub fn record(&mut self, stage: StageId, at_ms: f64, outcome: RoundOutcome) {
        self.push(RoundRecord {
            stage,
            at_ms,
            outcome,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoundRecord> {
        self.records.iter()
    }

    /// Records for a single stage
    pub fn for_stage<'a>(&'a self, stage: &'a StageId) -> impl Iterator<Item = &'a RoundRecord> + 'a {
        self.records.iter().filter(move |r| &r.stage == stage)
    }

    pub fn last(&self) -> Option<&RoundRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Win rate over retained records, 0.0 when empty
    pub fn success_rate(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let wins = self.records.iter().filter(|r| r.outcome.is_success()).count();
        wins as f64 / self.records.len() as f64
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.dropped = 0;
    }

    /// Export to JSON
    pub fn to_json(&self) -> ArcadeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ArcadeError::Serialization(e.to_string()))
    }
}

impl Default for SessionJournal {
    fn default() -> Self {
        Self::new(DEFAULT_JOURNAL_CAPACITY)
    }
}
