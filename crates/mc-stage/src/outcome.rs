//! RoundOutcome: what a controller reports when a round ends
//!
//! Misses are ordinary outcomes travelling on the same channel as wins.

use serde::{Deserialize, Serialize};

/// Why a round was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Reflex tap before the cue
    Early,
    /// Recall guess named the wrong symbol
    Wrong,
    /// Puzzle answer was not the correct one
    Incorrect,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Wrong => "wrong",
            Self::Incorrect => "incorrect",
        }
    }
}

/// Payload of a won round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessPayload {
    /// Numeric score, lower is better when tracked as a best
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

/// Result of a single round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RoundOutcome {
    Success(SuccessPayload),
    Failure { kind: FailureKind },
}

impl RoundOutcome {
    /// Success carrying a score
    pub fn success(score: u32) -> Self {
        Self::Success(SuccessPayload { score: Some(score) })
    }

    /// Success without a score
    pub fn success_unscored() -> Self {
        Self::Success(SuccessPayload::default())
    }

    pub fn failure(kind: FailureKind) -> Self {
        Self::Failure { kind }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Score of a won round
    pub fn score(&self) -> Option<u32> {
        match self {
            Self::Success(payload) => payload.score,
            Self::Failure { .. } => None,
        }
    }

    /// Failure kind of a lost round
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Failure { kind } => Some(*kind),
            Self::Success(_) => None,
        }
    }
}
