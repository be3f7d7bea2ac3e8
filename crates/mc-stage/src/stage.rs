//! Stage: An immutable descriptor of one mini-game in the arcade
//!
//! A Stage is NOT a controller. It names the game, describes it, and says
//! which kind of controller plays it. Controllers are mounted from it.

use serde::{Deserialize, Serialize};

/// Unique stage identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(pub String);

impl StageId {
    /// Create a new stage ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StageId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Advertised difficulty of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Basic,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

/// Which state machine plays a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    /// Wait for the cue, then tap as fast as possible
    Reflex,
    /// Memorize a symbol line-up, then name the one that vanished
    Recall,
    /// Multiple-choice riddles
    Puzzle,
}

impl ControllerKind {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Reflex => "reflex",
            Self::Recall => "recall",
            Self::Puzzle => "puzzle",
        }
    }

    /// Whether lower scores are reported as a best time
    pub fn reports_best_time(&self) -> bool {
        matches!(self, Self::Reflex)
    }
}

/// Immutable stage descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
    pub id: StageId,
    pub label: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub controller: ControllerKind,
}

impl StageDefinition {
    pub fn new(id: impl Into<StageId>, label: impl Into<String>, controller: ControllerKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            difficulty: Difficulty::Basic,
            description: String::new(),
            tags: Vec::new(),
            controller,
        }
    }

    /// Builder: set difficulty
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: add tags
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(|t| t.into()));
        self
    }

    /// Header line, e.g. "Brain Spark · Basic Mode"
    pub fn headline(&self) -> String {
        format!("{} · {} Mode", self.label, self.difficulty.display_name())
    }
}
