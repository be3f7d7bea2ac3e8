//! Arcade configuration

use std::path::Path;

use mc_core::{ArcadeError, ArcadeResult};
use mc_stage::DEFAULT_JOURNAL_CAPACITY;
use serde::{Deserialize, Serialize};

/// Reflex stage timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflexConfig {
    /// Shortest wait before the cue (ms, inclusive)
    pub min_delay_ms: f64,
    /// Longest wait before the cue (ms, exclusive)
    pub max_delay_ms: f64,
    /// Reactions below this are "lightning" (ms)
    pub lightning_ms: u32,
    /// Reactions below this are "spicy" (ms)
    pub spicy_ms: u32,
}

impl Default for ReflexConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1400.0,
            max_delay_ms: 3600.0,
            lightning_ms: 220,
            spicy_ms: 350,
        }
    }
}

/// Recall stage timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    /// How long the full line-up stays visible (ms)
    pub reveal_delay_ms: f64,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 3400.0,
        }
    }
}

/// Complete arcade configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    pub reflex: ReflexConfig,
    pub recall: RecallConfig,
    /// Rounds kept in the session journal
    pub journal_capacity: usize,
    /// RNG seed; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            reflex: ReflexConfig::default(),
            recall: RecallConfig::default(),
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
            seed: None,
        }
    }
}

impl ArcadeConfig {
    /// Default config with a fixed seed, for reproducible sessions
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Builder: set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Scale every delay by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        let factor = factor.max(0.0);
        let mut config = self.clone();
        config.reflex.min_delay_ms *= factor;
        config.reflex.max_delay_ms *= factor;
        config.recall.reveal_delay_ms *= factor;
        config
    }

    /// Check value ranges
    pub fn validate(&self) -> ArcadeResult<()> {
        let r = &self.reflex;
        if !r.min_delay_ms.is_finite() || !r.max_delay_ms.is_finite() || r.min_delay_ms < 0.0 {
            return Err(ArcadeError::InvalidConfig(
                "reflex delays must be finite and non-negative".into(),
            ));
        }
        if r.max_delay_ms < r.min_delay_ms {
            return Err(ArcadeError::InvalidConfig(format!(
                "reflex delay window is inverted: [{}, {})",
                r.min_delay_ms, r.max_delay_ms
            )));
        }
        if r.lightning_ms > r.spicy_ms {
            return Err(ArcadeError::InvalidConfig(
                "lightning_ms must not exceed spicy_ms".into(),
            ));
        }
        let reveal = self.recall.reveal_delay_ms;
        if !reveal.is_finite() || reveal < 0.0 {
            return Err(ArcadeError::InvalidConfig(
                "recall reveal delay must be finite and non-negative".into(),
            ));
        }
        if self.journal_capacity == 0 {
            return Err(ArcadeError::InvalidConfig(
                "journal_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate JSON
    pub fn from_json(json: &str) -> ArcadeResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ArcadeError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate YAML
    pub fn from_yaml(yaml: &str) -> ArcadeResult<Self> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| ArcadeError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> ArcadeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text),
            Some("yaml") | Some("yml") => Self::from_yaml(&text),
            other => Err(ArcadeError::InvalidConfig(format!(
                "unsupported config extension: {:?}",
                other
            ))),
        }
    }

    pub fn to_json(&self) -> ArcadeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ArcadeError::Serialization(e.to_string()))
    }

    pub fn to_yaml(&self) -> ArcadeResult<String> {
        serde_yml::to_string(self).map_err(|e| ArcadeError::Serialization(e.to_string()))
    }
}
