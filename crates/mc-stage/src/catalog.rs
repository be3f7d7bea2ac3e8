//! Stage catalog: the ordered set of stages an arcade offers

use std::collections::HashSet;

use mc_core::{ArcadeError, ArcadeResult};
use serde::{Deserialize, Serialize};

use crate::stage::{ControllerKind, Difficulty, StageDefinition, StageId};

/// Ordered, non-empty list of stages with unique ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StageDefinition>", into = "Vec<StageDefinition>")]
pub struct StageCatalog {
    stages: Vec<StageDefinition>,
}

impl StageCatalog {
    /// Build a catalog, rejecting empty lists and duplicate ids
    pub fn new(stages: Vec<StageDefinition>) -> ArcadeResult<Self> {
        let catalog = Self { stages };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The three built-in Mind Circus stages
    pub fn mind_circus() -> Self {
        Self {
            stages: vec![
                StageDefinition::new("spark", "Brain Spark", ControllerKind::Reflex)
                    .with_difficulty(Difficulty::Basic)
                    .with_description(
                        "Warm up with comedy-infused reflex training. Focus on the beat between \
                         anticipation and action.",
                    )
                    .with_tags(["Reflex", "Focus", "Energy Priming"]),
                StageDefinition::new("memory", "Memory Mash", ControllerKind::Recall)
                    .with_difficulty(Difficulty::Intermediate)
                    .with_description(
                        "Your hippocampus meets a parade of weird emojis. Spot the missing pal \
                         to boost working memory.",
                    )
                    .with_tags(["Working Memory", "Pattern Recognition"]),
                StageDefinition::new("puzzle", "Mindful Mischief", ControllerKind::Puzzle)
                    .with_difficulty(Difficulty::Advanced)
                    .with_description(
                        "Decode mindful riddles with punchlines. Walk away with science-backed \
                         brain boosts.",
                    )
                    .with_tags(["Reasoning", "Psychoeducation", "Mindfulness"]),
            ],
        }
    }

    /// Parse a JSON array of stage definitions
    pub fn from_json(json: &str) -> ArcadeResult<Self> {
        let stages: Vec<StageDefinition> =
            serde_json::from_str(json).map_err(|e| ArcadeError::Serialization(e.to_string()))?;
        Self::new(stages)
    }

    /// Parse a YAML sequence of stage definitions
    pub fn from_yaml(yaml: &str) -> ArcadeResult<Self> {
        let stages: Vec<StageDefinition> =
            serde_yml::from_str(yaml).map_err(|e| ArcadeError::Serialization(e.to_string()))?;
        Self::new(stages)
    }

    pub fn to_json(&self) -> ArcadeResult<String> {
        serde_json::to_string_pretty(&self.stages)
            .map_err(|e| ArcadeError::Serialization(e.to_string()))
    }

    /// Check the catalog invariants
    pub fn validate(&self) -> ArcadeResult<()> {
        if self.stages.is_empty() {
            return Err(ArcadeError::InvalidContent(
                "stage catalog must contain at least one stage".into(),
            ));
        }

        let mut seen = HashSet::new();
        for stage in &self.stages {
            if stage.id.as_str().is_empty() {
                return Err(ArcadeError::InvalidContent("stage id must not be empty".into()));
            }
            if !seen.insert(&stage.id) {
                return Err(ArcadeError::DuplicateStage(stage.id.to_string()));
            }
        }
        Ok(())
    }

    /// Lookup by id
    pub fn get(&self, id: &StageId) -> Option<&StageDefinition> {
        self.stages.iter().find(|s| &s.id == id)
    }

    /// Lookup by id, failing for unknown stages
    pub fn require(&self, id: &StageId) -> ArcadeResult<&StageDefinition> {
        self.get(id)
            .ok_or_else(|| ArcadeError::UnknownStage(id.to_string()))
    }

    /// Check if a stage is present
    pub fn contains(&self, id: &StageId) -> bool {
        self.get(id).is_some()
    }

    /// First stage; the arcade opens on it
    pub fn first(&self) -> &StageDefinition {
        // validate() guarantees at least one stage
        &self.stages[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageDefinition> {
        self.stages.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &StageId> {
        self.stages.iter().map(|s| &s.id)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl TryFrom<Vec<StageDefinition>> for StageCatalog {
    type Error = ArcadeError;

    fn try_from(stages: Vec<StageDefinition>) -> ArcadeResult<Self> {
        Self::new(stages)
    }
}

impl From<StageCatalog> for Vec<StageDefinition> {
    fn from(catalog: StageCatalog) -> Self {
        catalog.stages
    }
}

impl Default for StageCatalog {
    fn default() -> Self {
        Self::mind_circus()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = StageCatalog::mind_circus();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.first().id.as_str(), "spark");

        let memory = catalog.get(&StageId::new("memory")).unwrap();
        assert_eq!(memory.controller, ControllerKind::Recall);
        assert_eq!(memory.difficulty, Difficulty::Intermediate);
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert!(StageCatalog::new(Vec::new()).is_err());

        let dup = vec![
            StageDefinition::new("a", "A", ControllerKind::Reflex),
            StageDefinition::new("a", "Again", ControllerKind::Puzzle),
        ];
        assert!(matches!(
            StageCatalog::new(dup),
            Err(ArcadeError::DuplicateStage(id)) if id == "a"
        ));
    }

    #[test]
    fn test_require_unknown() {
        let catalog = StageCatalog::mind_circus();
        assert!(matches!(
            catalog.require(&StageId::new("bonus")),
            Err(ArcadeError::UnknownStage(_))
        ));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
- id: quick
  label: Quick Tap
  controller: reflex
  tags: [Reflex]
- id: riddles
  label: Riddles
  difficulty: advanced
  controller: puzzle
"#;
        let catalog = StageCatalog::from_yaml(yaml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get(&StageId::new("riddles")).unwrap().difficulty,
            Difficulty::Advanced
        );
    }

    #[test]
    fn test_serde_is_validated_list() {
        let json = StageCatalog::mind_circus().to_json().unwrap();
        let back: StageCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StageCatalog::mind_circus());

        assert!(serde_json::from_str::<StageCatalog>("[]").is_err());
    }

    #[test]
    fn test_from_json_bad_document() {
        let err = StageCatalog::from_json("{not json").unwrap_err();
        assert!(err.is_input_error());
    }
}
