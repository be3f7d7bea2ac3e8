//! Stage selector: which stage is on screen
//!
//! Selection is a pure state change. Mounting and tearing down controllers
//! is the arcade's job; the selector only says whether the stage changed.

use mc_core::{ArcadeError, ArcadeResult};
use serde::{Deserialize, Serialize};

use crate::catalog::StageCatalog;
use crate::stage::StageId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSelector {
    active: StageId,
    available: Vec<StageId>,
}

impl StageSelector {
    /// Start on the first catalog stage
    pub fn new(catalog: &StageCatalog) -> Self {
        Self {
            active: catalog.first().id.clone(),
            available: catalog.ids().cloned().collect(),
        }
    }

    pub fn active(&self) -> &StageId {
        &self.active
    }

    pub fn is_active(&self, id: &StageId) -> bool {
        &self.active == id
    }

    /// Switch stages. Returns `Ok(true)` when the active stage changed,
    /// `Ok(false)` when `id` was already active.
    pub fn select(&mut self, id: &StageId) -> ArcadeResult<bool> {
        if !self.available.contains(id) {
            return Err(ArcadeError::UnknownStage(id.to_string()));
        }
        if &self.active == id {
            return Ok(false);
        }
        log::info!("Stage switch: {} -> {}", self.active, id);
        self.active = id.clone();
        Ok(true)
    }

    pub fn available(&self) -> &[StageId] {
        &self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        let mut selector = StageSelector::new(&StageCatalog::mind_circus());
        assert_eq!(selector.active().as_str(), "spark");

        assert!(selector.select(&StageId::new("puzzle")).unwrap());
        assert!(selector.is_active(&StageId::new("puzzle")));

        // Re-selecting is not a change
        assert!(!selector.select(&StageId::new("puzzle")).unwrap());
    }

    #[test]
    fn test_select_unknown_keeps_active() {
        let mut selector = StageSelector::new(&StageCatalog::mind_circus());
        assert!(selector.select(&StageId::new("bonus")).is_err());
        assert_eq!(selector.active().as_str(), "spark");
        assert_eq!(selector.available().len(), 3);
    }
}
