//! Presentation snapshots

use mc_stage::{Progress, StageDefinition, StageId, StageStats};
use serde::{Deserialize, Serialize};

use crate::games::ControllerView;

/// Stats card for one stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCard {
    pub id: StageId,
    pub label: String,
    /// "On Fire 🔥" or "Warming Up"
    pub badge: String,
    pub stats: StageStats,
    /// Best reaction time, only for stages that report one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_time_ms: Option<u32>,
}

impl StageCard {
    pub fn new(def: &StageDefinition, stats: StageStats) -> Self {
        Self {
            id: def.id.clone(),
            label: def.label.clone(),
            badge: stats.badge().to_string(),
            best_time_ms: stats.best.filter(|_| def.controller.reports_best_time()),
            stats,
        }
    }

    /// One-line summary, e.g. "Plays: 3 · Streak: 1 · Best: 212ms"
    pub fn summary(&self) -> String {
        let mut line = format!("Plays: {} · Streak: {}", self.stats.plays, self.stats.streak);
        if let Some(best) = self.best_time_ms {
            line.push_str(&format!(" · Best: {}ms", best));
        }
        line
    }
}

/// Whole-arcade snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcadeView {
    /// Descriptor of the active stage
    pub stage: StageDefinition,
    pub controller: ControllerView,
    /// When the active controller's timer will fire
    pub next_deadline_ms: Option<f64>,
    /// One card per catalog stage, in catalog order
    pub cards: Vec<StageCard>,
    pub progress: Progress,
}

impl ArcadeView {
    /// "Progress: 1/3 stages conquered"
    pub fn progress_line(&self) -> String {
        format!(
            "Progress: {}/{} stages conquered",
            self.progress.completed_stages, self.progress.total_stages
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_stage::{ControllerKind, StageCatalog};

    #[test]
    fn test_best_time_only_for_reflex() {
        let catalog = StageCatalog::mind_circus();
        let stats = StageStats {
            plays: 3,
            best: Some(212),
            streak: 1,
            top_streak: 2,
            ..StageStats::default()
        };

        let spark = catalog.iter().find(|d| d.controller == ControllerKind::Reflex).unwrap();
        let card = StageCard::new(spark, stats);
        assert_eq!(card.best_time_ms, Some(212));
        assert_eq!(card.summary(), "Plays: 3 · Streak: 1 · Best: 212ms");
        assert_eq!(card.badge, "On Fire 🔥");

        let memory = catalog.iter().find(|d| d.controller == ControllerKind::Recall).unwrap();
        let card = StageCard::new(memory, stats);
        assert_eq!(card.best_time_ms, None);
        assert_eq!(card.summary(), "Plays: 3 · Streak: 1");
    }
}
