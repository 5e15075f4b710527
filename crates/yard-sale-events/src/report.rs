//! Report Types
//!
//! Complete results of one or more simulation runs.

use serde::{Deserialize, Serialize};

use crate::snapshot::{DistributionMetrics, LorenzPoint, WealthSnapshot};

/// Model parameters a run was performed with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub win_percentage: f64,
    pub chi: f64,
    pub zeta: f64,
    pub kappa: f64,
    pub rounds: u64,
    pub seed: u64,
}

/// Result of a single simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub parameters: ModelParameters,
    pub rounds_completed: u64,
    pub initial_metrics: DistributionMetrics,
    pub final_metrics: DistributionMetrics,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub snapshots: Vec<WealthSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lorenz_curve: Vec<LorenzPoint>,
}

impl RunReport {
    /// Finds the snapshot recorded after a round.
    pub fn snapshot_at(&self, round: u64) -> Option<&WealthSnapshot> {
        self.snapshots.iter().find(|s| s.round == round)
    }

    /// Change in Gini coefficient over the run, if both ends have one.
    pub fn gini_change(&self) -> Option<f64> {
        match (self.initial_metrics.gini, self.final_metrics.gini) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

/// Results of independent runs over several seeds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub runs: Vec<RunReport>,
}

impl BatchReport {
    pub fn new(runs: Vec<RunReport>) -> Self {
        Self { runs }
    }

    /// Mean final Gini over the runs that have one.
    pub fn mean_final_gini(&self) -> Option<f64> {
        let ginis: Vec<f64> = self.runs.iter().filter_map(|r| r.final_metrics.gini).collect();
        if ginis.is_empty() {
            return None;
        }
        Some(ginis.iter().sum::<f64>() / ginis.len() as f64)
    }
}
