//! Snapshot Types
//!
//! Serialization structs for wealth snapshots.
//!
//! A snapshot captures every agent's balance after a given round, together
//! with summary metrics of the distribution at that point.

use serde::{Deserialize, Serialize};

/// Generates a snapshot ID for the given round.
pub fn generate_snapshot_id(round: u64) -> String {
    format!("snap_{:06}", round)
}

/// A single agent's balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentBalance {
    pub agent_id: String,
    pub wealth: f64,
}

impl AgentBalance {
    pub fn new(agent_id: impl Into<String>, wealth: f64) -> Self {
        Self {
            agent_id: agent_id.into(),
            wealth,
        }
    }
}

/// Summary statistics of a wealth distribution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionMetrics {
    pub agent_count: usize,
    pub total_wealth: f64,
    pub mean_wealth: f64,
    pub median_wealth: f64,
    pub min_wealth: f64,
    pub max_wealth: f64,
    /// Absent when total wealth is zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gini: Option<f64>,
    /// Share of total wealth held by the richest 10% of agents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_decile_share: Option<f64>,
    /// Number of agents with a balance below zero
    #[serde(default)]
    pub agents_in_debt: usize,
}

/// One coordinate of a Lorenz curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LorenzPoint {
    /// Cumulative population share
    pub x: f64,
    /// Cumulative wealth share
    pub y: f64,
}

impl LorenzPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Wealth of every agent after a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WealthSnapshot {
    pub snapshot_id: String,
    pub round: u64,
    pub agents: Vec<AgentBalance>,
    pub metrics: DistributionMetrics,
}

impl WealthSnapshot {
    /// Creates an empty snapshot for a round.
    pub fn new(round: u64) -> Self {
        Self {
            snapshot_id: generate_snapshot_id(round),
            round,
            agents: Vec::new(),
            metrics: DistributionMetrics::default(),
        }
    }

    /// Finds an agent's balance by ID.
    pub fn find_agent(&self, agent_id: &str) -> Option<&AgentBalance> {
        self.agents.iter().find(|a| a.agent_id == agent_id)
    }

    /// Sum of all balances in the snapshot.
    pub fn total_wealth(&self) -> f64 {
        self.agents.iter().map(|a| a.wealth).sum()
    }

    /// Serializes the snapshot to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the snapshot to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
