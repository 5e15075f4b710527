//! Shared snapshot and report types for the yard sale simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! Rendering tools (histograms, Lorenz plots) consume these records.

pub mod report;
pub mod snapshot;

// Re-export snapshot types
pub use snapshot::{
    generate_snapshot_id, AgentBalance, DistributionMetrics, LorenzPoint, WealthSnapshot,
};

// Re-export report types
pub use report::{BatchReport, ModelParameters, RunReport};
