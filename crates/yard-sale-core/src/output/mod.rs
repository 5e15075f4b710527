//! Output Module
//!
//! Turns engine state into report records and writes them as JSON for
//! external renderers.

pub mod report;
pub mod stats;

pub use report::{write_batch_report, write_run_report};
pub use stats::{
    build_batch_report, build_run_report, model_parameters, snapshot_record, snapshot_records,
};
