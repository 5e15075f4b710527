//! Report Output
//!
//! Writes run and batch reports as pretty JSON.

use serde::Serialize;
use std::fs;
use std::path::Path;

use yard_sale_events::{BatchReport, RunReport};

fn write_json<T: Serialize>(value: &T, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)
}

/// Write a single run report, creating parent directories as needed.
pub fn write_run_report(report: &RunReport, path: &Path) -> std::io::Result<()> {
    write_json(report, path)
}

/// Write a batch report, creating parent directories as needed.
pub fn write_batch_report(report: &BatchReport, path: &Path) -> std::io::Result<()> {
    write_json(report, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use yard_sale_events::{DistributionMetrics, ModelParameters};

    fn sample_report() -> RunReport {
        RunReport {
            parameters: ModelParameters {
                win_percentage: 0.2,
                chi: 0.1,
                zeta: 0.0,
                kappa: 0.0,
                rounds: 100,
                seed: 1,
            },
            rounds_completed: 100,
            initial_metrics: DistributionMetrics::default(),
            final_metrics: DistributionMetrics::default(),
            snapshots: Vec::new(),
            lorenz_curve: Vec::new(),
        }
    }

    #[test]
    fn test_write_run_report_creates_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        write_run_report(&sample_report(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: RunReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, sample_report());
    }

    #[test]
    fn test_write_batch_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("batch.json");

        let batch = BatchReport::new(vec![sample_report(), sample_report()]);
        write_batch_report(&batch, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"runs\""));
        assert!(content.contains("\"chi\": 0.1"));
    }
}
