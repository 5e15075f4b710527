//! Statistics Output
//!
//! Builds snapshot and run report records from ledgers and snapshot history.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use yard_sale_events::{
    AgentBalance, BatchReport, DistributionMetrics, ModelParameters, RunReport, WealthSnapshot,
};

use crate::components::WealthLedger;
use crate::engine::{CompletedRun, ModelParams, SnapshotHistory};

/// Record form of the model parameters.
pub fn model_parameters(params: &ModelParams) -> ModelParameters {
    ModelParameters {
        win_percentage: params.win_percentage,
        chi: params.chi,
        zeta: params.zeta,
        kappa: params.kappa,
        rounds: params.rounds,
        seed: params.seed,
    }
}

/// Snapshot record for the balances recorded after `round`.
pub fn snapshot_record<K>(round: u64, balances: &[(K, f64)]) -> WealthSnapshot
where
    K: Clone + Eq + Hash + Debug + Display,
{
    let mut snapshot = WealthSnapshot::new(round);
    snapshot.agents = balances
        .iter()
        .map(|(agent, wealth)| AgentBalance::new(agent.to_string(), *wealth))
        .collect();

    // Recorded balances always come from a validated ledger
    if let Ok(ledger) = WealthLedger::new(balances.iter().cloned()) {
        snapshot.metrics = ledger.metrics();
    }
    snapshot
}

/// Snapshot records in round order.
pub fn snapshot_records<K>(history: &SnapshotHistory<K>) -> Vec<WealthSnapshot>
where
    K: Clone + Eq + Hash + Debug + Display,
{
    history
        .iter()
        .map(|(round, balances)| snapshot_record(*round, balances))
        .collect()
}

/// Full report of a finished run.
pub fn build_run_report<K>(
    params: &ModelParams,
    initial_metrics: DistributionMetrics,
    final_ledger: &WealthLedger<K>,
    rounds_completed: u64,
    history: &SnapshotHistory<K>,
) -> RunReport
where
    K: Clone + Eq + Hash + Debug + Display,
{
    RunReport {
        parameters: model_parameters(params),
        rounds_completed,
        initial_metrics,
        final_metrics: final_ledger.metrics(),
        snapshots: snapshot_records(history),
        lorenz_curve: final_ledger.lorenz_curve_points().unwrap_or_default(),
    }
}

/// Report covering every run of a batch.
pub fn build_batch_report<K>(
    params: &ModelParams,
    initial_ledger: &WealthLedger<K>,
    runs: &[CompletedRun<K>],
) -> BatchReport
where
    K: Clone + Eq + Hash + Debug + Display,
{
    let initial_metrics = initial_ledger.metrics();
    let reports = runs
        .iter()
        .map(|run| {
            build_run_report(
                &params.with_seed(run.seed),
                initial_metrics.clone(),
                &run.ledger,
                run.rounds_completed,
                &run.snapshots,
            )
        })
        .collect();
    BatchReport::new(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{run_batch, YardSaleEngine};

    fn ledger() -> WealthLedger<String> {
        WealthLedger::new((0..4).map(|i| (format!("agent_{}", i), 100.0))).unwrap()
    }

    #[test]
    fn test_snapshot_record() {
        let balances = vec![("a".to_string(), 25.0), ("b".to_string(), 75.0)];
        let record = snapshot_record(40, &balances);

        assert_eq!(record.snapshot_id, "snap_000040");
        assert_eq!(record.agents[1], AgentBalance::new("b", 75.0));
        assert_eq!(record.metrics.total_wealth, 100.0);
        assert_eq!(record.metrics.gini, Some(0.25));
    }

    #[test]
    fn test_build_run_report() {
        let ledger = ledger();
        let initial = ledger.metrics();
        let params = ModelParams::new(0.25).with_rounds(30).with_seed(4);

        let mut engine = YardSaleEngine::new(ledger, params).unwrap();
        let history = engine.run_configured(10, true).unwrap();
        let report = build_run_report(
            &params,
            initial,
            engine.ledger(),
            engine.rounds_completed(),
            &history,
        );

        assert_eq!(report.parameters.seed, 4);
        assert_eq!(report.rounds_completed, 30);
        assert_eq!(report.initial_metrics.gini, Some(0.0));
        assert_eq!(report.snapshots.len(), 3);
        assert_eq!(report.snapshots[2].round, 30);
        assert_eq!(report.lorenz_curve.len(), 5);
    }

    #[test]
    fn test_build_batch_report() {
        let ledger = ledger();
        let params = ModelParams::new(0.25).with_rounds(10);
        let runs = run_batch(&ledger, params, &[3, 4], 5, false).unwrap();

        let batch = build_batch_report(&params, &ledger, &runs);
        assert_eq!(batch.runs.len(), 2);
        assert_eq!(batch.runs[1].parameters.seed, 4);
        assert!(batch.runs.iter().all(|r| r.snapshots.is_empty()));
    }
}
