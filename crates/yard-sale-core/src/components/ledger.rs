//! Wealth Ledger
//!
//! Owns the balance of every agent and computes read-only distribution
//! analytics: sorted balances, Gini coefficient and Lorenz curve.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use yard_sale_events::{DistributionMetrics, LorenzPoint};

use crate::error::{ArithmeticError, ValidationError};

/// Balances of an even, non-empty, fixed set of agents.
///
/// Entries keep the order they were supplied in. The engine rewrites that
/// order every round, so the agent set never changes but its iteration
/// order does.
#[derive(Debug, Clone, PartialEq)]
pub struct WealthLedger<K> {
    balances: Vec<(K, f64)>,
}

impl<K> WealthLedger<K>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Validates and stores a copy of the initial balances.
    pub fn new<I>(initial_balances: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let balances: Vec<(K, f64)> = initial_balances.into_iter().collect();

        if balances.is_empty() {
            return Err(ValidationError::Empty);
        }
        if balances.len() % 2 != 0 {
            return Err(ValidationError::OddAgentCount(balances.len()));
        }

        let mut seen = HashSet::with_capacity(balances.len());
        for (agent, balance) in &balances {
            if !seen.insert(agent) {
                return Err(ValidationError::DuplicateAgent(format!("{:?}", agent)));
            }
            if !balance.is_finite() {
                return Err(ValidationError::NonFiniteBalance {
                    agent: format!("{:?}", agent),
                    balance: *balance,
                });
            }
        }

        Ok(Self { balances })
    }

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Always false for a validated ledger.
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Agents and balances in current iteration order.
    pub fn entries(&self) -> &[(K, f64)] {
        &self.balances
    }

    /// Current balance of an agent.
    pub fn balance(&self, agent: &K) -> Option<f64> {
        self.balances
            .iter()
            .find(|(id, _)| id == agent)
            .map(|(_, wealth)| *wealth)
    }

    pub fn total_wealth(&self) -> f64 {
        self.balances.iter().map(|(_, wealth)| wealth).sum()
    }

    pub fn mean_wealth(&self) -> f64 {
        self.total_wealth() / self.balances.len() as f64
    }

    /// Balances in ascending order.
    pub fn sorted_balances(&self) -> Vec<f64> {
        let mut sorted: Vec<f64> = self.balances.iter().map(|(_, wealth)| *wealth).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted
    }

    /// Rank-weighted Gini coefficient of the current distribution.
    ///
    /// For balances sorted ascending `y_1 <= ... <= y_n`:
    /// `G = 2 * sum(i * y_i) / (n * sum(y_i)) - (n + 1) / n`.
    pub fn gini_coefficient(&self) -> Result<f64, ArithmeticError> {
        let sorted = self.sorted_balances();
        let total: f64 = sorted.iter().sum();
        if total == 0.0 {
            return Err(ArithmeticError::ZeroTotalWealth);
        }

        let n = sorted.len() as f64;
        let weighted_sum: f64 = sorted
            .iter()
            .enumerate()
            .map(|(i, wealth)| (i + 1) as f64 * wealth)
            .sum();

        Ok(2.0 * weighted_sum / (n * total) - (n + 1.0) / n)
    }

    /// Lorenz curve coordinates, starting at (0, 0).
    ///
    /// Point `k` is the share of total wealth held by the poorest `k` agents,
    /// plotted at population share `k / n`.
    pub fn lorenz_curve_points(&self) -> Result<Vec<LorenzPoint>, ArithmeticError> {
        let sorted = self.sorted_balances();
        let total: f64 = sorted.iter().sum();
        if total == 0.0 {
            return Err(ArithmeticError::ZeroTotalWealth);
        }

        let n = sorted.len() as f64;
        let mut points = Vec::with_capacity(sorted.len() + 1);
        points.push(LorenzPoint::new(0.0, 0.0));

        let mut cumulative = 0.0;
        for (i, wealth) in sorted.iter().enumerate() {
            cumulative += wealth;
            points.push(LorenzPoint::new((i + 1) as f64 / n, cumulative / total));
        }

        Ok(points)
    }

    /// Summary statistics of the current distribution.
    pub fn metrics(&self) -> DistributionMetrics {
        let sorted = self.sorted_balances();
        let count = sorted.len();
        let total: f64 = sorted.iter().sum();

        let top_count = count.div_ceil(10);
        let top_total: f64 = sorted[count - top_count..].iter().sum();
        let has_wealth = total != 0.0;

        DistributionMetrics {
            agent_count: count,
            total_wealth: total,
            mean_wealth: total / count as f64,
            median_wealth: (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0,
            min_wealth: sorted[0],
            max_wealth: sorted[count - 1],
            gini: self.gini_coefficient().ok(),
            top_decile_share: has_wealth.then(|| top_total / total),
            agents_in_debt: sorted.iter().filter(|wealth| **wealth < 0.0).count(),
        }
    }

    /// Independent copy of the current balances.
    pub fn snapshot(&self) -> Vec<(K, f64)> {
        self.balances.clone()
    }

    /// Hands the balances to a round's phases. Must be followed by
    /// `restore_balances` with the same agent set.
    pub(crate) fn take_balances(&mut self) -> Vec<(K, f64)> {
        std::mem::take(&mut self.balances)
    }

    pub(crate) fn restore_balances(&mut self, balances: Vec<(K, f64)>) {
        debug_assert!(balances.len() % 2 == 0 && !balances.is_empty());
        self.balances = balances;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(values: &[f64]) -> WealthLedger<usize> {
        WealthLedger::new(values.iter().copied().enumerate()).unwrap()
    }

    #[test]
    fn test_rejects_empty() {
        let result = WealthLedger::<String>::new(Vec::new());
        assert_eq!(result.unwrap_err(), ValidationError::Empty);
    }

    #[test]
    fn test_rejects_odd_count() {
        let result = WealthLedger::new(vec![("a", 1.0), ("b", 2.0), ("c", 3.0)]);
        assert_eq!(result.unwrap_err(), ValidationError::OddAgentCount(3));
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = WealthLedger::new(vec![("a", 1.0), ("a", 2.0)]);
        assert!(matches!(result, Err(ValidationError::DuplicateAgent(_))));
    }

    #[test]
    fn test_rejects_non_finite_balance() {
        let result = WealthLedger::new(vec![("a", 1.0), ("b", f64::NAN)]);
        assert!(matches!(result, Err(ValidationError::NonFiniteBalance { .. })));
    }

    #[test]
    fn test_preserves_order_and_lookup() {
        let ledger = WealthLedger::new(vec![("b", 150.0), ("a", 50.0)]).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[0].0, "b");
        assert_eq!(ledger.balance(&"a"), Some(50.0));
        assert_eq!(ledger.balance(&"z"), None);
        assert_eq!(ledger.total_wealth(), 200.0);
        assert_eq!(ledger.mean_wealth(), 100.0);
    }

    #[test]
    fn test_sorted_balances() {
        let ledger = ledger(&[30.0, -5.0, 10.0, 20.0]);
        assert_eq!(ledger.sorted_balances(), vec![-5.0, 10.0, 20.0, 30.0]);
        // Sorting must not reorder the ledger itself
        assert_eq!(ledger.entries()[0].1, 30.0);
    }

    #[test]
    fn test_gini_equal_distribution_is_zero() {
        assert_eq!(ledger(&[100.0; 4]).gini_coefficient().unwrap(), 0.0);
        assert_eq!(ledger(&[100.0; 6]).gini_coefficient().unwrap(), 0.0);
        assert_eq!(ledger(&[7.0; 100]).gini_coefficient().unwrap(), 0.0);
    }

    #[test]
    fn test_gini_concentrated_wealth() {
        // One agent holding everything gives (n - 1) / n
        let gini = ledger(&[0.0, 0.0, 0.0, 400.0]).gini_coefficient().unwrap();
        assert!((gini - 0.75).abs() < 1e-12);

        let mut values = vec![0.0; 1000];
        values[0] = 1000.0;
        let gini = ledger(&values).gini_coefficient().unwrap();
        assert!((gini - 0.999).abs() < 1e-9);
    }

    #[test]
    fn test_gini_zero_total_is_error() {
        let result = ledger(&[50.0, -50.0]).gini_coefficient();
        assert_eq!(result.unwrap_err(), ArithmeticError::ZeroTotalWealth);
    }

    #[test]
    fn test_lorenz_curve_endpoints() {
        let points = ledger(&[10.0, 40.0, 20.0, 30.0]).lorenz_curve_points().unwrap();

        assert_eq!(points.len(), 5);
        assert_eq!(points[0], LorenzPoint::new(0.0, 0.0));
        assert_eq!(points[1], LorenzPoint::new(0.25, 0.1));
        assert_eq!(points[4], LorenzPoint::new(1.0, 1.0));
        assert!(points.windows(2).all(|w| w[1].y >= w[0].y));
    }

    #[test]
    fn test_lorenz_curve_zero_total_is_error() {
        let result = ledger(&[0.0, 0.0]).lorenz_curve_points();
        assert!(result.is_err());
    }

    #[test]
    fn test_metrics() {
        let metrics = ledger(&[40.0, -10.0, 10.0, 60.0]).metrics();

        assert_eq!(metrics.agent_count, 4);
        assert_eq!(metrics.total_wealth, 100.0);
        assert_eq!(metrics.mean_wealth, 25.0);
        assert_eq!(metrics.median_wealth, 25.0);
        assert_eq!(metrics.min_wealth, -10.0);
        assert_eq!(metrics.max_wealth, 60.0);
        assert_eq!(metrics.top_decile_share, Some(0.6));
        assert_eq!(metrics.agents_in_debt, 1);
        assert!(metrics.gini.is_some());
    }

    #[test]
    fn test_metrics_zero_total() {
        let metrics = ledger(&[0.0, 0.0]).metrics();
        assert_eq!(metrics.gini, None);
        assert_eq!(metrics.top_decile_share, None);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut ledger = ledger(&[1.0, 2.0]);
        let snapshot = ledger.snapshot();

        let mut balances = ledger.take_balances();
        balances[0].1 = 99.0;
        ledger.restore_balances(balances);

        assert_eq!(snapshot[0].1, 1.0);
        assert_eq!(ledger.entries()[0].1, 99.0);
    }
}
