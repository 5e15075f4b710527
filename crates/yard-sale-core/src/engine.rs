//! Yard Sale Engine
//!
//! Drives the extended yard sale model: every round recomputes the mean,
//! taxes the rich, advances the debt-floor loan, pairs all agents, rolls a
//! biased coin per pair, settles the exchanges and collects the loan.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, info, trace, warn};

use crate::components::WealthLedger;
use crate::error::{ConfigurationError, Result};
use crate::systems::{advance_loan, draw_pairs, pay_tax, repay_loan, roll_outcomes, settle};

/// Default number of rounds
pub const DEFAULT_ROUNDS: u64 = 10_000;

/// Wealth of every agent keyed by the 1-based round it was recorded after
pub type SnapshotHistory<K> = BTreeMap<u64, Vec<(K, f64)>>;

/// Model parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    /// Share of the poorer agent's wealth that changes hands per exchange
    pub win_percentage: f64,
    /// Wealth tax rate for agents above the mean
    pub chi: f64,
    /// Bias towards the richer agent per unit of wealth gap
    pub zeta: f64,
    /// Debt floor as a multiple of the mean wealth
    pub kappa: f64,
    /// Rounds run by `run_configured`
    pub rounds: u64,
    pub seed: u64,
}

impl ModelParams {
    /// Parameters with no tax, bias or debt, 10000 rounds and seed 0.
    pub fn new(win_percentage: f64) -> Self {
        Self {
            win_percentage,
            chi: 0.0,
            zeta: 0.0,
            kappa: 0.0,
            rounds: DEFAULT_ROUNDS,
            seed: 0,
        }
    }

    pub fn with_chi(mut self, chi: f64) -> Self {
        self.chi = chi;
        self
    }

    pub fn with_zeta(mut self, zeta: f64) -> Self {
        self.zeta = zeta;
        self
    }

    pub fn with_kappa(mut self, kappa: f64) -> Self {
        self.kappa = kappa;
        self
    }

    pub fn with_rounds(mut self, rounds: u64) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        let checks = [
            ("win_percentage", self.win_percentage),
            ("chi", self.chi),
            ("zeta", self.zeta),
            ("kappa", self.kappa),
        ];
        for (name, value) in checks {
            if !value.is_finite() {
                return Err(ConfigurationError::InvalidParameter {
                    name,
                    value,
                    reason: "must be finite",
                });
            }
        }

        if !(0.0..=1.0).contains(&self.chi) {
            return Err(ConfigurationError::InvalidParameter {
                name: "chi",
                value: self.chi,
                reason: "tax rate must lie in [0, 1]",
            });
        }
        if self.zeta < 0.0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "zeta",
                value: self.zeta,
                reason: "bias coefficient must be non-negative",
            });
        }
        if self.kappa < 0.0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "kappa",
                value: self.kappa,
                reason: "debt floor coefficient must be non-negative",
            });
        }
        if self.rounds == 0 {
            return Err(ConfigurationError::ZeroRounds);
        }

        if !(0.0..=1.0).contains(&self.win_percentage) {
            warn!(
                win_percentage = self.win_percentage,
                "win percentage outside [0, 1], exchanges may overshoot"
            );
        }
        Ok(())
    }
}

/// Outcome of one run in a batch
#[derive(Debug, Clone)]
pub struct CompletedRun<K> {
    pub seed: u64,
    pub rounds_completed: u64,
    pub snapshots: SnapshotHistory<K>,
    pub ledger: WealthLedger<K>,
}

/// The simulation engine. Exclusively owns its ledger and random stream.
#[derive(Debug, Clone)]
pub struct YardSaleEngine<K> {
    ledger: WealthLedger<K>,
    params: ModelParams,
    rng: SmallRng,
    avg_wealth: f64,
    rounds_completed: u64,
}

impl<K> YardSaleEngine<K>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Creates an engine over a validated ledger, seeding the generator.
    pub fn new(ledger: WealthLedger<K>, params: ModelParams) -> std::result::Result<Self, ConfigurationError> {
        params.validate()?;
        Ok(Self::with_checked_params(ledger, params))
    }

    /// Builds the engine without re-checking `params`.
    fn with_checked_params(ledger: WealthLedger<K>, params: ModelParams) -> Self {
        let avg_wealth = ledger.mean_wealth();

        Self {
            ledger,
            rng: SmallRng::seed_from_u64(params.seed),
            params,
            avg_wealth,
            rounds_completed: 0,
        }
    }

    /// Validates the initial balances and builds an engine over them.
    pub fn from_balances<I>(initial_balances: I, params: ModelParams) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let ledger = WealthLedger::new(initial_balances)?;
        Ok(Self::new(ledger, params)?)
    }

    pub fn ledger(&self) -> &WealthLedger<K> {
        &self.ledger
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Mean wealth captured at the start of the latest round.
    pub fn avg_wealth(&self) -> f64 {
        self.avg_wealth
    }

    pub fn rounds_completed(&self) -> u64 {
        self.rounds_completed
    }

    /// Consumes the engine, returning the final ledger.
    pub fn into_ledger(self) -> WealthLedger<K> {
        self.ledger
    }

    /// Runs one round of all five phases.
    pub fn perform_round(&mut self) {
        self.avg_wealth = self.ledger.mean_wealth();
        let loan = self.params.kappa * self.avg_wealth;

        let balances = self.ledger.take_balances();
        let (mut balances, tax) = pay_tax(balances, self.avg_wealth, self.params.chi);
        advance_loan(&mut balances, loan);

        let pairs = draw_pairs(balances, &mut self.rng);
        let outcomes = roll_outcomes(&mut self.rng, &pairs, self.params.zeta);

        let mut balances = settle(pairs, &outcomes, self.params.win_percentage);
        repay_loan(&mut balances, loan);
        self.ledger.restore_balances(balances);

        self.rounds_completed += 1;
        trace!(
            round = self.rounds_completed,
            avg_wealth = self.avg_wealth,
            tax = tax.collected,
            "round complete"
        );
    }

    /// Runs `total_rounds` rounds, recording a copy of the balances after
    /// every round whose 1-based index is a multiple of `snapshot_interval`.
    ///
    /// Round indices count from the start of this call. Nothing runs when
    /// the arguments are rejected.
    pub fn run(
        &mut self,
        total_rounds: u64,
        snapshot_interval: u64,
        collect_snapshots: bool,
    ) -> std::result::Result<SnapshotHistory<K>, ConfigurationError> {
        if total_rounds == 0 {
            return Err(ConfigurationError::ZeroRounds);
        }
        if collect_snapshots {
            if snapshot_interval == 0 {
                return Err(ConfigurationError::ZeroSnapshotInterval);
            }
            if snapshot_interval > total_rounds {
                return Err(ConfigurationError::SnapshotIntervalExceedsRounds {
                    interval: snapshot_interval,
                    total_rounds,
                });
            }
        }

        info!(
            agents = self.ledger.len(),
            total_rounds,
            seed = self.params.seed,
            "starting yard sale"
        );

        let mut history = SnapshotHistory::new();
        for round in 1..=total_rounds {
            self.perform_round();

            if collect_snapshots && round % snapshot_interval == 0 {
                history.insert(round, self.ledger.snapshot());
                debug!(round, total_wealth = self.ledger.total_wealth(), "snapshot recorded");
            }
        }

        info!(
            rounds = total_rounds,
            snapshots = history.len(),
            "yard sale finished"
        );
        Ok(history)
    }

    /// Runs the number of rounds the engine was configured with.
    pub fn run_configured(
        &mut self,
        snapshot_interval: u64,
        collect_snapshots: bool,
    ) -> std::result::Result<SnapshotHistory<K>, ConfigurationError> {
        self.run(self.params.rounds, snapshot_interval, collect_snapshots)
    }
}

/// Runs an independent simulation from the same starting ledger for every
/// seed, each for `params.rounds` rounds.
pub fn run_batch<K>(
    ledger: &WealthLedger<K>,
    params: ModelParams,
    seeds: &[u64],
    snapshot_interval: u64,
    collect_snapshots: bool,
) -> std::result::Result<Vec<CompletedRun<K>>, ConfigurationError>
where
    K: Clone + Eq + Hash + Debug,
{
    if seeds.is_empty() {
        return Err(ConfigurationError::NoSeeds);
    }
    params.validate()?;

    seeds
        .iter()
        .map(|&seed| -> std::result::Result<CompletedRun<K>, ConfigurationError> {
            let mut engine =
                YardSaleEngine::with_checked_params(ledger.clone(), params.with_seed(seed));
            let snapshots = engine.run_configured(snapshot_interval, collect_snapshots)?;
            Ok(CompletedRun {
                seed,
                rounds_completed: engine.rounds_completed(),
                snapshots,
                ledger: engine.into_ledger(),
            })
        })
        .collect()
}
