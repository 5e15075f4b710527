//! Population Setup
//!
//! Creates agents with uniform, random or explicit starting balances.

use rand::Rng;
use std::collections::BTreeMap;

use crate::components::money::round_cents;
use crate::components::WealthLedger;
use crate::error::{ConfigurationError, ValidationError};

/// Agent id for the agent at `index`
pub fn agent_id(index: usize) -> String {
    format!("agent_{:04}", index)
}

/// `count` agents that all start with `wealth`.
pub fn uniform_population(count: usize, wealth: f64) -> Result<WealthLedger<String>, ValidationError> {
    WealthLedger::new((0..count).map(|i| (agent_id(i), wealth)))
}

/// `count` agents with balances drawn uniformly from `[min_wealth, max_wealth]`,
/// rounded to cents.
pub fn random_population<R: Rng + ?Sized>(
    count: usize,
    min_wealth: f64,
    max_wealth: f64,
    rng: &mut R,
) -> crate::error::Result<WealthLedger<String>> {
    if !(min_wealth.is_finite() && max_wealth.is_finite()) || min_wealth > max_wealth {
        return Err(ConfigurationError::InvalidParameter {
            name: "max_wealth",
            value: max_wealth,
            reason: "wealth range must be finite with min <= max",
        }
        .into());
    }

    let balances: Vec<(String, f64)> = (0..count)
        .map(|i| (agent_id(i), round_cents(rng.gen_range(min_wealth..=max_wealth))))
        .collect();
    Ok(WealthLedger::new(balances)?)
}

/// Ledger from explicit balances, ordered by agent id.
pub fn explicit_population(balances: &BTreeMap<String, f64>) -> Result<WealthLedger<String>, ValidationError> {
    WealthLedger::new(balances.iter().map(|(id, wealth)| (id.clone(), *wealth)))
}
