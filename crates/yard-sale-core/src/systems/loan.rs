//! Debt Floor
//!
//! Before the exchange every agent is advanced `kappa * avg_wealth`, and the
//! same amount is collected afterwards. Balances can therefore settle as low
//! as `-kappa * avg_wealth` without any per-agent debt being tracked.

use crate::components::money::round_cents;

/// Adds the uniform loan to every balance.
pub fn advance_loan<K>(balances: &mut [(K, f64)], loan: f64) {
    for (_, wealth) in balances.iter_mut() {
        *wealth = round_cents(*wealth + loan);
    }
}

/// Collects the uniform loan from every balance. `loan` must be the amount
/// advanced at the start of the same round.
pub fn repay_loan<K>(balances: &mut [(K, f64)], loan: f64) {
    for (_, wealth) in balances.iter_mut() {
        *wealth = round_cents(*wealth - loan);
    }
}
