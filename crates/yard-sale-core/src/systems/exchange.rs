//! Exchange Phase
//!
//! Moves `min(pair balances) * win_percentage` between the two agents of
//! every pair according to the rolled outcome.

use super::dice::Outcome;
use super::pairing::Pair;
use crate::components::money::round_cents;

/// Settles every pair and returns the new balance list.
///
/// Each pair contributes its poorer agent followed by its richer agent.
/// `outcomes` holds one entry per pair, in pair order.
pub fn settle<K>(pairs: Vec<Pair<K>>, outcomes: &[Outcome], win_percentage: f64) -> Vec<(K, f64)> {
    debug_assert_eq!(pairs.len(), outcomes.len());

    let mut balances = Vec::with_capacity(pairs.len() * 2);
    for (pair, outcome) in pairs.into_iter().zip(outcomes) {
        let exchange_amount = pair.min_wealth() * win_percentage;
        let transfer = outcome.poor_sign() * exchange_amount;

        let ((poor_id, poor_wealth), (rich_id, rich_wealth)) = pair.into_poor_rich();
        balances.push((poor_id, round_cents(poor_wealth + transfer)));
        balances.push((rich_id, round_cents(rich_wealth - transfer)));
    }
    balances
}
