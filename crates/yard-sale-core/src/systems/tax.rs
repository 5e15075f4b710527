//! Tax Phase
//!
//! Agents above the mean pay a flat wealth tax; the proceeds are shared
//! equally among everyone at or below the mean.

use tracing::trace;

use crate::components::money::{floor_cents, round_cents};

/// What the tax phase moved in one round
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TaxSummary {
    pub rich_count: usize,
    pub poor_count: usize,
    /// Tax collected after truncation to the cent
    pub collected: f64,
}

/// Applies the wealth tax at rate `chi` against `avg_wealth`.
///
/// The returned list holds the rich agents first and then the poor agents,
/// each group in its prior order. A balance equal to the mean counts as poor.
pub fn pay_tax<K>(
    balances: Vec<(K, f64)>,
    avg_wealth: f64,
    chi: f64,
) -> (Vec<(K, f64)>, TaxSummary) {
    let (mut rich, mut poor): (Vec<_>, Vec<_>) = balances
        .into_iter()
        .partition(|(_, wealth)| *wealth > avg_wealth);

    let rich_total: f64 = rich.iter().map(|(_, wealth)| wealth).sum();
    let tax = floor_cents(chi * rich_total);

    if !poor.is_empty() {
        let subsidy = tax / poor.len() as f64;
        for (_, wealth) in poor.iter_mut() {
            *wealth = round_cents(*wealth + subsidy);
        }
    }

    for (_, wealth) in rich.iter_mut() {
        *wealth = round_cents(*wealth - *wealth * chi);
    }

    let summary = TaxSummary {
        rich_count: rich.len(),
        poor_count: poor.len(),
        collected: tax,
    };
    trace!(?summary, "tax phase");

    rich.append(&mut poor);
    (rich, summary)
}
