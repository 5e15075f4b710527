//! Pairing Phase
//!
//! Draws a uniform random perfect matching of all agents.

use rand::seq::SliceRandom;
use rand::Rng;

/// Two agents trading this round, in drawn order
#[derive(Debug, Clone, PartialEq)]
pub struct Pair<K> {
    pub first: (K, f64),
    pub second: (K, f64),
}

impl<K> Pair<K> {
    pub fn new(first: (K, f64), second: (K, f64)) -> Self {
        Self { first, second }
    }

    /// Absolute gap between the two balances.
    pub fn wealth_difference(&self) -> f64 {
        (self.first.1 - self.second.1).abs()
    }

    /// The smaller of the two balances.
    pub fn min_wealth(&self) -> f64 {
        self.first.1.min(self.second.1)
    }

    /// Splits into `(poorer, richer)`. On equal balances the first agent is
    /// the poorer one.
    pub fn into_poor_rich(self) -> ((K, f64), (K, f64)) {
        if self.second.1 < self.first.1 {
            (self.second, self.first)
        } else {
            (self.first, self.second)
        }
    }
}

/// Shuffles all agents and chunks them into adjacent pairs.
///
/// Consumes the generator for exactly one permutation. The balance count
/// must be even; the ledger guarantees this.
pub fn draw_pairs<K, R: Rng + ?Sized>(mut balances: Vec<(K, f64)>, rng: &mut R) -> Vec<Pair<K>> {
    debug_assert!(balances.len() % 2 == 0, "pairing needs an even agent count");

    balances.shuffle(rng);

    let mut pairs = Vec::with_capacity(balances.len() / 2);
    let mut drawn = balances.into_iter();
    while let (Some(first), Some(second)) = (drawn.next(), drawn.next()) {
        pairs.push(Pair::new(first, second));
    }
    pairs
}
