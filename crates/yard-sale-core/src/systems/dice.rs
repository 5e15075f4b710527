//! Dice Roll Phase
//!
//! Decides each pair's winner with a coin biased towards the richer agent.
//! The bias is `zeta * |wealth_a - wealth_b|`, giving outcome weights
//! `[(0.5 + bias) / (1 + bias), 0.5 / (1 + bias)]`.

use rand::Rng;

use super::pairing::Pair;

/// Winner of a single exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Roll 0: the poorer agent pays the richer one
    RicherWins,
    /// Roll 1: the richer agent pays the poorer one
    PoorerWins,
}

impl Outcome {
    /// Numeric roll as used in `(2 * roll - 1)`.
    pub fn roll(self) -> u8 {
        match self {
            Outcome::RicherWins => 0,
            Outcome::PoorerWins => 1,
        }
    }

    /// Sign applied to the poorer agent's balance change.
    pub fn poor_sign(self) -> f64 {
        2.0 * self.roll() as f64 - 1.0
    }
}

/// Weights of `[RicherWins, PoorerWins]` for a given wealth gap.
pub fn outcome_weights(wealth_difference: f64, zeta: f64) -> [f64; 2] {
    let bias = zeta * wealth_difference;
    [(0.5 + bias) / (1.0 + bias), 0.5 / (1.0 + bias)]
}

/// Draws one biased outcome, consuming one value from the generator.
pub fn roll_outcome<R: Rng + ?Sized>(rng: &mut R, wealth_difference: f64, zeta: f64) -> Outcome {
    let weights = outcome_weights(wealth_difference, zeta);
    let total = weights[0] + weights[1];

    let roll: f64 = rng.gen::<f64>() * total;
    if roll < weights[0] {
        Outcome::RicherWins
    } else {
        Outcome::PoorerWins
    }
}

/// Rolls once per pair, in pair order.
pub fn roll_outcomes<K, R: Rng + ?Sized>(rng: &mut R, pairs: &[Pair<K>], zeta: f64) -> Vec<Outcome> {
    pairs
        .iter()
        .map(|pair| roll_outcome(rng, pair.wealth_difference(), zeta))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_unbiased_weights() {
        assert_eq!(outcome_weights(100.0, 0.0), [0.5, 0.5]);
        assert_eq!(outcome_weights(0.0, 3.0), [0.5, 0.5]);
    }

    #[test]
    fn test_bias_favours_richer() {
        let weights = outcome_weights(10.0, 0.1);
        // bias = 1.0
        assert_eq!(weights, [0.75, 0.25]);
        assert!((weights[0] + weights[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_outcome_signs() {
        assert_eq!(Outcome::RicherWins.roll(), 0);
        assert_eq!(Outcome::RicherWins.poor_sign(), -1.0);
        assert_eq!(Outcome::PoorerWins.poor_sign(), 1.0);
    }

    #[test]
    fn test_roll_frequencies() {
        let mut rng = SmallRng::seed_from_u64(2024);
        let trials = 20_000;

        let richer_wins = (0..trials)
            .filter(|_| roll_outcome(&mut rng, 10.0, 0.1) == Outcome::RicherWins)
            .count();
        let share = richer_wins as f64 / trials as f64;
        assert!((share - 0.75).abs() < 0.02, "richer share was {}", share);
    }

    #[test]
    fn test_one_roll_per_pair() {
        let pairs = vec![
            Pair::new(("a", 1.0), ("b", 2.0)),
            Pair::new(("c", 3.0), ("d", 4.0)),
            Pair::new(("e", 5.0), ("f", 6.0)),
        ];

        let mut rng1 = SmallRng::seed_from_u64(9);
        let mut rng2 = SmallRng::seed_from_u64(9);
        let outcomes = roll_outcomes(&mut rng1, &pairs, 0.0);
        let singles: Vec<Outcome> = (0..3).map(|_| roll_outcome(&mut rng2, 0.0, 0.0)).collect();

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes, singles);
    }
}
