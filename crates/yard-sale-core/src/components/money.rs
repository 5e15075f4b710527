//! Currency Rounding
//!
//! Balances are real-valued but every phase settles to whole cents.

/// Rounds to two decimals, ties to even.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Truncates down to the nearest cent.
pub fn floor_cents(value: f64) -> f64 {
    (value * 100.0).floor() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(135.0), 135.0);
        assert_eq!(round_cents(10.004), 10.0);
        assert_eq!(round_cents(10.006), 10.01);
        assert_eq!(round_cents(-3.337), -3.34);
    }

    #[test]
    fn test_round_cents_ties_to_even() {
        // 0.125 and 0.375 are exact in binary
        assert_eq!(round_cents(0.125), 0.12);
        assert_eq!(round_cents(0.375), 0.38);
    }

    #[test]
    fn test_floor_cents() {
        assert_eq!(floor_cents(15.0), 15.0);
        assert_eq!(floor_cents(15.0099), 15.0);
        assert_eq!(floor_cents(2.999), 2.99);
        assert_eq!(floor_cents(0.0), 0.0);
    }
}
