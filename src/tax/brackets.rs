//! Progressive bracket calculator
//!
//! A `BracketTable` is a piecewise marginal-rate schedule applied cumulatively
//! to slices of an amount. Income tax and purchase tax are the direct users;
//! the two-tier national-insurance and health levies are expressed as
//! three-bracket tables (threshold -> lower rate, ceiling -> upper rate,
//! infinity -> 0), which reproduces the contribution cap exactly.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One marginal-rate slice: everything between the previous bracket's limit
/// and `upper_limit` (exclusive) is taxed at `marginal_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    /// Exclusive upper bound of the slice. `f64::INFINITY` for the top bracket.
    pub upper_limit: f64,

    /// Marginal rate in [0, 1].
    pub marginal_rate: f64,
}

impl Bracket {
    pub fn new(upper_limit: f64, marginal_rate: f64) -> Self {
        Self { upper_limit, marginal_rate }
    }
}

/// Ordered bracket sequence covering [0, infinity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketTable {
    brackets: Vec<Bracket>,
}

impl BracketTable {
    /// Validate and build a table.
    ///
    /// Requirements: non-empty, strictly increasing limits, last limit
    /// infinite, every rate in [0, 1]. A malformed table is a configuration
    /// bug, so this fails fast instead of clamping.
    pub fn new(brackets: Vec<Bracket>) -> Result<Self, EngineError> {
        if brackets.is_empty() {
            return Err(EngineError::EmptyBracketTable);
        }

        let mut prev = 0.0_f64;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.upper_limit <= prev {
                return Err(EngineError::NonMonotonicBrackets {
                    index,
                    limit: bracket.upper_limit,
                });
            }
            if !(0.0..=1.0).contains(&bracket.marginal_rate) {
                return Err(EngineError::RateOutOfRange {
                    index,
                    rate: bracket.marginal_rate,
                });
            }
            prev = bracket.upper_limit;
        }

        if brackets.last().map(|b| b.upper_limit) != Some(f64::INFINITY) {
            return Err(EngineError::UnboundedBracketMissing);
        }

        Ok(Self { brackets })
    }

    /// Convenience constructor from `(limit, rate)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, EngineError> {
        Self::new(pairs.iter().map(|&(l, r)| Bracket::new(l, r)).collect())
    }

    /// Two-tier capped levy: `lower_rate` up to `threshold`, `upper_rate`
    /// from there to `ceiling`, nothing above the ceiling.
    pub fn two_tier(
        threshold: f64,
        ceiling: f64,
        lower_rate: f64,
        upper_rate: f64,
    ) -> Result<Self, EngineError> {
        Self::from_pairs(&[
            (threshold, lower_rate),
            (ceiling, upper_rate),
            (f64::INFINITY, 0.0),
        ])
    }

    /// Total levy on `amount`.
    ///
    /// Walks the brackets in order, taxing each slice once. Continuous,
    /// non-negative, and non-decreasing in `amount`. Negative amounts are
    /// clamped to zero.
    pub fn levy(&self, amount: f64) -> f64 {
        let amount = amount.max(0.0);
        let mut total = 0.0;
        let mut prev = 0.0;

        for bracket in &self.brackets {
            if amount <= prev {
                break;
            }
            let taxable = amount.min(bracket.upper_limit) - prev;
            total += taxable * bracket.marginal_rate;
            prev = bracket.upper_limit;
        }

        total
    }

    /// Rate of the bracket containing `amount`.
    pub fn marginal_rate(&self, amount: f64) -> f64 {
        let amount = amount.max(0.0);
        let mut rate = self.brackets[0].marginal_rate;
        let mut prev = 0.0;

        for bracket in &self.brackets {
            if amount > prev {
                rate = bracket.marginal_rate;
            }
            prev = bracket.upper_limit;
        }

        rate
    }

    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn income_table() -> BracketTable {
        // 2026 monthly income tax brackets
        BracketTable::from_pairs(&[
            (7_010.0, 0.10),
            (10_060.0, 0.14),
            (19_000.0, 0.20),
            (25_100.0, 0.31),
            (46_690.0, 0.35),
            (60_130.0, 0.47),
            (f64::INFINITY, 0.50),
        ])
        .unwrap()
    }

    #[test]
    fn test_zero_amount_zero_levy() {
        assert_eq!(income_table().levy(0.0), 0.0);
    }

    #[test]
    fn test_first_bracket_only() {
        assert_abs_diff_eq!(income_table().levy(5_000.0), 500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_spanning_two_brackets() {
        let expected = 7_010.0 * 0.10 + (8_000.0 - 7_010.0) * 0.14;
        assert_abs_diff_eq!(income_table().levy(8_000.0), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_monotonic_and_continuous() {
        let table = income_table();
        let mut prev_levy = 0.0;
        for i in 0..700 {
            let amount = i as f64 * 100.0;
            let levy = table.levy(amount);
            assert!(levy >= prev_levy, "levy decreased at amount {}", amount);
            // Continuity: adjacent evaluations never jump by more than the
            // top marginal rate times the step
            assert!(levy - prev_levy <= 100.0 * 0.50 + 1e-9);
            prev_levy = levy;
        }
    }

    #[test]
    fn test_marginal_rate() {
        let table = income_table();
        assert_eq!(table.marginal_rate(0.0), 0.10);
        assert_eq!(table.marginal_rate(5_000.0), 0.10);
        assert_eq!(table.marginal_rate(8_000.0), 0.14);
        assert_eq!(table.marginal_rate(100_000.0), 0.50);
    }

    #[test]
    fn test_two_tier_cap() {
        // NI-style: 0.4% to 7,522, 7% to 48,281, capped above
        let ni = BracketTable::two_tier(7_522.0, 48_281.0, 0.004, 0.07).unwrap();

        assert_abs_diff_eq!(ni.levy(5_000.0), 5_000.0 * 0.004, epsilon = 1e-9);
        assert_abs_diff_eq!(
            ni.levy(10_000.0),
            7_522.0 * 0.004 + (10_000.0 - 7_522.0) * 0.07,
            epsilon = 1e-9
        );
        // Above the ceiling the levy is flat
        assert_abs_diff_eq!(ni.levy(80_000.0), ni.levy(48_281.0), epsilon = 1e-9);
    }

    #[test]
    fn test_negative_amount_clamped() {
        assert_eq!(income_table().levy(-1_000.0), 0.0);
    }

    #[test]
    fn test_rejects_non_monotonic() {
        let result = BracketTable::from_pairs(&[(5_000.0, 0.1), (4_000.0, 0.2), (f64::INFINITY, 0.3)]);
        assert!(matches!(result, Err(EngineError::NonMonotonicBrackets { index: 1, .. })));
    }

    #[test]
    fn test_rejects_bounded_top() {
        let result = BracketTable::from_pairs(&[(5_000.0, 0.1), (10_000.0, 0.2)]);
        assert!(matches!(result, Err(EngineError::UnboundedBracketMissing)));
    }

    #[test]
    fn test_rejects_bad_rate() {
        let result = BracketTable::from_pairs(&[(5_000.0, 1.5), (f64::INFINITY, 0.2)]);
        assert!(matches!(result, Err(EngineError::RateOutOfRange { index: 0, .. })));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(BracketTable::new(vec![]), Err(EngineError::EmptyBracketTable)));
    }
}
