//! Track aggregation and regulatory checks
//!
//! Combines independent track schedules into unified totals and evaluates
//! lending-policy ratios as pure predicates returning structured findings.

use serde::{Deserialize, Serialize};

use crate::mortgage::track::AmortizedTrack;

/// Unified totals across a track set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub total_principal: f64,
    pub total_paid: f64,
    pub total_interest: f64,

    /// Combined payment per month (1-indexed by position). Tracks whose
    /// schedule has already ended contribute zero.
    pub per_month_payment: Vec<f64>,

    pub first_month_payment: f64,
    pub max_month_payment: f64,
}

/// Combine N independent tracks into unified monthly and lifetime totals.
pub fn aggregate(tracks: &[AmortizedTrack]) -> AggregateResult {
    let total_principal = tracks.iter().map(|t| t.track.principal).sum();
    let total_paid = tracks.iter().map(|t| t.result.total_paid).sum();
    let total_interest = tracks.iter().map(|t| t.result.total_interest).sum();

    let max_months = tracks
        .iter()
        .map(|t| t.result.schedule.len())
        .max()
        .unwrap_or(0);

    let mut per_month_payment = Vec::with_capacity(max_months);
    for m in 0..max_months {
        let total: f64 = tracks
            .iter()
            .filter_map(|t| t.result.schedule.get(m))
            .map(|e| e.payment)
            .sum();
        per_month_payment.push(total);
    }

    let first_month_payment = per_month_payment.first().copied().unwrap_or(0.0);
    let max_month_payment = per_month_payment.iter().copied().fold(0.0, f64::max);

    AggregateResult {
        total_principal,
        total_paid,
        total_interest,
        per_month_payment,
        first_month_payment,
        max_month_payment,
    }
}

/// Regulatory ratio thresholds. Values are policy configuration, not law
/// baked into the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LendingPolicy {
    /// Maximum share of the loan allowed in variable-without-cap tracks
    pub max_variable_share: f64,

    /// Maximum first-month payment as a fraction of net income
    pub max_payment_to_income: f64,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            max_variable_share: 2.0 / 3.0,
            max_payment_to_income: 0.40,
        }
    }
}

/// A breached lending-policy ratio, with the observed value and the limit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RegulatoryFinding {
    /// Variable-without-cap tracks exceed the allowed share of the loan
    VariableShareExceeded { share: f64, limit: f64 },

    /// First-month combined payment exceeds the affordability ratio
    PaymentToIncomeExceeded { ratio: f64, limit: f64 },
}

/// Evaluate the lending-policy ratios over a track set.
///
/// `net_income` enables the payment-to-income check when known; pass `None`
/// to skip it. Pure: same inputs, same findings.
pub fn check_regulatory(
    tracks: &[AmortizedTrack],
    net_income: Option<f64>,
    policy: &LendingPolicy,
) -> Vec<RegulatoryFinding> {
    let mut findings = Vec::new();

    let total: f64 = tracks.iter().map(|t| t.track.principal).sum();
    if total > 0.0 {
        let variable: f64 = tracks
            .iter()
            .filter(|t| t.kind.is_variable_uncapped())
            .map(|t| t.track.principal)
            .sum();
        let share = variable / total;
        if share > policy.max_variable_share {
            findings.push(RegulatoryFinding::VariableShareExceeded {
                share,
                limit: policy.max_variable_share,
            });
        }
    }

    if let Some(income) = net_income.filter(|i| *i > 0.0) {
        let first_payment: f64 = tracks.iter().map(|t| t.result.first_payment).sum();
        let ratio = first_payment / income;
        if ratio > policy.max_payment_to_income {
            findings.push(RegulatoryFinding::PaymentToIncomeExceeded {
                ratio,
                limit: policy.max_payment_to_income,
            });
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mortgage::engine::amortize;
    use crate::mortgage::track::{Track, TrackKind};
    use approx::assert_abs_diff_eq;

    fn amortized(kind: TrackKind, principal: f64, term_months: u32, rate: f64) -> AmortizedTrack {
        let track = Track::new(principal, term_months, rate, kind.indexation(), 0).unwrap();
        let result = amortize(&track, 0.0);
        AmortizedTrack { kind, track, result }
    }

    #[test]
    fn test_aggregate_totals() {
        let tracks = vec![
            amortized(TrackKind::FixedUnlinked, 300_000.0, 240, 4.0),
            amortized(TrackKind::Prime, 200_000.0, 120, 5.5),
        ];
        let agg = aggregate(&tracks);

        assert_abs_diff_eq!(agg.total_principal, 500_000.0, epsilon = 1e-9);
        assert_eq!(agg.per_month_payment.len(), 240);
        assert_abs_diff_eq!(
            agg.total_paid,
            tracks[0].result.total_paid + tracks[1].result.total_paid,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_shorter_track_contributes_zero_after_completion() {
        let long = amortized(TrackKind::FixedUnlinked, 300_000.0, 240, 4.0);
        let short = amortized(TrackKind::Prime, 200_000.0, 120, 5.5);
        let long_only = aggregate(std::slice::from_ref(&long));
        let agg = aggregate(&[long.clone(), short]);

        // After month 120 only the long track pays
        assert_abs_diff_eq!(
            agg.per_month_payment[150],
            long_only.per_month_payment[150],
            epsilon = 1e-9
        );
        assert!(agg.per_month_payment[0] > agg.per_month_payment[150]);
    }

    #[test]
    fn test_aggregate_empty() {
        let agg = aggregate(&[]);
        assert_eq!(agg.total_principal, 0.0);
        assert!(agg.per_month_payment.is_empty());
        assert_eq!(agg.first_month_payment, 0.0);
    }

    #[test]
    fn test_variable_share_finding() {
        let tracks = vec![
            amortized(TrackKind::Prime, 700_000.0, 240, 6.0),
            amortized(TrackKind::FixedUnlinked, 300_000.0, 240, 4.0),
        ];
        let findings = check_regulatory(&tracks, None, &LendingPolicy::default());

        assert_eq!(findings.len(), 1);
        match findings[0] {
            RegulatoryFinding::VariableShareExceeded { share, limit } => {
                assert_abs_diff_eq!(share, 0.7, epsilon = 1e-9);
                assert_abs_diff_eq!(limit, 2.0 / 3.0, epsilon = 1e-9);
            }
            other => panic!("unexpected finding: {:?}", other),
        }
    }

    #[test]
    fn test_payment_to_income_finding() {
        let tracks = vec![amortized(TrackKind::FixedUnlinked, 1_000_000.0, 120, 5.0)];
        let first = tracks[0].result.first_payment;

        // Income low enough that the ratio breaches 40%
        let findings = check_regulatory(&tracks, Some(first * 2.0), &LendingPolicy::default());
        assert!(matches!(
            findings.as_slice(),
            [RegulatoryFinding::PaymentToIncomeExceeded { .. }]
        ));

        // Comfortable income: no findings
        let findings = check_regulatory(&tracks, Some(first * 10.0), &LendingPolicy::default());
        assert!(findings.is_empty());

        // Unknown income: check skipped
        let findings = check_regulatory(&tracks, None, &LendingPolicy::default());
        assert!(findings.is_empty());
    }

    #[test]
    fn test_thresholds_are_configuration() {
        let tracks = vec![amortized(TrackKind::Prime, 500_000.0, 240, 6.0)];
        let strict = LendingPolicy {
            max_variable_share: 0.25,
            max_payment_to_income: 0.40,
        };
        let findings = check_regulatory(&tracks, None, &strict);
        assert_eq!(findings.len(), 1);
    }
}
