//! Early repayment simulation
//!
//! Re-amortizes a track set under extra recurring and one-time payments and
//! reports the interest and time saved against the unmodified baseline.
//! Extra money is allocated pro-rata by principal share; each track is
//! re-run month by month with the remaining-term annuity re-derived every
//! month, since extra payments change the principal trajectory.
//!
//! The re-run treats every track as a nominal, grace-free loan: it starts
//! from the original principal and applies no indexation, so for CPI-linked
//! tracks the reported saving also includes indexation interest the re-run
//! never accrues.

use serde::{Deserialize, Serialize};

use crate::mortgage::engine::annuity_payment;
use crate::mortgage::track::AmortizedTrack;

/// Balance below this is considered paid off
const PAYOFF_EPSILON: f64 = 0.5;

/// Outcome of an early-repayment simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarlyRepaymentOutcome {
    /// Baseline total interest minus re-simulated total interest
    pub interest_saved: f64,

    /// Baseline payoff month minus re-simulated payoff month
    pub months_saved: u32,

    pub new_total_interest: f64,
    pub new_total_months: u32,
}

/// Simulate extra payments across a track set.
///
/// `extra_monthly` is added to every month's payment; `lump_sum` is applied
/// once, at `lump_sum_month` (1-indexed). Both clamp to zero if negative.
/// Each track's loop is bounded by its original term, so the simulation
/// always terminates.
pub fn simulate_early_repayment(
    tracks: &[AmortizedTrack],
    extra_monthly: f64,
    lump_sum: f64,
    lump_sum_month: u32,
) -> EarlyRepaymentOutcome {
    let extra_monthly = extra_monthly.max(0.0);
    let lump_sum = lump_sum.max(0.0);

    let baseline_interest: f64 = tracks.iter().map(|t| t.result.total_interest).sum();
    let baseline_months = tracks
        .iter()
        .map(|t| t.result.schedule.len() as u32)
        .max()
        .unwrap_or(0);
    let total_principal: f64 = tracks.iter().map(|t| t.track.principal).sum();

    let mut new_total_interest = 0.0;
    let mut new_total_months = 0u32;

    for amortized in tracks {
        let share = if total_principal > 0.0 {
            amortized.track.principal / total_principal
        } else {
            0.0
        };
        let track_extra = extra_monthly * share;
        let track_lump = lump_sum * share;

        let term = amortized.result.schedule.len() as u32;
        let monthly_rate = amortized.track.monthly_rate();
        let mut balance = amortized.track.principal;
        let mut interest = 0.0;
        let mut month = 0u32;

        while balance > PAYOFF_EPSILON && month < term {
            month += 1;
            if month == lump_sum_month && track_lump > 0.0 {
                balance = (balance - track_lump).max(0.0);
            }
            let interest_part = balance * monthly_rate;
            let remaining = term - month + 1;
            let payment = annuity_payment(balance, monthly_rate, remaining) + track_extra;
            let principal_part = payment - interest_part;
            interest += interest_part;
            balance = (balance - principal_part).max(0.0);
        }

        new_total_interest += interest;
        new_total_months = new_total_months.max(month);
    }

    EarlyRepaymentOutcome {
        interest_saved: baseline_interest - new_total_interest,
        months_saved: baseline_months.saturating_sub(new_total_months),
        new_total_interest,
        new_total_months,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mortgage::engine::amortize;
    use crate::mortgage::track::{Track, TrackKind};
    use approx::assert_abs_diff_eq;

    fn track_set() -> Vec<AmortizedTrack> {
        [(400_000.0, 240, 4.5), (200_000.0, 180, 5.5)]
            .iter()
            .map(|&(principal, term, rate)| {
                let track = Track::standard(principal, term, rate).unwrap();
                let result = amortize(&track, 0.0);
                AmortizedTrack {
                    kind: TrackKind::FixedUnlinked,
                    track,
                    result,
                }
            })
            .collect()
    }

    #[test]
    fn test_extra_monthly_saves_interest_and_time() {
        let tracks = track_set();
        let outcome = simulate_early_repayment(&tracks, 1_000.0, 0.0, 12);

        assert!(outcome.interest_saved > 0.0);
        assert!(outcome.months_saved > 0);
        assert!(outcome.new_total_months < 240);
    }

    #[test]
    fn test_lump_sum_saves_interest_not_time() {
        let tracks = track_set();
        let outcome = simulate_early_repayment(&tracks, 0.0, 100_000.0, 12);

        assert!(outcome.interest_saved > 0.0);
        // With no extra monthly payment the annuity is re-derived over the
        // full remaining term each month, so the payment shrinks but the
        // loan still clears at the original final month
        assert_eq!(outcome.months_saved, 0);
        assert_eq!(outcome.new_total_months, 240);
    }

    #[test]
    fn test_lump_sum_with_extra_monthly_saves_time() {
        let tracks = track_set();
        let outcome = simulate_early_repayment(&tracks, 500.0, 100_000.0, 12);

        assert!(outcome.interest_saved > 0.0);
        assert!(outcome.months_saved > 0);
        assert!(outcome.new_total_months < 240);
    }

    #[test]
    fn test_zero_inputs_zero_savings() {
        let tracks = track_set();
        let outcome = simulate_early_repayment(&tracks, 0.0, 0.0, 12);

        // Re-deriving the annuity monthly reproduces the baseline schedule
        assert_abs_diff_eq!(outcome.interest_saved, 0.0, epsilon = 1.0);
        assert_eq!(outcome.months_saved, 0);
    }

    #[test]
    fn test_payoff_time_monotone_in_extra_payment() {
        let tracks = track_set();
        let mut prev_months = u32::MAX;
        for extra in [0.0, 250.0, 500.0, 1_000.0, 2_000.0, 4_000.0] {
            let outcome = simulate_early_repayment(&tracks, extra, 0.0, 12);
            assert!(
                outcome.new_total_months <= prev_months,
                "payoff month grew at extra={}",
                extra
            );
            prev_months = outcome.new_total_months;
        }
    }

    #[test]
    fn test_bounded_by_original_term() {
        let tracks = track_set();
        // Zero-rate degenerate extra: loop must still terminate within term
        let outcome = simulate_early_repayment(&tracks, 0.0, 0.0, 9999);
        assert!(outcome.new_total_months <= 240);
    }

    #[test]
    fn test_negative_inputs_clamped() {
        let tracks = track_set();
        let outcome = simulate_early_repayment(&tracks, -100.0, -5_000.0, 12);
        assert_abs_diff_eq!(outcome.interest_saved, 0.0, epsilon = 1.0);
    }
}
