//! Amortization engine
//!
//! Produces a monthly schedule for a single track under three policies:
//! standard annuity, inflation-indexed annuity, and grace-period-prefixed
//! annuity. The non-indexed annuity payment is derived once at grace exit
//! and held level; the indexed payment is re-derived every month against the
//! freshly indexed balance and the shrinking remaining term, which is what
//! guarantees full amortization by the final month.

use crate::mortgage::track::{AmortizationResult, Indexation, ScheduleEntry, Track};

/// Level annuity payment amortizing `balance` over `remaining_months` at
/// periodic rate `monthly_rate`. Falls back to straight-line for a zero rate.
pub fn annuity_payment(balance: f64, monthly_rate: f64, remaining_months: u32) -> f64 {
    if remaining_months == 0 {
        return balance;
    }
    if monthly_rate > 0.0 {
        let growth = (1.0 + monthly_rate).powi(remaining_months as i32);
        balance * (monthly_rate * growth) / (growth - 1.0)
    } else {
        balance / remaining_months as f64
    }
}

/// Amortize one track.
///
/// `annual_indexation_rate` is the annual reference rate in percent units;
/// it only affects tracks with CPI linkage. For indexed tracks the balance
/// is grown by the compounded monthly equivalent *before* interest in every
/// month, grace months included, and the grace-exit payment is derived from
/// the already-indexed balance.
pub fn amortize(track: &Track, annual_indexation_rate: f64) -> AmortizationResult {
    let months = track.term_months;
    let monthly_rate = track.monthly_rate();
    let indexed = track.indexation == Indexation::MonthlyLinkedToAnnualRate;
    let monthly_index_factor = if indexed {
        (1.0 + annual_indexation_rate.max(0.0) / 100.0).powf(1.0 / 12.0)
    } else {
        1.0
    };

    let mut schedule = Vec::with_capacity(months as usize);
    let mut balance = track.principal;
    let mut post_grace_payment = 0.0;

    for m in 1..=months {
        if indexed {
            balance *= monthly_index_factor;
        }
        let interest_portion = balance * monthly_rate;

        let (payment, principal_portion) = if m <= track.grace_months {
            // Interest only; indexation still adjusts the balance above
            (interest_portion, 0.0)
        } else if indexed {
            // Indexed principal changes every month, so the level payment is
            // re-derived against the current balance and exact remaining term
            let remaining = months - m + 1;
            let payment = annuity_payment(balance, monthly_rate, remaining);
            (payment, payment - interest_portion)
        } else {
            if m == track.grace_months + 1 {
                let remaining = months - track.grace_months;
                post_grace_payment = annuity_payment(balance, monthly_rate, remaining);
            }
            (post_grace_payment, post_grace_payment - interest_portion)
        };

        balance -= principal_portion;
        schedule.push(ScheduleEntry {
            month: m,
            payment,
            principal_portion,
            interest_portion,
            ending_balance: balance.max(0.0),
        });
    }

    AmortizationResult::from_schedule(schedule)
}
