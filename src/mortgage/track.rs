//! Loan track domain types
//!
//! A track is one independently-amortizing slice of a mortgage with its own
//! rate, term, indexation policy and optional grace period. Tracks are
//! immutable once constructed; every simulation recomputes from scratch.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Balance indexation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Indexation {
    /// Nominal balance, untouched by the reference rate
    None,

    /// Balance grows monthly by the compounded equivalent of an annual
    /// reference rate (CPI linkage)
    MonthlyLinkedToAnnualRate,
}

/// Commercial track classification, used by the regulatory checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackKind {
    /// Prime-rate linked, variable without a cap
    Prime,
    FixedUnlinked,
    FixedCpiLinked,
    VariableUnlinked,
    VariableCpiLinked,
}

impl TrackKind {
    /// Whether this track floats without a rate cap (the regulatory
    /// variable-share limit applies to these).
    pub fn is_variable_uncapped(&self) -> bool {
        matches!(self, TrackKind::Prime)
    }

    /// Indexation policy implied by the track kind.
    pub fn indexation(&self) -> Indexation {
        match self {
            TrackKind::FixedCpiLinked | TrackKind::VariableCpiLinked => {
                Indexation::MonthlyLinkedToAnnualRate
            }
            _ => Indexation::None,
        }
    }
}

/// One loan track. Construct through [`Track::new`], which enforces the
/// domain invariants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Loan amount, >= 0
    pub principal: f64,

    /// Term in months, >= 1
    pub term_months: u32,

    /// Annual nominal rate in percent units (3.5 == 3.5%)
    pub annual_rate: f64,

    pub indexation: Indexation,

    /// Interest-only months at the start of the term, < term_months
    pub grace_months: u32,
}

impl Track {
    /// Build a validated track.
    ///
    /// Negative principal or rate clamp to zero. A zero term or a grace
    /// period covering the whole term signal a configuration bug and are
    /// rejected.
    pub fn new(
        principal: f64,
        term_months: u32,
        annual_rate: f64,
        indexation: Indexation,
        grace_months: u32,
    ) -> Result<Self, EngineError> {
        if term_months == 0 {
            return Err(EngineError::ZeroTerm);
        }
        if grace_months >= term_months {
            return Err(EngineError::GraceExceedsTerm {
                grace_months,
                term_months,
            });
        }
        Ok(Self {
            principal: principal.max(0.0),
            term_months,
            annual_rate: annual_rate.max(0.0),
            indexation,
            grace_months,
        })
    }

    /// Standard fully-amortizing track with no grace period.
    pub fn standard(principal: f64, term_months: u32, annual_rate: f64) -> Result<Self, EngineError> {
        Self::new(principal, term_months, annual_rate, Indexation::None, 0)
    }

    /// Monthly periodic rate as a fraction.
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 100.0 / 12.0
    }
}

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-indexed month
    pub month: u32,
    pub payment: f64,
    pub principal_portion: f64,
    pub interest_portion: f64,
    /// Outstanding balance after this month's payment, clamped to >= 0
    pub ending_balance: f64,
}

/// Full schedule plus aggregates, computed once at amortization time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub schedule: Vec<ScheduleEntry>,
    pub total_paid: f64,
    pub total_interest: f64,
    pub first_payment: f64,
    pub last_payment: f64,
}

impl AmortizationResult {
    /// Build from a complete schedule, deriving the cached aggregates.
    pub fn from_schedule(schedule: Vec<ScheduleEntry>) -> Self {
        let total_paid = schedule.iter().map(|e| e.payment).sum();
        let total_interest = schedule.iter().map(|e| e.interest_portion).sum();
        let first_payment = schedule.first().map(|e| e.payment).unwrap_or(0.0);
        let last_payment = schedule.last().map(|e| e.payment).unwrap_or(0.0);
        Self {
            schedule,
            total_paid,
            total_interest,
            first_payment,
            last_payment,
        }
    }
}

/// A track paired with its amortization result and commercial kind. This is
/// the unit the aggregator, regulatory checks and early-repayment simulator
/// consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizedTrack {
    pub kind: TrackKind,
    pub track: Track,
    pub result: AmortizationResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_term() {
        let result = Track::new(100_000.0, 0, 5.0, Indexation::None, 0);
        assert!(matches!(result, Err(EngineError::ZeroTerm)));
    }

    #[test]
    fn test_rejects_grace_covering_term() {
        let result = Track::new(100_000.0, 12, 5.0, Indexation::None, 12);
        assert!(matches!(
            result,
            Err(EngineError::GraceExceedsTerm { grace_months: 12, term_months: 12 })
        ));
    }

    #[test]
    fn test_clamps_negative_inputs() {
        let track = Track::new(-5.0, 12, -1.0, Indexation::None, 0).unwrap();
        assert_eq!(track.principal, 0.0);
        assert_eq!(track.annual_rate, 0.0);
    }

    #[test]
    fn test_kind_classification() {
        assert!(TrackKind::Prime.is_variable_uncapped());
        assert!(!TrackKind::FixedCpiLinked.is_variable_uncapped());
        assert_eq!(
            TrackKind::VariableCpiLinked.indexation(),
            Indexation::MonthlyLinkedToAnnualRate
        );
        assert_eq!(TrackKind::Prime.indexation(), Indexation::None);
    }
}
