//! Multi-track mortgage amortization

pub mod aggregate;
pub mod early_repayment;
pub mod engine;
pub mod track;

pub use aggregate::{aggregate, check_regulatory, AggregateResult, LendingPolicy, RegulatoryFinding};
pub use early_repayment::{simulate_early_repayment, EarlyRepaymentOutcome};
pub use engine::{amortize, annuity_payment};
pub use track::{AmortizationResult, AmortizedTrack, Indexation, ScheduleEntry, Track, TrackKind};
