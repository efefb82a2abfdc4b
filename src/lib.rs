//! Fincast - Deterministic financial projection engine for household decisions
//!
//! This library provides:
//! - Multi-track mortgage amortization (prime, fixed, CPI-linked) with grace periods
//! - Early-repayment simulation (extra monthly payments and lump sums)
//! - Israeli tax calculations: income tax brackets, salary decomposition, purchase tax
//! - Rent-vs-buy wealth comparison over a multi-year horizon
//! - Pension accumulation projection with annuitization and adequacy checks
//! - One-parameter sensitivity analysis across all of the above

pub mod error;
pub mod insights;
pub mod mortgage;
pub mod scenario;
pub mod sensitivity;
pub mod tax;
pub mod wealth;

// Re-export commonly used types
pub use error::EngineError;
pub use mortgage::{AmortizedTrack, Track, TrackKind};
pub use scenario::{MortgageReport, PensionReport, SalaryReport, ScenarioRunner, TrackSpec};
pub use sensitivity::SensitivityResult;
pub use tax::{BracketTable, SalaryBreakdown, SalaryInput, TaxConfig};
pub use wealth::{PensionInput, RentVsBuyInput};
