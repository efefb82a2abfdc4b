//! Engine error types
//!
//! Invalid-domain inputs that would silently misrepresent intent are rejected
//! here; degenerate-but-valid inputs (zero rate, zero horizon) never error.

use thiserror::Error;

/// Contract violations detected at construction or load time
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("bracket table must contain at least one bracket")]
    EmptyBracketTable,

    #[error("bracket {index} upper limit {limit} does not increase on the previous bracket")]
    NonMonotonicBrackets { index: usize, limit: f64 },

    #[error("last bracket must have an infinite upper limit to cover all amounts")]
    UnboundedBracketMissing,

    #[error("bracket {index} marginal rate {rate} is outside [0, 1]")]
    RateOutOfRange { index: usize, rate: f64 },

    #[error("loan term must be at least one month")]
    ZeroTerm,

    #[error("grace period of {grace_months} months must be shorter than the {term_months}-month term")]
    GraceExceedsTerm { grace_months: u32, term_months: u32 },

    #[error("failed to open {table} table: {source}")]
    TableOpen {
        table: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load {table} table: {source}")]
    TableLoad {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{table} table row {row}: {message}")]
    TableRow {
        table: &'static str,
        row: usize,
        message: String,
    },
}
