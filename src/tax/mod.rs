//! Progressive levies and salary decomposition

pub mod brackets;
pub mod loader;
pub mod salary;
pub mod tables;

pub use brackets::{Bracket, BracketTable};
pub use salary::{decompose, SalaryBreakdown, SalaryInput};
pub use tables::{EmploymentMode, TaxConfig};
