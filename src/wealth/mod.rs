//! Long-horizon wealth projections

pub mod pension;
pub mod rent_vs_buy;

pub use pension::{
    annuitize, project, AnnuityAssumptions, PensionInput, PensionProjection, PensionYear,
    RetirementOutlook,
};
pub use rent_vs_buy::{
    simulate, OwnerCosts, OwnerYear, RentVsBuyInput, RentVsBuyOutcome, RenterYear,
};
