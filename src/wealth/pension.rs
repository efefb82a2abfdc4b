//! Pension accumulation projection
//!
//! Monthly-compounded contribution-and-return projection with annuitization
//! at the horizon. Salary is flat within a year and grows between years; the
//! annuitization of the final balance is a downstream pure function, not part
//! of the accumulation loop.

use serde::{Deserialize, Serialize};

use crate::mortgage::engine::annuity_payment;

/// Pension projection inputs. Rates and percentages are in percent units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PensionInput {
    /// Current gross monthly salary
    pub starting_salary: f64,

    /// Combined employee + employer contribution percentage of salary
    pub contribution_rate_pct: f64,

    /// Savings already accumulated
    pub initial_balance: f64,

    /// Expected annual return, percent
    pub annual_return_rate: f64,

    /// Annual salary growth, percent
    pub annual_salary_growth_rate: f64,

    /// Years until retirement
    pub years: u32,
}

/// One projected year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PensionYear {
    pub year: u32,
    /// Balance at year end
    pub balance: f64,
    /// Cumulative contributions including the initial balance
    pub contributions: f64,
    /// Investment growth to date (balance minus contributions)
    pub growth: f64,
}

/// Accumulation projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PensionProjection {
    pub timeline: Vec<PensionYear>,
    pub final_balance: f64,
    pub total_contributions: f64,
}

/// Project the accumulation phase.
pub fn project(input: &PensionInput) -> PensionProjection {
    let monthly_return = (1.0 + input.annual_return_rate.max(0.0) / 100.0).powf(1.0 / 12.0) - 1.0;

    let mut timeline = Vec::with_capacity(input.years as usize);
    let mut balance = input.initial_balance.max(0.0);
    let mut current_salary = input.starting_salary.max(0.0);
    let mut total_contributions = balance;

    for year in 1..=input.years {
        // Contribution is derived from this year's salary and held flat
        let monthly_contribution = current_salary * (input.contribution_rate_pct.max(0.0) / 100.0);
        for _ in 0..12 {
            balance *= 1.0 + monthly_return;
            balance += monthly_contribution;
        }
        total_contributions += monthly_contribution * 12.0;
        current_salary *= 1.0 + input.annual_salary_growth_rate / 100.0;

        timeline.push(PensionYear {
            year,
            balance,
            contributions: total_contributions,
            growth: balance - total_contributions,
        });
    }

    PensionProjection {
        timeline,
        final_balance: balance,
        total_contributions,
    }
}

/// Annuitization assumptions for converting a balance into a monthly pension
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnnuityAssumptions {
    /// Payout horizon in months
    pub payout_months: u32,

    /// Fraction of the accumulation-phase return assumed post-retirement
    pub return_haircut: f64,
}

impl Default for AnnuityAssumptions {
    fn default() -> Self {
        Self {
            payout_months: 240,
            return_haircut: 0.7,
        }
    }
}

/// Convert a final balance into a level monthly pension over the payout
/// horizon, at a reduced post-retirement return.
pub fn annuitize(final_balance: f64, annual_return_rate: f64, assumptions: &AnnuityAssumptions) -> f64 {
    if assumptions.payout_months == 0 {
        return 0.0;
    }
    let monthly_return = (1.0 + annual_return_rate.max(0.0) * assumptions.return_haircut / 100.0)
        .powf(1.0 / 12.0)
        - 1.0;
    annuity_payment(final_balance.max(0.0), monthly_return, assumptions.payout_months)
}

/// Retirement adequacy summary derived from a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementOutlook {
    pub monthly_pension: f64,

    /// Projected salary in the final working year
    pub last_salary: f64,

    /// Monthly pension as a percentage of the last salary
    pub replacement_ratio_pct: f64,

    /// The conventional 70%-of-salary target
    pub target_pension: f64,

    /// Target minus projected pension (positive means a shortfall)
    pub gap: f64,
}

/// Replacement-ratio target as a fraction of the last salary
const REPLACEMENT_TARGET: f64 = 0.70;

impl RetirementOutlook {
    /// Derive the outlook from a finished projection.
    pub fn from_projection(
        projection: &PensionProjection,
        input: &PensionInput,
        assumptions: &AnnuityAssumptions,
    ) -> Self {
        let monthly_pension =
            annuitize(projection.final_balance, input.annual_return_rate, assumptions);
        let last_salary = input.starting_salary.max(0.0)
            * (1.0 + input.annual_salary_growth_rate / 100.0).powi(input.years as i32);
        let replacement_ratio_pct = if last_salary > 0.0 {
            monthly_pension / last_salary * 100.0
        } else {
            0.0
        };
        let target_pension = last_salary * REPLACEMENT_TARGET;

        Self {
            monthly_pension,
            last_salary,
            replacement_ratio_pct,
            target_pension,
            gap: target_pension - monthly_pension,
        }
    }
}
