//! Rent-vs-buy wealth comparison
//!
//! Runs two parallel year-by-year wealth trajectories under shared macro
//! assumptions: the owner's property equity net of the mortgage balance, and
//! the renter's invested-savings portfolio fed by the monthly cash-flow
//! difference between owning and renting.

use serde::{Deserialize, Serialize};

use crate::mortgage::engine::annuity_payment;
use crate::tax::brackets::BracketTable;

/// Recurring ownership costs
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OwnerCosts {
    /// Monthly municipal levy
    pub municipal_tax_monthly: f64,

    /// Monthly building maintenance fee
    pub building_fee_monthly: f64,

    /// Annual maintenance allowance as a fraction of current property value
    pub maintenance_rate: f64,
}

impl Default for OwnerCosts {
    fn default() -> Self {
        Self {
            municipal_tax_monthly: 0.0,
            building_fee_monthly: 0.0,
            maintenance_rate: 0.01,
        }
    }
}

/// Rent-vs-buy scenario inputs. Rates are in percent units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentVsBuyInput {
    pub purchase_price: f64,

    /// Cash the buyer puts down; the rest is mortgaged
    pub equity: f64,

    /// Annual mortgage rate, percent
    pub mortgage_annual_rate: f64,

    pub mortgage_term_years: u32,

    /// Annual property appreciation, percent
    pub appreciation_rate: f64,

    pub owner_costs: OwnerCosts,

    /// Whether this is the buyer's sole residence (selects the tax tier table)
    pub sole_residence: bool,

    /// Starting monthly rent
    pub rent: f64,

    /// Annual rent growth, percent
    pub rent_growth_rate: f64,

    /// Annual return on the renter's invested savings, percent
    pub investment_return_rate: f64,

    pub horizon_years: u32,
}

/// One year of the owner trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OwnerYear {
    pub year: u32,
    /// Property value minus outstanding mortgage balance
    pub net_wealth: f64,
    pub property_value: f64,
    pub mortgage_balance: f64,
}

/// One year of the renter trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenterYear {
    pub year: u32,
    /// Invested portfolio balance
    pub net_wealth: f64,
}

/// Both trajectories plus the up-front figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentVsBuyOutcome {
    pub owner_timeline: Vec<OwnerYear>,
    pub renter_timeline: Vec<RenterYear>,
    pub purchase_tax: f64,
    pub mortgage_amount: f64,
    pub monthly_mortgage: f64,
}

impl RentVsBuyOutcome {
    pub fn final_owner_wealth(&self) -> f64 {
        self.owner_timeline.last().map(|y| y.net_wealth).unwrap_or(0.0)
    }

    pub fn final_renter_wealth(&self) -> f64 {
        self.renter_timeline.last().map(|y| y.net_wealth).unwrap_or(0.0)
    }

    /// Final owner wealth minus final renter wealth
    pub fn wealth_gap(&self) -> f64 {
        self.final_owner_wealth() - self.final_renter_wealth()
    }
}

/// Run the comparison. `purchase_tax_tiers` is the progressive tier table
/// for the buyer's residence status, injected by the caller.
pub fn simulate(input: &RentVsBuyInput, purchase_tax_tiers: &BracketTable) -> RentVsBuyOutcome {
    let purchase_tax = purchase_tax_tiers.levy(input.purchase_price);
    let mortgage_amount = (input.purchase_price - input.equity).max(0.0);
    let monthly_rate = input.mortgage_annual_rate.max(0.0) / 100.0 / 12.0;
    let total_months = input.mortgage_term_years * 12;
    // Fixed annuity computed once up front; payments cease after the term
    let monthly_mortgage = if total_months > 0 {
        annuity_payment(mortgage_amount, monthly_rate, total_months)
    } else {
        0.0
    };

    let mut owner_timeline = Vec::with_capacity(input.horizon_years as usize);
    let mut renter_timeline = Vec::with_capacity(input.horizon_years as usize);

    let mut property_value = input.purchase_price;
    let mut mortgage_balance = mortgage_amount;
    let mut invested_balance = input.equity;
    let mut current_rent = input.rent;
    let monthly_return = input.investment_return_rate / 100.0 / 12.0;

    for year in 1..=input.horizon_years {
        let within_term = year * 12 <= total_months;

        // Owner path: a year of payments and costs, then appreciation
        let yearly_mortgage = if within_term { monthly_mortgage * 12.0 } else { 0.0 };
        let yearly_fixed_costs = (input.owner_costs.municipal_tax_monthly
            + input.owner_costs.building_fee_monthly)
            * 12.0;
        let yearly_maintenance = property_value * input.owner_costs.maintenance_rate;
        let yearly_owner_outlay = yearly_mortgage + yearly_fixed_costs + yearly_maintenance;

        property_value *= 1.0 + input.appreciation_rate / 100.0;

        if within_term {
            for _ in 0..12 {
                let interest = mortgage_balance * monthly_rate;
                let principal = monthly_mortgage - interest;
                mortgage_balance = (mortgage_balance - principal).max(0.0);
            }
        }

        owner_timeline.push(OwnerYear {
            year,
            net_wealth: property_value - mortgage_balance,
            property_value,
            mortgage_balance,
        });

        // Renter path: invest the monthly surplus over rent, if any
        let monthly_surplus = yearly_owner_outlay / 12.0 - current_rent;
        if monthly_surplus > 0.0 {
            for _ in 0..12 {
                invested_balance *= 1.0 + monthly_return;
                invested_balance += monthly_surplus;
            }
        } else {
            // Renting costs more this year: the portfolio only compounds
            invested_balance *= 1.0 + input.investment_return_rate / 100.0;
        }
        current_rent *= 1.0 + input.rent_growth_rate / 100.0;

        renter_timeline.push(RenterYear {
            year,
            net_wealth: invested_balance,
        });
    }

    RentVsBuyOutcome {
        owner_timeline,
        renter_timeline,
        purchase_tax,
        mortgage_amount,
        monthly_mortgage,
    }
}
