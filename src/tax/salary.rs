//! Gross-to-net salary decomposition
//!
//! Turns a gross monthly salary plus contribution percentages into a full
//! payslip breakdown: income tax (after credit points), national insurance,
//! health insurance, pension and study-fund contributions, employer cost and
//! effective/marginal rates. All tables come from the injected [`TaxConfig`].

use serde::{Deserialize, Serialize};

use super::tables::{EmploymentMode, TaxConfig};

/// Salary calculation inputs. Percentages are in percent units (6.0 == 6%).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryInput {
    /// Gross monthly salary
    pub gross: f64,

    pub mode: EmploymentMode,

    /// Employee pension contribution percentage
    pub pension_employee_pct: f64,

    /// Employer pension contribution percentage (ignored when self-employed)
    pub pension_employer_pct: f64,

    /// Employee study-fund contribution percentage
    pub study_fund_employee_pct: f64,

    /// Employer study-fund contribution percentage (ignored when self-employed)
    pub study_fund_employer_pct: f64,

    /// Tax credit points
    pub credit_points: f64,

    /// Monthly travel reimbursement, paid net
    pub travel_allowance: f64,

    /// Taxable value of a company car, added to taxable income
    pub company_car_value: f64,
}

impl SalaryInput {
    /// Minimal input: gross salary only, employee mode, no contributions.
    pub fn gross_only(gross: f64) -> Self {
        Self {
            gross,
            mode: EmploymentMode::Employee,
            pension_employee_pct: 0.0,
            pension_employer_pct: 0.0,
            study_fund_employee_pct: 0.0,
            study_fund_employer_pct: 0.0,
            credit_points: 0.0,
            travel_allowance: 0.0,
            company_car_value: 0.0,
        }
    }
}

/// Full payslip breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    pub gross: f64,
    pub taxable_income: f64,
    pub pension_tax_deduction: f64,

    pub income_tax_before_credit: f64,
    pub credit_amount: f64,
    pub income_tax: f64,
    pub national_insurance: f64,
    pub health_insurance: f64,

    pub pension_employee: f64,
    pub pension_employer: f64,
    pub study_fund_employee: f64,
    pub study_fund_employer: f64,

    pub total_deductions: f64,
    pub net_salary: f64,

    /// Gross plus employer contributions
    pub employer_cost: f64,

    /// Employer pension + study-fund contributions
    pub total_benefits: f64,

    /// Net salary plus employer savings contributions (employee mode only)
    pub real_value: f64,

    /// Total deductions as a percentage of gross
    pub effective_rate_pct: f64,

    /// Marginal income tax rate at the taxable income
    pub marginal_rate: f64,
}

/// Decompose a gross salary into the full payslip.
///
/// Negative money inputs are clamped to zero; a zero gross produces an
/// all-zero breakdown rather than an error.
pub fn decompose(input: &SalaryInput, config: &TaxConfig) -> SalaryBreakdown {
    let gross = input.gross.max(0.0);
    let is_employee = input.mode == EmploymentMode::Employee;

    let pension_employee = gross * (input.pension_employee_pct / 100.0);
    let pension_employer = if is_employee {
        gross * (input.pension_employer_pct / 100.0)
    } else {
        0.0
    };
    let study_fund_employee = gross * (input.study_fund_employee_pct / 100.0);
    let study_fund_employer = if is_employee {
        gross * (input.study_fund_employer_pct / 100.0)
    } else {
        0.0
    };

    // Pension contributions reduce taxable income, up to the recognized
    // salary ceiling; self-employed deduction percentage is itself capped.
    let gross_for_tax = gross + input.company_car_value.max(0.0);
    let recognized_salary = gross.min(config.pension_deductible_ceiling);
    let deductible_pct = if is_employee {
        input.pension_employee_pct
    } else {
        input.pension_employee_pct.min(config.self_employed_pension_cap_pct)
    };
    let pension_tax_deduction = recognized_salary * (deductible_pct / 100.0);
    let taxable_income = (gross_for_tax - pension_tax_deduction).max(0.0);

    let income_tax_before_credit = config.income_tax.levy(taxable_income);
    let credit_amount = input.credit_points.max(0.0) * config.credit_point_value;
    let income_tax = (income_tax_before_credit - credit_amount).max(0.0);

    let national_insurance = config.ni(input.mode).levy(gross);
    let health_insurance = config.health(input.mode).levy(gross);

    let total_deductions =
        income_tax + national_insurance + health_insurance + pension_employee + study_fund_employee;
    let net_salary = gross - total_deductions + input.travel_allowance.max(0.0);

    let total_benefits = pension_employer + study_fund_employer;
    let employer_cost = gross + total_benefits;
    let real_value = if is_employee {
        net_salary + total_benefits
    } else {
        net_salary
    };

    let effective_rate_pct = if gross > 0.0 {
        total_deductions / gross * 100.0
    } else {
        0.0
    };
    let marginal_rate = config.income_tax.marginal_rate(taxable_income);

    SalaryBreakdown {
        gross,
        taxable_income,
        pension_tax_deduction,
        income_tax_before_credit,
        credit_amount,
        income_tax,
        national_insurance,
        health_insurance,
        pension_employee,
        pension_employer,
        study_fund_employee,
        study_fund_employer,
        total_deductions,
        net_salary,
        employer_cost,
        total_benefits,
        real_value,
        effective_rate_pct,
        marginal_rate,
    }
}
