//! Year-specific tax configuration
//!
//! All tables that change with the tax year live here and are passed
//! explicitly into every calculation; nothing reads them from process-wide
//! state. `default_2026` is the built-in snapshot; future years load from
//! CSV via [`crate::tax::loader`] or are constructed directly.

use serde::{Deserialize, Serialize};

use super::brackets::BracketTable;

/// Employee / self-employed split for the national-insurance style levies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentMode {
    Employee,
    SelfEmployed,
}

/// Complete injectable tax configuration for one calendar year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Calendar year these tables describe
    pub year: u16,

    /// Monthly progressive income tax brackets
    pub income_tax: BracketTable,

    /// Purchase tax tiers, sole-residence buyer
    pub purchase_tax_single: BracketTable,

    /// Purchase tax tiers, additional-residence buyer
    pub purchase_tax_additional: BracketTable,

    /// National insurance, employee rates (two-tier, capped)
    pub ni_employee: BracketTable,

    /// National insurance, self-employed rates
    pub ni_self_employed: BracketTable,

    /// Health insurance, employee rates
    pub health_employee: BracketTable,

    /// Health insurance, self-employed rates
    pub health_self_employed: BracketTable,

    /// Monthly value of one tax credit point
    pub credit_point_value: f64,

    /// Monthly salary ceiling recognized for the pension tax deduction
    pub pension_deductible_ceiling: f64,

    /// Self-employed pension contribution percentage recognized for deduction
    pub self_employed_pension_cap_pct: f64,
}

impl TaxConfig {
    /// Built-in 2026 tables.
    pub fn default_2026() -> Self {
        let table = |pairs: &[(f64, f64)]| {
            BracketTable::from_pairs(pairs).expect("built-in table is valid")
        };

        Self {
            year: 2026,
            income_tax: table(&[
                (7_010.0, 0.10),
                (10_060.0, 0.14),
                (19_000.0, 0.20),
                (25_100.0, 0.31),
                (46_690.0, 0.35),
                (60_130.0, 0.47),
                (f64::INFINITY, 0.50),
            ]),
            purchase_tax_single: table(&[
                (1_919_155.0, 0.0),
                (2_276_360.0, 0.035),
                (5_872_725.0, 0.05),
                (19_575_710.0, 0.08),
                (f64::INFINITY, 0.10),
            ]),
            purchase_tax_additional: table(&[
                (6_055_070.0, 0.08),
                (f64::INFINITY, 0.10),
            ]),
            ni_employee: Self::capped(NI_THRESHOLD, NI_CEILING, 0.004, 0.07),
            ni_self_employed: Self::capped(NI_THRESHOLD, NI_CEILING, 0.0287, 0.1283),
            health_employee: Self::capped(NI_THRESHOLD, NI_CEILING, 0.031, 0.05),
            health_self_employed: Self::capped(NI_THRESHOLD, NI_CEILING, 0.031, 0.05),
            credit_point_value: 242.0,
            pension_deductible_ceiling: 12_420.0,
            self_employed_pension_cap_pct: 11.0,
        }
    }

    fn capped(threshold: f64, ceiling: f64, lower: f64, upper: f64) -> BracketTable {
        BracketTable::two_tier(threshold, ceiling, lower, upper)
            .expect("built-in table is valid")
    }

    /// Purchase tax tiers for a buyer.
    pub fn purchase_tax(&self, sole_residence: bool) -> &BracketTable {
        if sole_residence {
            &self.purchase_tax_single
        } else {
            &self.purchase_tax_additional
        }
    }

    /// National insurance table for an employment mode.
    pub fn ni(&self, mode: EmploymentMode) -> &BracketTable {
        match mode {
            EmploymentMode::Employee => &self.ni_employee,
            EmploymentMode::SelfEmployed => &self.ni_self_employed,
        }
    }

    /// Health insurance table for an employment mode.
    pub fn health(&self, mode: EmploymentMode) -> &BracketTable {
        match mode {
            EmploymentMode::Employee => &self.health_employee,
            EmploymentMode::SelfEmployed => &self.health_self_employed,
        }
    }

    /// Build a config for a future tax year from loaded yearly tables,
    /// keeping the slow-changing NI/health tiers and scalar constants from
    /// the built-in snapshot.
    pub fn with_yearly_tables(
        year: u16,
        income_tax: BracketTable,
        purchase_tax_single: BracketTable,
        purchase_tax_additional: BracketTable,
    ) -> Self {
        Self {
            year,
            income_tax,
            purchase_tax_single,
            purchase_tax_additional,
            ..Self::default_2026()
        }
    }
}

/// 2026 national-insurance thresholds (monthly, based on the average wage)
const NI_THRESHOLD: f64 = 7_522.0;
const NI_CEILING: f64 = 48_281.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_2026_levies() {
        let config = TaxConfig::default_2026();

        assert_eq!(config.year, 2026);
        assert_eq!(config.income_tax.levy(0.0), 0.0);
        // Purchase price under the zero-rate tier: no tax for a sole residence
        assert_eq!(config.purchase_tax(true).levy(1_500_000.0), 0.0);
        // Additional residence pays from the first shekel
        assert!(config.purchase_tax(false).levy(1_500_000.0) > 0.0);
    }

    #[test]
    fn test_with_yearly_tables_overrides_brackets() {
        let flat = |rate: f64| {
            BracketTable::from_pairs(&[(f64::INFINITY, rate)]).unwrap()
        };
        let config =
            TaxConfig::with_yearly_tables(2027, flat(0.25), flat(0.0), flat(0.08));

        assert_eq!(config.year, 2027);
        assert_eq!(config.income_tax.levy(1_000.0), 250.0);
        // Slow-changing pieces carry over from the built-in snapshot
        assert_eq!(config.credit_point_value, 242.0);
        assert!(config.ni(EmploymentMode::Employee).levy(10_000.0) > 0.0);
    }

    #[test]
    fn test_self_employed_ni_higher() {
        let config = TaxConfig::default_2026();
        let gross = 20_000.0;
        assert!(
            config.ni(EmploymentMode::SelfEmployed).levy(gross)
                > config.ni(EmploymentMode::Employee).levy(gross)
        );
    }
}
