//! Heuristic findings over engine outputs
//!
//! Everything in this module is a deliberately approximate rule of thumb
//! layered on top of exact engine results, emitted as structured records for
//! a presentation layer to phrase. The one exception: tax-saving figures are
//! recomputed exactly through the bracket table rather than approximated by
//! a ratio.

use serde::{Deserialize, Serialize};

use crate::mortgage::engine::annuity_payment;
use crate::mortgage::track::{AmortizedTrack, Indexation};
use crate::tax::salary::{SalaryBreakdown, SalaryInput};
use crate::tax::tables::TaxConfig;
use crate::wealth::pension::RetirementOutlook;

/// At most this many mortgage findings are reported
const MAX_MORTGAGE_INSIGHTS: usize = 3;

/// Interest-to-principal ratio above which the mix is flagged as expensive
const HIGH_INTEREST_RATIO: f64 = 0.5;

/// Interest-to-principal ratio below which the mix is flagged as efficient
const LOW_INTEREST_RATIO: f64 = 0.25;

/// Mortgage-mix findings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MortgageInsight {
    /// Lifetime interest is a large share of the principal
    HighInterestRatio { ratio: f64, total_interest: f64 },

    /// Lifetime interest is a small share of the principal
    EfficientMix { ratio: f64 },

    /// CPI-linked tracks carry significant indexation exposure
    IndexedExposure {
        indexed_principal: f64,
        indexed_interest: f64,
    },

    /// Shortening the longest track by five years would save this much
    TermShortening {
        track_index: usize,
        from_years: u32,
        to_years: u32,
        saving: f64,
    },
}

/// Generate mortgage findings. Heuristic thresholds, exact arithmetic.
pub fn mortgage_insights(tracks: &[AmortizedTrack]) -> Vec<MortgageInsight> {
    let mut insights = Vec::new();

    let total_principal: f64 = tracks.iter().map(|t| t.track.principal).sum();
    let total_interest: f64 = tracks.iter().map(|t| t.result.total_interest).sum();

    if total_principal > 0.0 {
        let ratio = total_interest / total_principal;
        if ratio > HIGH_INTEREST_RATIO {
            insights.push(MortgageInsight::HighInterestRatio { ratio, total_interest });
        } else if ratio < LOW_INTEREST_RATIO {
            insights.push(MortgageInsight::EfficientMix { ratio });
        }
    }

    let indexed: Vec<_> = tracks
        .iter()
        .filter(|t| t.track.indexation == Indexation::MonthlyLinkedToAnnualRate)
        .collect();
    if !indexed.is_empty() {
        insights.push(MortgageInsight::IndexedExposure {
            indexed_principal: indexed.iter().map(|t| t.track.principal).sum(),
            indexed_interest: indexed.iter().map(|t| t.result.total_interest).sum(),
        });
    }

    if let Some((index, longest)) = tracks
        .iter()
        .enumerate()
        .max_by_key(|(_, t)| t.track.term_months)
    {
        let from_years = longest.track.term_months / 12;
        if from_years > 20 {
            let to_years = from_years - 5;
            let short_months = to_years * 12;
            let monthly_rate = longest.track.monthly_rate();
            // Heuristic: compare lifetime cost of a flat annuity over the
            // shortened term, ignoring indexation and grace
            let short_total =
                annuity_payment(longest.track.principal, monthly_rate, short_months)
                    * short_months as f64;
            let saving = longest.result.total_paid - short_total;
            if saving > 10_000.0 {
                insights.push(MortgageInsight::TermShortening {
                    track_index: index,
                    from_years,
                    to_years,
                    saving,
                });
            }
        }
    }

    insights.truncate(MAX_MORTGAGE_INSIGHTS);
    insights
}

/// Salary findings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SalaryInsight {
    /// Where the gross goes: deductions and net as shares of gross
    EffectiveDeductions {
        deduction_rate_pct: f64,
        net_share_pct: f64,
    },

    /// Raising the pension contribution by one point costs less than it saves.
    /// The tax saving is exact, recomputed through the bracket table.
    PensionIncrease {
        extra_monthly_contribution: f64,
        tax_saving: f64,
        net_cost: f64,
    },

    /// Employer study-fund contribution is tax-advantaged savings
    StudyFundBenefit { annual_employer_contribution: f64 },

    /// Company car raises the tax bill by this exact amount per month
    CompanyCarCost { monthly_tax_cost: f64 },
}

/// Contribution percentage below which a pension increase is suggested
const PENSION_SUGGESTION_THRESHOLD_PCT: f64 = 7.0;

/// Generate salary findings from a finished breakdown.
pub fn salary_insights(
    input: &SalaryInput,
    breakdown: &SalaryBreakdown,
    config: &TaxConfig,
) -> Vec<SalaryInsight> {
    let mut insights = Vec::new();

    if breakdown.gross > 0.0 {
        let levies =
            breakdown.income_tax + breakdown.national_insurance + breakdown.health_insurance;
        insights.push(SalaryInsight::EffectiveDeductions {
            deduction_rate_pct: levies / breakdown.gross * 100.0,
            net_share_pct: breakdown.net_salary / breakdown.gross * 100.0,
        });
    }

    if input.pension_employee_pct < PENSION_SUGGESTION_THRESHOLD_PCT && breakdown.gross > 0.0 {
        let extra = breakdown.gross * 0.01;
        // Exact marginal saving: re-levy the reduced taxable income
        let reduced_tax = (config.income_tax.levy(breakdown.taxable_income - extra)
            - breakdown.credit_amount)
            .max(0.0);
        let tax_saving = breakdown.income_tax - reduced_tax;
        insights.push(SalaryInsight::PensionIncrease {
            extra_monthly_contribution: extra,
            tax_saving,
            net_cost: extra - tax_saving,
        });
    }

    if breakdown.study_fund_employer > 0.0 {
        insights.push(SalaryInsight::StudyFundBenefit {
            annual_employer_contribution: breakdown.study_fund_employer * 12.0,
        });
    }

    if input.company_car_value > 0.0 {
        let without_car = config
            .income_tax
            .levy(breakdown.taxable_income - input.company_car_value);
        let with_car = config.income_tax.levy(breakdown.taxable_income);
        insights.push(SalaryInsight::CompanyCarCost {
            monthly_tax_cost: with_car - without_car,
        });
    }

    insights
}

/// Pension adequacy classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PensionAdequacy {
    /// Replacement ratio at or above the 70% target
    OnTrack { replacement_ratio_pct: f64 },

    /// Between 50% and the target; closable gap
    Improvable {
        replacement_ratio_pct: f64,
        monthly_gap: f64,
    },

    /// Below 50%; contributions need attention
    AtRisk {
        replacement_ratio_pct: f64,
        monthly_gap: f64,
    },
}

/// Classify a retirement outlook against the replacement-ratio target.
pub fn pension_adequacy(outlook: &RetirementOutlook) -> PensionAdequacy {
    let ratio = outlook.replacement_ratio_pct;
    if ratio >= 70.0 {
        PensionAdequacy::OnTrack {
            replacement_ratio_pct: ratio,
        }
    } else if ratio >= 50.0 {
        PensionAdequacy::Improvable {
            replacement_ratio_pct: ratio,
            monthly_gap: outlook.gap,
        }
    } else {
        PensionAdequacy::AtRisk {
            replacement_ratio_pct: ratio,
            monthly_gap: outlook.gap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mortgage::engine::amortize;
    use crate::mortgage::track::{Track, TrackKind};
    use crate::tax::salary::decompose;
    use crate::tax::tables::EmploymentMode;

    fn amortized(principal: f64, term_months: u32, rate: f64, indexation: Indexation) -> AmortizedTrack {
        let track = Track::new(principal, term_months, rate, indexation, 0).unwrap();
        let result = amortize(&track, 2.0);
        AmortizedTrack {
            kind: TrackKind::FixedUnlinked,
            track,
            result,
        }
    }

    #[test]
    fn test_high_interest_ratio_flagged() {
        let tracks = vec![amortized(500_000.0, 360, 6.5, Indexation::None)];
        let insights = mortgage_insights(&tracks);
        assert!(matches!(
            insights[0],
            MortgageInsight::HighInterestRatio { ratio, .. } if ratio > 0.5
        ));
    }

    #[test]
    fn test_efficient_mix_flagged() {
        let tracks = vec![amortized(500_000.0, 120, 2.0, Indexation::None)];
        let insights = mortgage_insights(&tracks);
        assert!(matches!(insights[0], MortgageInsight::EfficientMix { .. }));
    }

    #[test]
    fn test_indexed_exposure_reported() {
        let tracks = vec![
            amortized(300_000.0, 240, 3.5, Indexation::MonthlyLinkedToAnnualRate),
            amortized(300_000.0, 240, 4.5, Indexation::None),
        ];
        let insights = mortgage_insights(&tracks);
        assert!(insights.iter().any(|i| matches!(
            i,
            MortgageInsight::IndexedExposure { indexed_principal, .. } if *indexed_principal == 300_000.0
        )));
    }

    #[test]
    fn test_term_shortening_suggested_for_long_tracks() {
        let tracks = vec![amortized(800_000.0, 360, 5.0, Indexation::None)];
        let insights = mortgage_insights(&tracks);
        let shortening = insights
            .iter()
            .find_map(|i| match i {
                MortgageInsight::TermShortening { from_years, to_years, saving, .. } => {
                    Some((*from_years, *to_years, *saving))
                }
                _ => None,
            })
            .expect("long expensive track should suggest shortening");
        assert_eq!(shortening.0, 30);
        assert_eq!(shortening.1, 25);
        assert!(shortening.2 > 10_000.0);
    }

    #[test]
    fn test_at_most_three_mortgage_insights() {
        let tracks = vec![
            amortized(400_000.0, 360, 6.5, Indexation::MonthlyLinkedToAnnualRate),
            amortized(400_000.0, 360, 6.0, Indexation::None),
        ];
        assert!(mortgage_insights(&tracks).len() <= 3);
    }

    #[test]
    fn test_pension_increase_saving_is_exact() {
        let config = TaxConfig::default_2026();
        let input = SalaryInput {
            pension_employee_pct: 6.0,
            ..SalaryInput::gross_only(25_000.0)
        };
        let breakdown = decompose(&input, &config);
        let insights = salary_insights(&input, &breakdown, &config);

        let (extra, saving, net_cost) = insights
            .iter()
            .find_map(|i| match i {
                SalaryInsight::PensionIncrease {
                    extra_monthly_contribution,
                    tax_saving,
                    net_cost,
                } => Some((*extra_monthly_contribution, *tax_saving, *net_cost)),
                _ => None,
            })
            .expect("low pension rate should suggest an increase");

        assert_eq!(extra, 250.0);
        // Saving equals the marginal rate applied across the reduced slice
        assert!(saving > 0.0 && saving < extra);
        assert!((net_cost - (extra - saving)).abs() < 1e-9);
    }

    #[test]
    fn test_company_car_cost_exact() {
        let config = TaxConfig::default_2026();
        let input = SalaryInput {
            company_car_value: 3_000.0,
            ..SalaryInput::gross_only(20_000.0)
        };
        let breakdown = decompose(&input, &config);
        let insights = salary_insights(&input, &breakdown, &config);

        let cost = insights
            .iter()
            .find_map(|i| match i {
                SalaryInsight::CompanyCarCost { monthly_tax_cost } => Some(*monthly_tax_cost),
                _ => None,
            })
            .expect("company car should be flagged");
        assert!(cost > 0.0);
        assert!(cost < 3_000.0);
    }

    #[test]
    fn test_self_employed_no_study_fund_benefit() {
        let config = TaxConfig::default_2026();
        let input = SalaryInput {
            mode: EmploymentMode::SelfEmployed,
            study_fund_employer_pct: 7.5,
            ..SalaryInput::gross_only(20_000.0)
        };
        let breakdown = decompose(&input, &config);
        let insights = salary_insights(&input, &breakdown, &config);
        assert!(!insights
            .iter()
            .any(|i| matches!(i, SalaryInsight::StudyFundBenefit { .. })));
    }

    #[test]
    fn test_pension_adequacy_bands() {
        let outlook = |ratio: f64| RetirementOutlook {
            monthly_pension: 10_000.0,
            last_salary: 10_000.0 / (ratio / 100.0),
            replacement_ratio_pct: ratio,
            target_pension: 0.0,
            gap: 0.0,
        };

        assert!(matches!(
            pension_adequacy(&outlook(85.0)),
            PensionAdequacy::OnTrack { .. }
        ));
        assert!(matches!(
            pension_adequacy(&outlook(60.0)),
            PensionAdequacy::Improvable { .. }
        ));
        assert!(matches!(
            pension_adequacy(&outlook(35.0)),
            PensionAdequacy::AtRisk { .. }
        ));
    }
}
