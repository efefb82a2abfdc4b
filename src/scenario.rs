//! Scenario runner for composed calculator runs
//!
//! Pre-loads the tax configuration once, then composes the individual engine
//! calls into full calculator reports without re-reading any tables. Every
//! run is a pure function of the runner's configuration and the call inputs.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::insights::{
    mortgage_insights, pension_adequacy, salary_insights, MortgageInsight, PensionAdequacy,
    SalaryInsight,
};
use crate::mortgage::{
    aggregate, amortize, check_regulatory, simulate_early_repayment, AggregateResult,
    AmortizedTrack, EarlyRepaymentOutcome, LendingPolicy, RegulatoryFinding, Track, TrackKind,
};
use crate::sensitivity::{mortgage_rate_sensitivity, SensitivityResult};
use crate::tax::salary::{decompose, SalaryBreakdown, SalaryInput};
use crate::tax::tables::TaxConfig;
use crate::wealth::pension::{
    project, AnnuityAssumptions, PensionInput, PensionProjection, RetirementOutlook,
};
use crate::wealth::rent_vs_buy::{simulate, RentVsBuyInput, RentVsBuyOutcome};

/// Caller-facing track description before amortization
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrackSpec {
    pub kind: TrackKind,
    pub principal: f64,
    pub term_months: u32,
    /// Annual rate in percent units
    pub annual_rate: f64,
    pub grace_months: u32,
}

/// Full mortgage calculator output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageReport {
    pub tracks: Vec<AmortizedTrack>,
    pub aggregate: AggregateResult,
    pub findings: Vec<RegulatoryFinding>,
    pub insights: Vec<MortgageInsight>,
}

/// Full salary calculator output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryReport {
    pub breakdown: SalaryBreakdown,
    pub insights: Vec<SalaryInsight>,
}

/// Full pension calculator output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PensionReport {
    pub projection: PensionProjection,
    pub outlook: RetirementOutlook,
    pub adequacy: PensionAdequacy,
}

/// Pre-loaded scenario runner
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    tax_config: TaxConfig,
    lending_policy: LendingPolicy,
    annuity_assumptions: AnnuityAssumptions,
}

impl ScenarioRunner {
    /// Runner with the built-in 2026 tables and default policy thresholds.
    pub fn new() -> Self {
        Self::with_config(TaxConfig::default_2026())
    }

    /// Runner with an injected tax configuration (e.g. a future tax year).
    pub fn with_config(tax_config: TaxConfig) -> Self {
        Self {
            tax_config,
            lending_policy: LendingPolicy::default(),
            annuity_assumptions: AnnuityAssumptions::default(),
        }
    }

    pub fn lending_policy(mut self, policy: LendingPolicy) -> Self {
        self.lending_policy = policy;
        self
    }

    pub fn annuity_assumptions(mut self, assumptions: AnnuityAssumptions) -> Self {
        self.annuity_assumptions = assumptions;
        self
    }

    pub fn tax_config(&self) -> &TaxConfig {
        &self.tax_config
    }

    /// Amortize each track, aggregate, and evaluate regulatory checks and
    /// insights. Tracks with zero principal are skipped, matching the
    /// calculator behavior of ignoring empty input rows.
    pub fn run_mortgage(
        &self,
        specs: &[TrackSpec],
        annual_indexation_rate: f64,
        net_income: Option<f64>,
    ) -> Result<MortgageReport, EngineError> {
        let mut tracks = Vec::with_capacity(specs.len());
        for spec in specs.iter().filter(|s| s.principal > 0.0) {
            let track = Track::new(
                spec.principal,
                spec.term_months,
                spec.annual_rate,
                spec.kind.indexation(),
                spec.grace_months,
            )?;
            let result = amortize(&track, annual_indexation_rate);
            tracks.push(AmortizedTrack {
                kind: spec.kind,
                track,
                result,
            });
        }
        debug!("amortized {} tracks", tracks.len());

        let aggregate = aggregate(&tracks);
        let findings = check_regulatory(&tracks, net_income, &self.lending_policy);
        let insights = mortgage_insights(&tracks);

        Ok(MortgageReport {
            tracks,
            aggregate,
            findings,
            insights,
        })
    }

    /// Early-repayment simulation over an already-computed mortgage report.
    pub fn run_early_repayment(
        &self,
        report: &MortgageReport,
        extra_monthly: f64,
        lump_sum: f64,
        lump_sum_month: u32,
    ) -> EarlyRepaymentOutcome {
        simulate_early_repayment(&report.tracks, extra_monthly, lump_sum, lump_sum_month)
    }

    pub fn run_salary(&self, input: &SalaryInput) -> SalaryReport {
        let breakdown = decompose(input, &self.tax_config);
        let insights = salary_insights(input, &breakdown, &self.tax_config);
        SalaryReport { breakdown, insights }
    }

    pub fn run_rent_vs_buy(&self, input: &RentVsBuyInput) -> RentVsBuyOutcome {
        simulate(input, self.tax_config.purchase_tax(input.sole_residence))
    }

    pub fn run_pension(&self, input: &PensionInput) -> PensionReport {
        let projection = project(input);
        let outlook =
            RetirementOutlook::from_projection(&projection, input, &self.annuity_assumptions);
        let adequacy = pension_adequacy(&outlook);
        PensionReport {
            projection,
            outlook,
            adequacy,
        }
    }

    /// Evaluate a grid of rate deltas in parallel. Runs are independent, so
    /// the grid parallelizes trivially.
    pub fn rate_sensitivity_grid(
        &self,
        report: &MortgageReport,
        annual_indexation_rate: f64,
        deltas: &[f64],
    ) -> Vec<SensitivityResult> {
        deltas
            .par_iter()
            .map(|&delta| mortgage_rate_sensitivity(&report.tracks, annual_indexation_rate, delta))
            .collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
