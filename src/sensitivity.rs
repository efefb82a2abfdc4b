//! Parameter sensitivity evaluation
//!
//! Re-runs a scenario with one perturbed scalar parameter and reports the
//! directional delta. The perturbed value is clamped to its valid domain
//! (rates never go below zero); baseline and perturbed runs share no state.

use serde::{Deserialize, Serialize};

use crate::mortgage::engine::amortize;
use crate::mortgage::track::{AmortizedTrack, Track};
use crate::tax::brackets::BracketTable;
use crate::wealth::pension::{annuitize, project, AnnuityAssumptions, PensionInput};
use crate::wealth::rent_vs_buy::{simulate, RentVsBuyInput};

/// Baseline and perturbed values of one headline figure, in identical units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResult {
    pub baseline: f64,
    pub perturbed: f64,
    /// `perturbed - baseline`
    pub delta: f64,
}

impl SensitivityResult {
    fn new(baseline: f64, perturbed: f64) -> Self {
        Self {
            baseline,
            perturbed,
            delta: perturbed - baseline,
        }
    }
}

/// Total mortgage cost under a rate shift applied to every track.
///
/// Each track is re-amortized at `annual_rate + rate_delta` (clamped at 0)
/// with its indexation and grace unchanged; the compared figure is the
/// combined total paid.
pub fn mortgage_rate_sensitivity(
    tracks: &[AmortizedTrack],
    annual_indexation_rate: f64,
    rate_delta: f64,
) -> SensitivityResult {
    let baseline: f64 = tracks.iter().map(|t| t.result.total_paid).sum();
    let perturbed: f64 = tracks
        .iter()
        .map(|t| {
            let shifted = Track {
                annual_rate: (t.track.annual_rate + rate_delta).max(0.0),
                ..t.track
            };
            amortize(&shifted, annual_indexation_rate).total_paid
        })
        .sum();

    SensitivityResult::new(baseline, perturbed)
}

/// Final owner-minus-renter wealth gap under an appreciation shift.
pub fn appreciation_sensitivity(
    input: &RentVsBuyInput,
    purchase_tax_tiers: &BracketTable,
    appreciation_delta: f64,
) -> SensitivityResult {
    let baseline = simulate(input, purchase_tax_tiers).wealth_gap();

    let mut shifted = input.clone();
    shifted.appreciation_rate += appreciation_delta;
    let perturbed = simulate(&shifted, purchase_tax_tiers).wealth_gap();

    SensitivityResult::new(baseline, perturbed)
}

/// Monthly pension under a return shift (clamped at 0).
pub fn pension_return_sensitivity(
    input: &PensionInput,
    assumptions: &AnnuityAssumptions,
    return_delta: f64,
) -> SensitivityResult {
    let baseline = annuitize(
        project(input).final_balance,
        input.annual_return_rate,
        assumptions,
    );

    let mut shifted = input.clone();
    shifted.annual_return_rate = (shifted.annual_return_rate + return_delta).max(0.0);
    let perturbed = annuitize(
        project(&shifted).final_balance,
        shifted.annual_return_rate,
        assumptions,
    );

    SensitivityResult::new(baseline, perturbed)
}
