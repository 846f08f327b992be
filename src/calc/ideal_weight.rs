//! Ideal weight from a reference BMI

use serde::Serialize;

use super::measurement::HeightInput;
use super::units::{kg_to_lb, round_to, Gender, CM_PER_M};

/// Reference BMI for the given gender
pub fn target_bmi(gender: Gender) -> f64 {
    match gender {
        Gender::Male => 22.0,
        Gender::Female => 21.4,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdealWeightResult {
    pub kg: f64,
    /// Derived from the already rounded kilogram figure
    pub lb: f64,
    pub target_bmi: f64,
}

/// Ideal weight for a canonical height
pub fn calculate_ideal_weight(height_cm: f64, gender: Gender) -> Option<IdealWeightResult> {
    if !(height_cm > 0.0) {
        return None;
    }
    let height_m = height_cm / CM_PER_M;
    let target = target_bmi(gender);
    let kg = round_to(target * height_m * height_m, 1);
    Some(IdealWeightResult {
        kg,
        lb: round_to(kg_to_lb(kg), 1),
        target_bmi: target,
    })
}

pub fn compute_ideal_weight(height: &HeightInput<'_>, gender: Gender) -> Option<IdealWeightResult> {
    calculate_ideal_weight(height.to_cm()?, gender)
}
