//! Calculation engine
//!
//! Unit conversion and the three calculators. Everything here is pure; invalid
//! input yields `None` instead of an error.

pub mod bmi;
pub mod body_fat;
pub mod ideal_weight;
pub mod measurement;
pub mod units;

pub use bmi::{
    assess_bmi, calculate_bmi, classify_bmi, compute_bmi, BmiCategory, BmiInput, BmiResult,
};
pub use body_fat::{
    assess_body_fat, body_fat_percentage, classify_body_fat, compute_body_fat, BodyFatCategory,
    BodyFatInput, BodyFatResult, Circumferences, LengthField,
};
pub use ideal_weight::{calculate_ideal_weight, compute_ideal_weight, target_bmi, IdealWeightResult};
pub use measurement::{parse_number, parse_positive, to_canonical, HeightInput, Measurement};
pub use units::{round_to, Gender, LengthUnit, MassUnit};
