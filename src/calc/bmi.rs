//! Body Mass Index
//!
//! BMI is stored rounded to one decimal, and everything downstream (category,
//! gauge, weight gap) is derived from that rounded value, not the raw quotient.

use serde::Serialize;

use super::measurement::{parse_positive, HeightInput};
use super::units::{round_to, MassUnit, CM_PER_M};

/// Lower bound of the healthy range
pub const HEALTHY_BMI_LOWER: f64 = 18.5;
/// Upper target used for the "to lose" message
pub const HEALTHY_BMI_UPPER: f64 = 24.9;
/// BMI shown as a full gauge
pub const GAUGE_MAX_BMI: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Swatch used for the value, label and gauge fill
    pub fn color(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "#3498db",
            BmiCategory::Normal => "#2ecc71",
            BmiCategory::Overweight => "#f1c40f",
            BmiCategory::Obese => "#e74c3c",
        }
    }
}

/// Classify a (rounded) BMI value; lower bounds are inclusive
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Position on the 0-40 gauge as a percentage; only the obese band is capped
pub fn gauge_percentage(bmi: f64, category: BmiCategory) -> f64 {
    let pct = bmi / GAUGE_MAX_BMI * 100.0;
    match category {
        BmiCategory::Obese => pct.min(100.0),
        _ => pct,
    }
}

/// BMI from canonical inputs, rounded to 1dp
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if !(height_cm > 0.0 && weight_kg > 0.0) {
        return None;
    }
    let height_m = height_cm / CM_PER_M;
    let bmi = weight_kg / (height_m * height_m);
    bmi.is_finite().then(|| round_to(bmi, 1))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
    pub category_label: &'static str,
    pub color: &'static str,
    pub percentage_on_scale: f64,
    /// Weight to gain (positive) or lose, always in kilograms; None in the healthy band
    pub weight_delta_kg: Option<f64>,
    pub weight_message: String,
}

/// Derive category, gauge and weight gap from a rounded BMI
///
/// `display_unit` only selects the label in the message; the number stays in
/// kilograms.
pub fn assess_bmi(bmi: f64, height_m: f64, display_unit: MassUnit) -> BmiResult {
    let height_sq = height_m * height_m;
    let ideal_lower = HEALTHY_BMI_LOWER * height_sq;
    let ideal_upper = HEALTHY_BMI_UPPER * height_sq;
    let current = bmi * height_sq;
    let label = display_unit.message_label();

    let category = classify_bmi(bmi);
    let (weight_delta_kg, weight_message) = match category {
        BmiCategory::Underweight => {
            let diff = ideal_lower - current;
            (Some(diff), format!("{:.1} {} to gain", diff, label))
        }
        BmiCategory::Normal => (None, "Healthy weight range".to_string()),
        BmiCategory::Overweight | BmiCategory::Obese => {
            let diff = current - ideal_upper;
            (Some(diff), format!("{:.1} {} to lose", diff, label))
        }
    };

    BmiResult {
        bmi,
        category,
        category_label: category.label(),
        color: category.color(),
        percentage_on_scale: gauge_percentage(bmi, category),
        weight_delta_kg,
        weight_message,
    }
}

/// Raw BMI form inputs
#[derive(Debug, Clone, Copy)]
pub struct BmiInput<'a> {
    pub height: HeightInput<'a>,
    pub weight: &'a str,
    pub weight_unit: MassUnit,
}

/// Full BMI computation from raw inputs; None when any input is unusable
pub fn compute_bmi(input: &BmiInput<'_>) -> Option<BmiResult> {
    // A blank primary height field means "not entered", even in feet+inches mode
    if input.height.primary.trim().is_empty() {
        return None;
    }
    let height_cm = input.height.to_cm()?;
    let weight_kg = input.weight_unit.to_kg(parse_positive(input.weight)?);
    let bmi = calculate_bmi(height_cm, weight_kg)?;
    Some(assess_bmi(bmi, height_cm / CM_PER_M, input.weight_unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::units::{LengthUnit, CM_PER_FOOT, KG_PER_LB};
    use proptest::prelude::*;

    fn metric<'a>(height: &'a str, weight: &'a str) -> BmiInput<'a> {
        BmiInput {
            height: HeightInput::new(height, "", LengthUnit::Centimeters),
            weight,
            weight_unit: MassUnit::Kilograms,
        }
    }

    #[test]
    fn test_reference_example() {
        let result = compute_bmi(&metric("180", "75")).unwrap();
        assert_eq!(result.bmi, 23.1);
        assert_eq!(result.category, BmiCategory::Normal);
        assert_eq!(result.category_label, "Normal weight");
        assert_eq!(result.weight_message, "Healthy weight range");
        assert_eq!(result.weight_delta_kg, None);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(classify_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(classify_bmi(18.5), BmiCategory::Normal);
        assert_eq!(classify_bmi(24.9), BmiCategory::Normal);
        assert_eq!(classify_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(classify_bmi(29.9), BmiCategory::Overweight);
        assert_eq!(classify_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_gauge_capped_only_when_obese() {
        assert_eq!(gauge_percentage(20.0, BmiCategory::Normal), 50.0);
        assert_eq!(gauge_percentage(52.0, BmiCategory::Obese), 100.0);
        assert!((gauge_percentage(32.0, BmiCategory::Obese) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_underweight_message_uses_rounded_bmi() {
        // 180cm, 55kg -> 16.975... rounds to 17.0
        let result = compute_bmi(&metric("180", "55")).unwrap();
        assert_eq!(result.bmi, 17.0);
        assert_eq!(result.category, BmiCategory::Underweight);
        // (18.5 - 17.0) * 1.8^2 = 4.86
        let delta = result.weight_delta_kg.unwrap();
        assert!((delta - 4.86).abs() < 1e-9);
        assert_eq!(result.weight_message, "4.9 kg to gain");
    }

    #[test]
    fn test_category_follows_rounded_bmi() {
        // Raw 24.96 is in the normal band, but rounds up to 25.0
        let weight = format!("{}", 24.96 * 1.8 * 1.8);
        let result = compute_bmi(&metric("180", &weight)).unwrap();
        assert_eq!(result.bmi, 25.0);
        assert_eq!(result.category, BmiCategory::Overweight);
        // (25.0 - 24.9) * 3.24 = 0.324
        assert_eq!(result.weight_message, "0.3 kg to lose");
    }

    #[test]
    fn test_overweight_message_labels_selected_unit() {
        let input = BmiInput {
            height: HeightInput::new("180", "", LengthUnit::Centimeters),
            weight: "200",
            weight_unit: MassUnit::Pounds,
        };
        let result = compute_bmi(&input).unwrap();
        // 200lb = 90.7184kg -> 27.999... rounds to 28.0
        assert_eq!(result.bmi, 28.0);
        assert_eq!(result.category, BmiCategory::Overweight);
        // (28.0 - 24.9) * 3.24 = 10.044, still kilograms despite the lbs label
        assert_eq!(result.weight_message, "10.0 lbs to lose");
    }

    #[test]
    fn test_obese_result() {
        let result = compute_bmi(&metric("160", "110")).unwrap();
        assert_eq!(result.category, BmiCategory::Obese);
        assert_eq!(result.color, "#e74c3c");
        assert!(result.percentage_on_scale <= 100.0);
        assert!(result.weight_message.ends_with("kg to lose"));
    }

    #[test]
    fn test_feet_inches_input() {
        let input = BmiInput {
            height: HeightInput::new("5", "11", LengthUnit::FeetInches),
            weight: "165",
            weight_unit: MassUnit::Pounds,
        };
        let result = compute_bmi(&input).unwrap();
        assert_eq!(result.bmi, 23.0);
    }

    #[test]
    fn test_invalid_inputs_are_unavailable() {
        for _ in 0..3 {
            assert!(compute_bmi(&metric("", "75")).is_none());
            assert!(compute_bmi(&metric("180", "")).is_none());
            assert!(compute_bmi(&metric("abc", "75")).is_none());
            assert!(compute_bmi(&metric("180", "-3")).is_none());
            assert!(compute_bmi(&metric("0", "75")).is_none());
        }
        let blank_feet = BmiInput {
            height: HeightInput::new("", "70", LengthUnit::FeetInches),
            weight: "70",
            weight_unit: MassUnit::Kilograms,
        };
        assert!(compute_bmi(&blank_feet).is_none());
    }

    proptest! {
        #[test]
        fn test_bmi_invariant_under_unit_choice(h in 100.0f64..230.0, w in 30.0f64..200.0) {
            let metric = calculate_bmi(h, w).unwrap();
            let feet = h / CM_PER_FOOT;
            let pounds = w / KG_PER_LB;
            let imperial = calculate_bmi(
                LengthUnit::FeetInches.to_cm(feet),
                MassUnit::Pounds.to_kg(pounds),
            ).unwrap();
            prop_assert!((metric - imperial).abs() <= 0.1 + 1e-9);
        }
    }
}
