//! Stateless calculator tools
//!
//! Compute a result straight from raw field text. Unit names that are not
//! recognized are errors; unusable numbers are not, they just produce
//! `available: false`.

use serde::Serialize;

use crate::calc::{
    compute_bmi, compute_body_fat, compute_ideal_weight, BmiInput, BmiResult, BodyFatInput,
    BodyFatResult, Gender, HeightInput, IdealWeightResult, LengthField, LengthUnit, MassUnit,
};
use crate::forms::FormKind;

/// Response for every calculate_* tool
#[derive(Debug, Serialize)]
pub struct CalculationResponse<T> {
    pub calculator: &'static str,
    pub available: bool,
    pub result: Option<T>,
    pub method_note: &'static str,
}

impl<T> CalculationResponse<T> {
    fn new(kind: FormKind, result: Option<T>) -> Self {
        Self {
            calculator: kind.title(),
            available: result.is_some(),
            result,
            method_note: kind.method_note(),
        }
    }
}

fn length_unit(value: &str, allowed: &[LengthUnit]) -> Result<LengthUnit, String> {
    LengthUnit::from_str(value)
        .filter(|unit| allowed.contains(unit))
        .ok_or_else(|| {
            let names: Vec<&str> = allowed.iter().map(|u| u.as_str()).collect();
            format!("Invalid length unit '{}' (expected one of: {})", value, names.join(", "))
        })
}

fn mass_unit(value: &str) -> Result<MassUnit, String> {
    MassUnit::from_str(value).ok_or_else(|| format!("Invalid weight unit '{}' (expected kg or lb)", value))
}

fn gender(value: &str) -> Result<Gender, String> {
    Gender::from_str(value).ok_or_else(|| format!("Invalid gender '{}' (expected male or female)", value))
}

fn circumference<'a>(value: &'a str, unit: Option<&str>) -> Result<LengthField<'a>, String> {
    let unit = length_unit(unit.unwrap_or("cm"), CIRCUMFERENCE_UNITS)?;
    Ok(LengthField::new(value, unit))
}

const HEIGHT_UNITS: &[LengthUnit] = &[LengthUnit::Centimeters, LengthUnit::FeetInches];
const CIRCUMFERENCE_UNITS: &[LengthUnit] = &[LengthUnit::Centimeters, LengthUnit::Inches];

/// Calculate BMI from raw inputs
pub fn calculate_bmi(
    height: &str,
    height_inch: Option<&str>,
    height_unit: &str,
    weight: &str,
    weight_unit: &str,
) -> Result<CalculationResponse<BmiResult>, String> {
    let input = BmiInput {
        height: HeightInput::new(height, height_inch.unwrap_or(""), length_unit(height_unit, HEIGHT_UNITS)?),
        weight,
        weight_unit: mass_unit(weight_unit)?,
    };
    Ok(CalculationResponse::new(FormKind::Bmi, compute_bmi(&input)))
}

/// Raw body fat inputs; units default to cm / kg
#[derive(Debug, Clone, Default)]
pub struct BodyFatRequest<'a> {
    pub age: &'a str,
    pub gender: &'a str,
    pub weight: &'a str,
    pub weight_unit: Option<&'a str>,
    pub waist: &'a str,
    pub waist_unit: Option<&'a str>,
    pub neck: &'a str,
    pub neck_unit: Option<&'a str>,
    pub height: &'a str,
    pub height_unit: Option<&'a str>,
    pub hip: Option<&'a str>,
    pub hip_unit: Option<&'a str>,
}

/// Calculate body fat from raw inputs
pub fn calculate_body_fat(req: &BodyFatRequest<'_>) -> Result<CalculationResponse<BodyFatResult>, String> {
    let input = BodyFatInput {
        age: req.age,
        weight: req.weight,
        weight_unit: mass_unit(req.weight_unit.unwrap_or("kg"))?,
        gender: gender(req.gender)?,
        waist: circumference(req.waist, req.waist_unit)?,
        neck: circumference(req.neck, req.neck_unit)?,
        height: circumference(req.height, req.height_unit)?,
        hip: circumference(req.hip.unwrap_or(""), req.hip_unit)?,
    };
    Ok(CalculationResponse::new(FormKind::BodyFat, compute_body_fat(&input)))
}

/// Calculate ideal weight from raw inputs
pub fn calculate_ideal_weight(
    height: &str,
    height_inch: Option<&str>,
    height_unit: &str,
    gender_value: &str,
) -> Result<CalculationResponse<IdealWeightResult>, String> {
    let height = HeightInput::new(height, height_inch.unwrap_or(""), length_unit(height_unit, HEIGHT_UNITS)?);
    let result = compute_ideal_weight(&height, gender(gender_value)?);
    Ok(CalculationResponse::new(FormKind::IdealWeight, result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_bmi_tool() {
        let response = calculate_bmi("180", None, "cm", "75", "kg").unwrap();
        assert!(response.available);
        assert_eq!(response.result.unwrap().bmi, 23.1);

        let response = calculate_bmi("", None, "cm", "75", "kg").unwrap();
        assert!(!response.available);
        assert!(response.result.is_none());

        assert!(calculate_bmi("70", None, "in", "75", "kg").is_err());
        assert!(calculate_bmi("180", None, "cm", "75", "stone").is_err());
    }

    #[test]
    fn test_calculate_body_fat_tool() {
        let req = BodyFatRequest {
            age: "35",
            gender: "male",
            weight: "80",
            waist: "90",
            neck: "38",
            height: "180",
            ..Default::default()
        };
        let response = calculate_body_fat(&req).unwrap();
        assert!(response.available);

        let female = BodyFatRequest { gender: "female", ..req.clone() };
        assert!(!calculate_body_fat(&female).unwrap().available);

        let bad_unit = BodyFatRequest { height_unit: Some("ft"), ..req };
        assert!(calculate_body_fat(&bad_unit).is_err());
    }

    #[test]
    fn test_calculate_ideal_weight_tool() {
        let response = calculate_ideal_weight("165", None, "cm", "female").unwrap();
        let result = response.result.unwrap();
        assert_eq!(result.kg, 58.3);
        assert_eq!(result.lb, 128.5);

        assert!(!calculate_ideal_weight("0", None, "cm", "male").unwrap().available);
        assert!(calculate_ideal_weight("165", None, "cm", "robot").is_err());
    }
}
