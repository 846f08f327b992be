//! Unit types and conversion constants
//!
//! Length normalizes to centimeters, mass to kilograms. Nothing here rounds;
//! rounding happens once, when a result is produced.

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Conversion Constants (to centimeters)
// ============================================================================

/// Centimeters per foot
pub const CM_PER_FOOT: f64 = 30.48;
/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;
/// Centimeters per meter
pub const CM_PER_M: f64 = 100.0;

// ============================================================================
// Mass Conversion Constants
// ============================================================================

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;
/// Pounds per kilogram (display only)
pub const LB_PER_KG: f64 = 2.20462;

/// Unit a length field is entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "cm")]
    Centimeters,
    /// Feet, with an optional companion inches field
    #[serde(rename = "ft")]
    FeetInches,
    #[serde(rename = "in")]
    Inches,
}

impl LengthUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::Centimeters => "cm",
            LengthUnit::FeetInches => "ft",
            LengthUnit::Inches => "in",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Some(LengthUnit::Centimeters),
            "ft" | "feet" | "foot" => Some(LengthUnit::FeetInches),
            "in" | "inch" | "inches" => Some(LengthUnit::Inches),
            _ => None,
        }
    }

    /// Centimeters per one of this unit (feet for the composite unit)
    pub fn cm_factor(&self) -> f64 {
        match self {
            LengthUnit::Centimeters => 1.0,
            LengthUnit::FeetInches => CM_PER_FOOT,
            LengthUnit::Inches => CM_PER_INCH,
        }
    }

    pub fn to_cm(&self, value: f64) -> f64 {
        value * self.cm_factor()
    }
}

/// Unit a weight field is entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MassUnit {
    #[default]
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "lb")]
    Pounds,
}

impl MassUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MassUnit::Kilograms => "kg",
            MassUnit::Pounds => "lb",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Some(MassUnit::Kilograms),
            "lb" | "lbs" | "pound" | "pounds" => Some(MassUnit::Pounds),
            _ => None,
        }
    }

    /// Label used in user-facing messages ("kg" / "lbs")
    pub fn message_label(&self) -> &'static str {
        match self {
            MassUnit::Kilograms => "kg",
            MassUnit::Pounds => "lbs",
        }
    }

    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            MassUnit::Kilograms => value,
            MassUnit::Pounds => value * KG_PER_LB,
        }
    }
}

/// Biological sex used to pick formula constants and thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Composite feet + inches to centimeters
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    feet * CM_PER_FOOT + inches * CM_PER_INCH
}

pub fn kg_to_lb(kg: f64) -> f64 {
    kg * LB_PER_KG
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
