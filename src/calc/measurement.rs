//! Measurement input
//!
//! A raw text field paired with a unit. Parsing, canonical conversion and
//! formatting live here so calculators only ever see positive canonical values.

use std::fmt;

use super::units::{feet_inches_to_cm, LengthUnit, MassUnit};

/// A unit that can convert values into its kind's canonical unit
pub trait CanonicalUnit: Copy {
    /// Symbol of the canonical unit ("cm" or "kg")
    const CANONICAL: &'static str;

    fn symbol(&self) -> &'static str;

    fn to_canonical(&self, value: f64) -> f64;
}

impl CanonicalUnit for LengthUnit {
    const CANONICAL: &'static str = "cm";

    fn symbol(&self) -> &'static str {
        self.as_str()
    }

    fn to_canonical(&self, value: f64) -> f64 {
        self.to_cm(value)
    }
}

impl CanonicalUnit for MassUnit {
    const CANONICAL: &'static str = "kg";

    fn symbol(&self) -> &'static str {
        self.as_str()
    }

    fn to_canonical(&self, value: f64) -> f64 {
        self.to_kg(value)
    }
}

/// Parse a free-form numeric field
///
/// Returns None for blank, non-numeric, or non-finite text.
pub fn parse_number(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Parse a field that must hold a positive number
pub fn parse_positive(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|v| *v > 0.0)
}

/// A validated value with its unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement<U> {
    pub value: f64,
    pub unit: U,
}

impl<U: CanonicalUnit> Measurement<U> {
    /// Parse raw text; the value must be a finite number > 0
    pub fn parse(raw: &str, unit: U) -> Option<Self> {
        parse_positive(raw).map(|value| Self { value, unit })
    }

    /// Value in the canonical unit (cm or kg)
    pub fn canonical(&self) -> f64 {
        self.unit.to_canonical(self.value)
    }
}

impl<U: CanonicalUnit> fmt::Display for Measurement<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}

/// Convert a raw value straight to its canonical unit
pub fn to_canonical<U: CanonicalUnit>(raw: &str, unit: U) -> Option<f64> {
    Measurement::parse(raw, unit).map(|m| m.canonical())
}

/// A height entry, which may span a feet field and an inches field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightInput<'a> {
    /// Centimeters, feet, or inches depending on `unit`
    pub primary: &'a str,
    /// Only read in feet+inches mode
    pub inches: &'a str,
    pub unit: LengthUnit,
}

impl<'a> HeightInput<'a> {
    pub fn new(primary: &'a str, inches: &'a str, unit: LengthUnit) -> Self {
        Self {
            primary,
            inches,
            unit,
        }
    }

    /// Height in centimeters, if positive
    ///
    /// In feet+inches mode either blank field counts as zero, but text that is
    /// present must be numeric.
    pub fn to_cm(&self) -> Option<f64> {
        let cm = match self.unit {
            LengthUnit::FeetInches => {
                let feet = blank_as_zero(self.primary)?;
                let inches = blank_as_zero(self.inches)?;
                feet_inches_to_cm(feet, inches)
            }
            unit => unit.to_cm(parse_number(self.primary)?),
        };
        (cm > 0.0).then_some(cm)
    }

    pub fn format(&self) -> String {
        match self.unit {
            LengthUnit::FeetInches => format!(
                "{} ft {} in",
                self.primary.trim(),
                blank_or(self.inches.trim(), "0")
            ),
            unit => format!("{} {}", self.primary.trim(), unit.as_str()),
        }
    }
}

fn blank_as_zero(raw: &str) -> Option<f64> {
    if raw.trim().is_empty() {
        Some(0.0)
    } else {
        parse_number(raw)
    }
}

fn blank_or<'a>(s: &'a str, default: &'a str) -> &'a str {
    if s.is_empty() {
        default
    } else {
        s
    }
}
