//! Body fat percentage (U.S. Navy circumference method)
//!
//! All lengths are centimeters, weight is kilograms. A log argument that is not
//! positive makes the input invalid rather than producing NaN.

use serde::Serialize;

use super::measurement::{parse_number, parse_positive, Measurement};
use super::units::{round_to, Gender, LengthUnit, MassUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatCategory {
    EssentialFat,
    Athletes,
    Fitness,
    Average,
    Obese,
}

impl BodyFatCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BodyFatCategory::EssentialFat => "Essential Fat",
            BodyFatCategory::Athletes => "Athletes",
            BodyFatCategory::Fitness => "Fitness",
            BodyFatCategory::Average => "Average",
            BodyFatCategory::Obese => "Obese",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            BodyFatCategory::EssentialFat => "#FF9800",
            BodyFatCategory::Athletes => "#4CAF50",
            BodyFatCategory::Fitness => "#8BC34A",
            BodyFatCategory::Average => "#FFC107",
            BodyFatCategory::Obese => "#F44336",
        }
    }
}

/// Upper bounds (exclusive) for essential, athletes, fitness and average
fn thresholds(gender: Gender) -> [f64; 4] {
    match gender {
        Gender::Male => [6.0, 14.0, 18.0, 25.0],
        Gender::Female => [14.0, 21.0, 25.0, 32.0],
    }
}

/// Classify a body fat percentage
pub fn classify_body_fat(gender: Gender, percentage: f64) -> BodyFatCategory {
    let [essential, athletes, fitness, average] = thresholds(gender);
    if percentage < essential {
        BodyFatCategory::EssentialFat
    } else if percentage < athletes {
        BodyFatCategory::Athletes
    } else if percentage < fitness {
        BodyFatCategory::Fitness
    } else if percentage < average {
        BodyFatCategory::Average
    } else {
        BodyFatCategory::Obese
    }
}

/// Canonical circumferences; `hip_cm` is ignored for men
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumferences {
    pub waist_cm: f64,
    pub neck_cm: f64,
    pub height_cm: f64,
    pub hip_cm: f64,
}

/// Unrounded body fat percentage
///
/// Returns None when the log domain is violated or the denominator degenerates.
pub fn body_fat_percentage(gender: Gender, c: &Circumferences) -> Option<f64> {
    if c.height_cm <= 0.0 {
        return None;
    }
    let density = match gender {
        Gender::Male => {
            let span = c.waist_cm - c.neck_cm;
            if span <= 0.0 {
                return None;
            }
            1.0324 - 0.19077 * span.log10() + 0.15456 * c.height_cm.log10()
        }
        Gender::Female => {
            let span = c.waist_cm + c.hip_cm - c.neck_cm;
            if span <= 0.0 {
                return None;
            }
            1.29579 - 0.35004 * span.log10() + 0.22100 * c.height_cm.log10()
        }
    };
    let pct = 495.0 / density - 450.0;
    pct.is_finite().then_some(pct)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyFatResult {
    pub percentage: f64,
    pub fat_mass_kg: f64,
    pub lean_mass_kg: f64,
    pub category: BodyFatCategory,
    pub category_label: &'static str,
    pub color: &'static str,
}

impl BodyFatResult {
    /// Re-classify the stored percentage under another gender's thresholds
    pub fn classified_for(&self, gender: Gender) -> Self {
        let category = classify_body_fat(gender, self.percentage);
        Self {
            category,
            category_label: category.label(),
            color: category.color(),
            ..self.clone()
        }
    }
}

/// Compute the result from canonical values
pub fn assess_body_fat(gender: Gender, weight_kg: f64, c: &Circumferences) -> Option<BodyFatResult> {
    if weight_kg <= 0.0 {
        return None;
    }
    let pct = body_fat_percentage(gender, c)?;
    let fat_mass = pct / 100.0 * weight_kg;
    let lean_mass = weight_kg - fat_mass;

    let percentage = round_to(pct, 2);
    let category = classify_body_fat(gender, percentage);
    Some(BodyFatResult {
        percentage,
        fat_mass_kg: round_to(fat_mass, 2),
        lean_mass_kg: round_to(lean_mass, 2),
        category,
        category_label: category.label(),
        color: category.color(),
    })
}

/// A length field and its unit
#[derive(Debug, Clone, Copy)]
pub struct LengthField<'a> {
    pub value: &'a str,
    pub unit: LengthUnit,
}

impl<'a> LengthField<'a> {
    pub fn new(value: &'a str, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    fn to_cm(self) -> Option<f64> {
        Measurement::parse(self.value, self.unit).map(|m| m.canonical())
    }
}

/// Raw body fat form inputs
#[derive(Debug, Clone, Copy)]
pub struct BodyFatInput<'a> {
    /// Required to be numeric, never used by the formula
    pub age: &'a str,
    pub weight: &'a str,
    pub weight_unit: MassUnit,
    pub gender: Gender,
    pub waist: LengthField<'a>,
    pub neck: LengthField<'a>,
    pub height: LengthField<'a>,
    /// Only required when `gender` is female
    pub hip: LengthField<'a>,
}

impl BodyFatInput<'_> {
    /// Whether every required field holds a usable number
    ///
    /// Age only has to be numeric; the measurements must also be positive.
    pub fn is_complete(&self) -> bool {
        let mut measurements = vec![
            self.weight,
            self.waist.value,
            self.neck.value,
            self.height.value,
        ];
        if self.gender == Gender::Female {
            measurements.push(self.hip.value);
        }
        parse_number(self.age).is_some()
            && measurements
                .into_iter()
                .all(|raw| parse_positive(raw).is_some())
    }
}

/// Full body fat computation from raw inputs
pub fn compute_body_fat(input: &BodyFatInput<'_>) -> Option<BodyFatResult> {
    if !input.is_complete() {
        return None;
    }
    let weight_kg = Measurement::parse(input.weight, input.weight_unit)?.canonical();
    let hip_cm = match input.gender {
        Gender::Female => input.hip.to_cm()?,
        Gender::Male => 0.0,
    };
    let c = Circumferences {
        waist_cm: input.waist.to_cm()?,
        neck_cm: input.neck.to_cm()?,
        height_cm: input.height.to_cm()?,
        hip_cm,
    };
    assess_body_fat(input.gender, weight_kg, &c)
}
