//! Body fat form
//!
//! Unlike the other forms this one only computes on an explicit calculate,
//! and only when `can_calculate` holds. Edits leave the last result in place.

use crate::calc::{
    compute_body_fat, BodyFatInput, BodyFatResult, Gender, LengthField, LengthUnit, MassUnit,
};

use super::{invalid_choice, unknown_field, Form, FormKind, FormResult};

const FIELDS: &[&str] = &[
    "weight",
    "weightUnit",
    "age",
    "gender",
    "waistCircumference",
    "waistCircumferenceUnit",
    "height",
    "heightUnit",
    "neckCircumference",
    "neckCircumferenceUnit",
    "hipCircumference",
    "hipCircumferenceUnit",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyFatForm {
    pub weight: String,
    pub weight_unit: MassUnit,
    pub age: String,
    pub gender: Gender,
    pub waist: String,
    pub waist_unit: LengthUnit,
    pub height: String,
    pub height_unit: LengthUnit,
    pub neck: String,
    pub neck_unit: LengthUnit,
    pub hip: String,
    pub hip_unit: LengthUnit,
    calculated: Option<BodyFatResult>,
}

impl BodyFatForm {
    pub fn input(&self) -> BodyFatInput<'_> {
        BodyFatInput {
            age: &self.age,
            weight: &self.weight,
            weight_unit: self.weight_unit,
            gender: self.gender,
            waist: LengthField::new(&self.waist, self.waist_unit),
            neck: LengthField::new(&self.neck, self.neck_unit),
            height: LengthField::new(&self.height, self.height_unit),
            hip: LengthField::new(&self.hip, self.hip_unit),
        }
    }

    /// Whether the calculate action is enabled
    pub fn can_calculate(&self) -> bool {
        self.input().is_complete()
    }

    /// Run the calculation and keep the result
    ///
    /// When the inputs are incomplete, or the measurements fall outside the
    /// formula's domain, the previous result is left untouched.
    pub fn calculate(&mut self) -> Option<BodyFatResult> {
        if !self.can_calculate() {
            return None;
        }
        match compute_body_fat(&self.input()) {
            Some(result) => {
                self.calculated = Some(result.clone());
                Some(result)
            }
            None => {
                tracing::warn!(gender = self.gender.as_str(), "Body fat measurements out of range");
                None
            }
        }
    }

    fn length_unit(field: &str, value: &str) -> FormResult<LengthUnit> {
        match LengthUnit::from_str(value) {
            Some(unit @ (LengthUnit::Centimeters | LengthUnit::Inches)) => Ok(unit),
            _ => Err(invalid_choice(field, value, "cm, in")),
        }
    }
}

impl Form for BodyFatForm {
    type Output = BodyFatResult;

    const KIND: FormKind = FormKind::BodyFat;

    fn fields() -> &'static [&'static str] {
        FIELDS
    }

    fn get(&self, field: &str) -> Option<String> {
        let value = match field {
            "weight" => self.weight.clone(),
            "weightUnit" => self.weight_unit.as_str().to_string(),
            "age" => self.age.clone(),
            "gender" => self.gender.as_str().to_string(),
            "waistCircumference" => self.waist.clone(),
            "waistCircumferenceUnit" => self.waist_unit.as_str().to_string(),
            "height" => self.height.clone(),
            "heightUnit" => self.height_unit.as_str().to_string(),
            "neckCircumference" => self.neck.clone(),
            "neckCircumferenceUnit" => self.neck_unit.as_str().to_string(),
            "hipCircumference" => self.hip.clone(),
            "hipCircumferenceUnit" => self.hip_unit.as_str().to_string(),
            _ => return None,
        };
        Some(value)
    }

    fn set(&mut self, field: &str, value: &str) -> FormResult<()> {
        match field {
            "weight" => self.weight = value.to_string(),
            "weightUnit" => {
                self.weight_unit = MassUnit::from_str(value)
                    .ok_or_else(|| invalid_choice(field, value, "kg, lb"))?
            }
            "age" => self.age = value.to_string(),
            "gender" => {
                self.gender = Gender::from_str(value)
                    .ok_or_else(|| invalid_choice(field, value, "male, female"))?
            }
            "waistCircumference" => self.waist = value.to_string(),
            "waistCircumferenceUnit" => self.waist_unit = Self::length_unit(field, value)?,
            "height" => self.height = value.to_string(),
            "heightUnit" => self.height_unit = Self::length_unit(field, value)?,
            "neckCircumference" => self.neck = value.to_string(),
            "neckCircumferenceUnit" => self.neck_unit = Self::length_unit(field, value)?,
            "hipCircumference" => self.hip = value.to_string(),
            "hipCircumferenceUnit" => self.hip_unit = Self::length_unit(field, value)?,
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }

    /// Last calculated result, categorized for the gender currently selected
    fn result(&self) -> Option<BodyFatResult> {
        self.calculated
            .as_ref()
            .map(|result| result.classified_for(self.gender))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::BodyFatCategory;
    use crate::forms::FormSession;
    use crate::store::{FieldPersistence, MemoryFieldStore};
    use std::sync::Arc;

    fn filled_male() -> BodyFatForm {
        let mut form = BodyFatForm::default();
        for (field, value) in [
            ("age", "35"),
            ("weight", "80"),
            ("waistCircumference", "90"),
            ("neckCircumference", "38"),
            ("height", "180"),
        ] {
            form.set(field, value).unwrap();
        }
        form
    }

    #[test]
    fn test_calculate_gate() {
        let mut form = BodyFatForm::default();
        assert!(!form.can_calculate());
        assert!(form.calculate().is_none());

        let mut form = filled_male();
        assert!(form.can_calculate());
        assert!(form.result().is_none());
        let result = form.calculate().unwrap();
        assert_eq!(result.category, BodyFatCategory::Average);
        assert_eq!(form.result(), Some(result));
    }

    #[test]
    fn test_female_requires_hip() {
        let mut form = filled_male();
        form.set("gender", "female").unwrap();
        assert!(!form.can_calculate());
        form.set("hipCircumference", "100").unwrap();
        assert!(form.can_calculate());
        assert!(form.calculate().is_some());
    }

    #[test]
    fn test_edits_keep_last_result() {
        let mut form = filled_male();
        let first = form.calculate().unwrap();
        form.set("waistCircumference", "").unwrap();
        assert_eq!(form.result(), Some(first.clone()));

        // Out-of-domain measurements keep the previous result too
        form.set("waistCircumference", "30").unwrap();
        assert!(form.can_calculate());
        assert!(form.calculate().is_none());
        assert_eq!(form.result(), Some(first));
    }

    #[test]
    fn test_gender_toggle_relabels_result() {
        let mut form = filled_male();
        let male = form.calculate().unwrap();
        assert_eq!(male.category, BodyFatCategory::Average);

        form.set("gender", "female").unwrap();
        let shown = form.result().unwrap();
        assert_eq!(shown.percentage, male.percentage);
        assert_eq!(shown.category, BodyFatCategory::Athletes);
        assert_eq!(shown.category_label, "Athletes");

        form.set("gender", "male").unwrap();
        assert_eq!(form.result(), Some(male));
    }

    #[test]
    fn test_length_units_are_cm_or_in() {
        let mut form = BodyFatForm::default();
        form.set("heightUnit", "in").unwrap();
        assert_eq!(form.height_unit, LengthUnit::Inches);
        assert!(form.set("heightUnit", "ft").is_err());
        assert!(form.set("gender", "other").is_err());
        assert_eq!(form.get("heightUnit").as_deref(), Some("in"));
    }

    #[tokio::test]
    async fn test_shares_keys_with_bmi_form() {
        use crate::forms::BmiForm;

        let persistence = FieldPersistence::new(Arc::new(MemoryFieldStore::new()));
        let mut bmi = FormSession::<BmiForm>::new(persistence.clone());
        bmi.edit("height", "180").unwrap();
        bmi.edit("heightUnit", "ft").unwrap();
        bmi.flush().await;

        let mut body_fat = FormSession::<BodyFatForm>::new(persistence);
        body_fat.activate().await;
        assert_eq!(body_fat.form().height, "180");
        // "ft" is not a body fat choice, so the default stays
        assert_eq!(body_fat.form().height_unit, LengthUnit::Centimeters);
    }
}
