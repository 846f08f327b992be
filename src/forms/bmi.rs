//! BMI form
//!
//! Recomputes on every edit. Height is entered in cm or ft+in.

use crate::calc::{compute_bmi, BmiInput, BmiResult, HeightInput, LengthUnit, MassUnit};

use super::{invalid_choice, unknown_field, Form, FormKind, FormResult};

const FIELDS: &[&str] = &["height", "heightInch", "weight", "heightUnit", "weightUnit"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BmiForm {
    pub height: String,
    pub height_inch: String,
    pub weight: String,
    pub height_unit: LengthUnit,
    pub weight_unit: MassUnit,
}

impl BmiForm {
    pub fn input(&self) -> BmiInput<'_> {
        BmiInput {
            height: HeightInput::new(&self.height, &self.height_inch, self.height_unit),
            weight: &self.weight,
            weight_unit: self.weight_unit,
        }
    }
}

impl Form for BmiForm {
    type Output = BmiResult;

    const KIND: FormKind = FormKind::Bmi;

    fn fields() -> &'static [&'static str] {
        FIELDS
    }

    fn get(&self, field: &str) -> Option<String> {
        match field {
            "height" => Some(self.height.clone()),
            "heightInch" => Some(self.height_inch.clone()),
            "weight" => Some(self.weight.clone()),
            "heightUnit" => Some(self.height_unit.as_str().to_string()),
            "weightUnit" => Some(self.weight_unit.as_str().to_string()),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: &str) -> FormResult<()> {
        match field {
            "height" => self.height = value.to_string(),
            "heightInch" => self.height_inch = value.to_string(),
            "weight" => self.weight = value.to_string(),
            "heightUnit" => {
                self.height_unit = match LengthUnit::from_str(value) {
                    Some(unit @ (LengthUnit::Centimeters | LengthUnit::FeetInches)) => unit,
                    _ => return Err(invalid_choice(field, value, "cm, ft")),
                }
            }
            "weightUnit" => {
                self.weight_unit = MassUnit::from_str(value)
                    .ok_or_else(|| invalid_choice(field, value, "kg, lb"))?
            }
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }

    fn result(&self) -> Option<BmiResult> {
        compute_bmi(&self.input())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::BmiCategory;
    use crate::forms::{FormError, FormSession};
    use crate::store::{FieldPersistence, MemoryFieldStore};
    use std::collections::HashMap;
    use std::sync::Arc;

    #[test]
    fn test_edits_recompute() {
        let mut form = BmiForm::default();
        assert!(form.result().is_none());
        form.set("height", "180").unwrap();
        assert!(form.result().is_none());
        form.set("weight", "75").unwrap();
        let result = form.result().unwrap();
        assert_eq!(result.bmi, 23.1);
        assert_eq!(result.category, BmiCategory::Normal);
    }

    #[test]
    fn test_unit_toggles() {
        let mut form = BmiForm::default();
        form.set("heightUnit", "ft").unwrap();
        form.set("height", "5").unwrap();
        form.set("heightInch", "11").unwrap();
        form.set("weightUnit", "lb").unwrap();
        form.set("weight", "165").unwrap();
        assert_eq!(form.result().unwrap().bmi, 23.0);

        // Inches is a body fat choice, not a BMI one
        assert!(matches!(form.set("heightUnit", "in"), Err(FormError::InvalidChoice { .. })));
        assert_eq!(form.height_unit, LengthUnit::FeetInches);
        assert!(matches!(form.set("age", "30"), Err(FormError::UnknownField { .. })));
    }

    #[test]
    fn test_apply_saved_skips_foreign_choices() {
        let saved: HashMap<String, String> = [
            ("height", "70"),
            ("heightUnit", "in"),
            ("weight", "80"),
            ("weightUnit", "lb"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let mut form = BmiForm::default();
        form.apply_saved(&saved);
        assert_eq!(form.height, "70");
        assert_eq!(form.height_unit, LengthUnit::Centimeters);
        assert_eq!(form.weight_unit, MassUnit::Pounds);
    }

    #[tokio::test]
    async fn test_session_persists_and_restores() {
        let persistence = FieldPersistence::new(Arc::new(MemoryFieldStore::new()));

        let mut session = FormSession::<BmiForm>::new(persistence.clone());
        session.activate().await;
        assert_eq!(session.edit("height", "180").unwrap(), None);
        let result = session.edit("weight", "75").unwrap().unwrap();
        assert_eq!(result.bmi, 23.1);
        session.edit("weightUnit", "lb").unwrap();
        assert!(session.edit("weightUnit", "st").is_err());
        session.flush().await;

        let mut restored = FormSession::<BmiForm>::new(persistence);
        restored.activate().await;
        assert_eq!(restored.form().height, "180");
        assert_eq!(restored.form().weight, "75");
        assert_eq!(restored.form().weight_unit, MassUnit::Pounds);
        assert_eq!(restored.form().values()["weightUnit"], "lb");
    }
}
