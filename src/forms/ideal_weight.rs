//! Ideal weight form
//!
//! Keys are stored with an `idealWeight_` prefix so this form never shares
//! saved values with the others.

use crate::calc::{compute_ideal_weight, Gender, HeightInput, IdealWeightResult, LengthUnit};

use super::{invalid_choice, unknown_field, Form, FormKind, FormResult};

const FIELDS: &[&str] = &["height", "heightInch", "heightUnit", "gender"];

const KEY_PREFIX: &str = "idealWeight_";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdealWeightForm {
    pub height: String,
    pub height_inch: String,
    pub height_unit: LengthUnit,
    pub gender: Gender,
}

impl Form for IdealWeightForm {
    type Output = IdealWeightResult;

    const KIND: FormKind = FormKind::IdealWeight;

    fn fields() -> &'static [&'static str] {
        FIELDS
    }

    fn storage_key(field: &str) -> String {
        format!("{}{}", KEY_PREFIX, field)
    }

    fn get(&self, field: &str) -> Option<String> {
        match field {
            "height" => Some(self.height.clone()),
            "heightInch" => Some(self.height_inch.clone()),
            "heightUnit" => Some(self.height_unit.as_str().to_string()),
            "gender" => Some(self.gender.as_str().to_string()),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: &str) -> FormResult<()> {
        match field {
            "height" => self.height = value.to_string(),
            "heightInch" => self.height_inch = value.to_string(),
            "heightUnit" => {
                self.height_unit = match LengthUnit::from_str(value) {
                    Some(unit @ (LengthUnit::Centimeters | LengthUnit::FeetInches)) => unit,
                    _ => return Err(invalid_choice(field, value, "cm, ft")),
                }
            }
            "gender" => {
                self.gender = Gender::from_str(value)
                    .ok_or_else(|| invalid_choice(field, value, "male, female"))?
            }
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }

    fn result(&self) -> Option<IdealWeightResult> {
        let height = HeightInput::new(&self.height, &self.height_inch, self.height_unit);
        compute_ideal_weight(&height, self.gender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormSession;
    use crate::store::{FieldPersistence, MemoryFieldStore};
    use std::sync::Arc;

    #[test]
    fn test_gender_toggle_recomputes() {
        let mut form = IdealWeightForm::default();
        form.set("height", "165").unwrap();
        assert_eq!(form.result().unwrap().kg, 59.9);
        form.set("gender", "female").unwrap();
        let result = form.result().unwrap();
        assert_eq!(result.kg, 58.3);
        assert_eq!(result.lb, 128.5);
    }

    #[test]
    fn test_storage_keys_are_prefixed() {
        assert_eq!(IdealWeightForm::storage_key("height"), "idealWeight_height");
        assert_eq!(IdealWeightForm::storage_key("gender"), "idealWeight_gender");
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let store = Arc::new(MemoryFieldStore::new());
        let persistence = FieldPersistence::new(store.clone());

        let mut session = FormSession::<IdealWeightForm>::new(persistence.clone());
        session.edit("heightUnit", "ft").unwrap();
        session.edit("height", "5").unwrap();
        let result = session.edit("heightInch", "5").unwrap().unwrap();
        assert_eq!(result.kg, 60.0);
        session.flush().await;

        use crate::store::FieldStore;
        assert_eq!(store.get("idealWeight_height").await.unwrap().as_deref(), Some("5"));
        assert_eq!(store.get("height").await.unwrap(), None);

        let mut restored = FormSession::<IdealWeightForm>::new(persistence);
        restored.activate().await;
        assert_eq!(restored.form().height_unit, LengthUnit::FeetInches);
        assert_eq!(restored.form().result().unwrap().kg, 60.0);
    }
}
