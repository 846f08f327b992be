//! Calculator forms
//!
//! Each form is the in-memory state behind one calculator: raw text fields,
//! unit and gender toggles, and the result derived from them. A `FormSession`
//! pairs a form with field persistence.

pub mod bmi;
pub mod body_fat;
pub mod ideal_weight;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::store::FieldPersistence;

pub use bmi::BmiForm;
pub use body_fat::BodyFatForm;
pub use ideal_weight::IdealWeightForm;

/// Form error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown field '{field}' on the {form} form")]
    UnknownField { form: &'static str, field: String },

    #[error("'{value}' is not a valid choice for {field} (expected one of: {expected})")]
    InvalidChoice {
        field: String,
        value: String,
        expected: &'static str,
    },

    #[error("Unknown form '{0}'")]
    UnknownForm(String),
}

pub type FormResult<T> = Result<T, FormError>;

/// The three calculators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Bmi,
    BodyFat,
    IdealWeight,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Bmi, FormKind::BodyFat, FormKind::IdealWeight];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Bmi => "bmi",
            FormKind::BodyFat => "body_fat",
            FormKind::IdealWeight => "ideal_weight",
        }
    }

    pub fn from_str(s: &str) -> FormResult<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "bmi" => Ok(FormKind::Bmi),
            "body_fat" | "bodyfat" => Ok(FormKind::BodyFat),
            "ideal_weight" | "idealweight" => Ok(FormKind::IdealWeight),
            _ => Err(FormError::UnknownForm(s.to_string())),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormKind::Bmi => "BMI Calculator",
            FormKind::BodyFat => "Body Fat Calculator",
            FormKind::IdealWeight => "Ideal Weight Calculator",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FormKind::Bmi => "Calculate your Body Mass Index",
            FormKind::BodyFat => "Calculate your body fat percentage",
            FormKind::IdealWeight => "Calculate your ideal weight",
        }
    }

    /// Method note shown under a result
    pub fn method_note(&self) -> &'static str {
        match self {
            FormKind::Bmi => {
                "BMI is weight divided by the square of height. It is a screening tool and \
                 does not measure body fat directly; muscle mass, age, sex and ethnicity all \
                 affect how well it reflects health."
            }
            FormKind::BodyFat => {
                "Uses the U.S. Navy circumference method: neck, waist and height, plus hip \
                 for women. Results depend on body composition and measurement accuracy."
            }
            FormKind::IdealWeight => {
                "Back-computes weight from a reference BMI of 22.0 for men and 21.4 for \
                 women. A general guideline only."
            }
        }
    }
}

/// Shared behavior of the calculator forms
pub trait Form: Default + Send + Sync + 'static {
    type Output: Serialize + Clone;

    const KIND: FormKind;

    /// Field names, in display order
    fn fields() -> &'static [&'static str];

    fn get(&self, field: &str) -> Option<String>;

    /// Update a field from user input
    ///
    /// Text fields accept anything; toggles only accept their choice set.
    fn set(&mut self, field: &str, value: &str) -> FormResult<()>;

    /// Current result, if the inputs allow one
    fn result(&self) -> Option<Self::Output>;

    /// Key the field is persisted under
    fn storage_key(field: &str) -> String {
        field.to_string()
    }

    /// Apply previously saved values, skipping any this form cannot accept
    fn apply_saved(&mut self, saved: &HashMap<String, String>) {
        for field in Self::fields() {
            let Some(value) = saved.get(&Self::storage_key(field)) else {
                continue;
            };
            if let Err(e) = self.set(field, value) {
                tracing::debug!(form = Self::KIND.as_str(), error = %e, "Ignoring saved value");
            }
        }
    }

    /// All fields and their current values
    fn values(&self) -> BTreeMap<String, String> {
        Self::fields()
            .iter()
            .filter_map(|f| self.get(f).map(|v| (f.to_string(), v)))
            .collect()
    }
}

pub(crate) fn unknown_field<F: Form>(field: &str) -> FormError {
    FormError::UnknownField {
        form: F::KIND.as_str(),
        field: field.to_string(),
    }
}

pub(crate) fn invalid_choice(field: &str, value: &str, expected: &'static str) -> FormError {
    FormError::InvalidChoice {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    }
}

/// A form bound to field persistence
pub struct FormSession<F: Form> {
    form: F,
    persistence: FieldPersistence,
    pending: Vec<JoinHandle<()>>,
}

impl<F: Form> FormSession<F> {
    pub fn new(persistence: FieldPersistence) -> Self {
        Self {
            form: F::default(),
            persistence,
            pending: Vec::new(),
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Batch-read every saved field and apply what is usable
    ///
    /// Writes still in flight from this session land before the read.
    pub async fn activate(&mut self) {
        self.flush().await;
        let keys: Vec<String> = F::fields().iter().map(|f| F::storage_key(f)).collect();
        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        let saved = self.persistence.load(&refs).await;
        tracing::info!(form = F::KIND.as_str(), restored = saved.len(), "Form activated");
        self.form.apply_saved(&saved);
    }

    /// Update a field, persist it in the background, and return the new result
    ///
    /// The result reflects the edit immediately, whether or not the write has
    /// landed yet.
    pub fn edit(&mut self, field: &str, value: &str) -> FormResult<Option<F::Output>> {
        self.form.set(field, value)?;
        self.pending.retain(|handle| !handle.is_finished());
        self.pending
            .push(self.persistence.write_through(&F::storage_key(field), value));
        Ok(self.form.result())
    }

    /// Wait for writes issued so far
    pub async fn flush(&mut self) {
        for handle in self.pending.drain(..) {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Field write task failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersistedField;
    use crate::store::{FieldStore, MemoryFieldStore, StoreResult};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    /// Memory store whose writes take a while to land
    #[derive(Default)]
    struct SlowWrites(MemoryFieldStore);

    #[async_trait]
    impl FieldStore for SlowWrites {
        async fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.0.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.0.set(key, value).await
        }

        async fn list(&self) -> StoreResult<Vec<PersistedField>> {
            self.0.list().await
        }
    }

    #[tokio::test]
    async fn test_reactivating_keeps_unsaved_edits() {
        let store = Arc::new(SlowWrites::default());
        store.0.set("height", "170").await.unwrap();

        let mut session = FormSession::<BmiForm>::new(FieldPersistence::new(store.clone()));
        session.activate().await;
        assert_eq!(session.form().get("height").as_deref(), Some("170"));

        session.edit("height", "180").unwrap();
        session.activate().await;
        assert_eq!(session.form().get("height").as_deref(), Some("180"));
        assert_eq!(store.0.get("height").await.unwrap().as_deref(), Some("180"));
    }

    #[test]
    fn test_form_kind_parsing() {
        assert_eq!(FormKind::from_str("bmi"), Ok(FormKind::Bmi));
        assert_eq!(FormKind::from_str("Body Fat"), Ok(FormKind::BodyFat));
        assert_eq!(FormKind::from_str("ideal-weight"), Ok(FormKind::IdealWeight));
        assert!(matches!(FormKind::from_str("bmr"), Err(FormError::UnknownForm(_))));
    }

    #[test]
    fn test_form_kind_round_trip_names() {
        for kind in FormKind::ALL {
            assert_eq!(FormKind::from_str(kind.as_str()), Ok(kind));
            assert!(!kind.title().is_empty());
        }
    }
}
