//! Form tools
//!
//! Stateful counterparts of the calculator tools: open a form (restoring saved
//! fields), edit one field at a time, and list what has been saved.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::forms::{BmiForm, BodyFatForm, Form, FormKind, FormSession, IdealWeightForm};
use crate::models::PersistedField;
use crate::store::{FieldPersistence, FieldStore};

/// The three calculator sessions
pub struct OpenForms {
    bmi: FormSession<BmiForm>,
    body_fat: FormSession<BodyFatForm>,
    ideal_weight: FormSession<IdealWeightForm>,
    persistence: FieldPersistence,
}

/// Snapshot of a form
#[derive(Debug, Serialize)]
pub struct FormStateResponse {
    pub form: &'static str,
    pub title: &'static str,
    pub fields: BTreeMap<String, String>,
    pub available: bool,
    pub result: Option<serde_json::Value>,
    /// Only reported by forms that calculate on request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_calculate: Option<bool>,
}

/// Response for list_saved_fields
#[derive(Debug, Serialize)]
pub struct ListFieldsResponse {
    pub fields: Vec<PersistedField>,
    pub total: usize,
}

fn snapshot<F: Form>(session: &FormSession<F>) -> Result<FormStateResponse, String> {
    let result = session
        .form()
        .result()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| format!("Serialization error: {}", e))?;

    Ok(FormStateResponse {
        form: F::KIND.as_str(),
        title: F::KIND.title(),
        fields: session.form().values(),
        available: result.is_some(),
        result,
        can_calculate: None,
    })
}

impl OpenForms {
    pub fn new(persistence: FieldPersistence) -> Self {
        Self {
            bmi: FormSession::new(persistence.clone()),
            body_fat: FormSession::new(persistence.clone()),
            ideal_weight: FormSession::new(persistence.clone()),
            persistence,
        }
    }

    fn state(&self, kind: FormKind) -> Result<FormStateResponse, String> {
        match kind {
            FormKind::Bmi => snapshot(&self.bmi),
            FormKind::BodyFat => {
                let mut state = snapshot(&self.body_fat)?;
                state.can_calculate = Some(self.body_fat.form().can_calculate());
                Ok(state)
            }
            FormKind::IdealWeight => snapshot(&self.ideal_weight),
        }
    }

    /// Restore a form's saved fields and return its state
    pub async fn open_form(&mut self, form: &str) -> Result<FormStateResponse, String> {
        let kind = FormKind::from_str(form).map_err(|e| e.to_string())?;
        // Forms share keys, so every pending write must land before the read
        self.flush().await;
        match kind {
            FormKind::Bmi => self.bmi.activate().await,
            FormKind::BodyFat => self.body_fat.activate().await,
            FormKind::IdealWeight => self.ideal_weight.activate().await,
        }
        self.state(kind)
    }

    /// Edit one field; the value is saved in the background
    pub fn edit_field(&mut self, form: &str, field: &str, value: &str) -> Result<FormStateResponse, String> {
        let kind = FormKind::from_str(form).map_err(|e| e.to_string())?;
        let edited = match kind {
            FormKind::Bmi => self.bmi.edit(field, value).map(drop),
            FormKind::BodyFat => self.body_fat.edit(field, value).map(drop),
            FormKind::IdealWeight => self.ideal_weight.edit(field, value).map(drop),
        };
        edited.map_err(|e| e.to_string())?;
        self.state(kind)
    }

    /// Run the body fat calculation on the current form
    pub fn run_body_fat(&mut self) -> Result<FormStateResponse, String> {
        if self.body_fat.form_mut().calculate().is_none() {
            tracing::debug!("Body fat calculation unavailable for current inputs");
        }
        self.state(FormKind::BodyFat)
    }

    /// Wait for any outstanding field writes
    pub async fn flush(&mut self) {
        self.bmi.flush().await;
        self.body_fat.flush().await;
        self.ideal_weight.flush().await;
    }

    /// List every persisted field
    pub async fn list_saved_fields(&self) -> Result<ListFieldsResponse, String> {
        let fields = self
            .persistence
            .store()
            .list()
            .await
            .map_err(|e| format!("Failed to list fields: {}", e))?;
        Ok(ListFieldsResponse {
            total: fields.len(),
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrations, Database};
    use crate::store::SqliteFieldStore;
    use std::sync::Arc;

    fn sqlite_forms() -> OpenForms {
        let db = Database::in_memory().unwrap();
        db.with_conn(migrations::run_migrations).unwrap();
        OpenForms::new(FieldPersistence::new(Arc::new(SqliteFieldStore::new(db))))
    }

    #[tokio::test]
    async fn test_edit_and_reopen() {
        let mut forms = sqlite_forms();
        let state = forms.open_form("bmi").await.unwrap();
        assert!(!state.available);

        forms.edit_field("bmi", "height", "180").unwrap();
        let state = forms.edit_field("bmi", "weight", "75").unwrap();
        assert!(state.available);
        assert_eq!(state.result.unwrap()["bmi"], serde_json::json!(23.1));
        forms.flush().await;

        let saved = forms.list_saved_fields().await.unwrap();
        assert_eq!(saved.total, 2);

        let state = forms.open_form("body_fat").await.unwrap();
        assert_eq!(state.fields["height"], "180");
        assert_eq!(state.fields["weight"], "75");
        assert_eq!(state.can_calculate, Some(false));
    }

    #[tokio::test]
    async fn test_open_sees_edits_from_other_form() {
        let mut forms = sqlite_forms();
        forms.edit_field("bmi", "height", "172").unwrap();
        forms.edit_field("bmi", "weight", "68").unwrap();

        let state = forms.open_form("body_fat").await.unwrap();
        assert_eq!(state.fields["height"], "172");
        assert_eq!(state.fields["weight"], "68");
    }

    #[tokio::test]
    async fn test_run_body_fat() {
        let mut forms = sqlite_forms();
        for (field, value) in [
            ("age", "35"),
            ("weight", "80"),
            ("waistCircumference", "90"),
            ("neckCircumference", "38"),
            ("height", "180"),
        ] {
            forms.edit_field("body_fat", field, value).unwrap();
        }
        let state = forms.edit_field("body_fat", "gender", "male").unwrap();
        assert_eq!(state.can_calculate, Some(true));
        assert!(!state.available);

        let state = forms.run_body_fat().unwrap();
        assert!(state.available);
        assert_eq!(state.result.unwrap()["category"], "average");
    }

    #[tokio::test]
    async fn test_errors_are_reported() {
        let mut forms = sqlite_forms();
        assert!(forms.open_form("bmr").await.is_err());
        assert!(forms.edit_field("bmi", "age", "30").is_err());
        assert!(forms.edit_field("ideal_weight", "gender", "x").is_err());
    }
}
