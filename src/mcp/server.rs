//! Body Calculator MCP Server Implementation
//!
//! Implements the MCP server with all calculator tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::store::FieldPersistence;
use crate::tools::calculators::{self, BodyFatRequest};
use crate::tools::forms::OpenForms;
use crate::tools::status::StatusTracker;

/// Body Calculator MCP Service
#[derive(Clone)]
pub struct CalculatorService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    forms: Arc<Mutex<OpenForms>>,
    tool_router: ToolRouter<CalculatorService>,
}

impl CalculatorService {
    pub fn new(database_path: PathBuf, persistence: FieldPersistence) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            forms: Arc::new(Mutex::new(OpenForms::new(persistence))),
            tool_router: Self::tool_router(),
        }
    }

    /// Wait for field writes still in flight
    pub async fn flush(&self) {
        self.forms.lock().await.flush().await;
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Calculator Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateBmiParams {
    /// Height in centimeters, or feet when height_unit is "ft"
    pub height: String,
    /// Extra inches when height_unit is "ft" (blank counts as 0)
    pub height_inch: Option<String>,
    /// "cm" or "ft" (default "cm")
    #[serde(default = "default_length_unit")]
    pub height_unit: String,
    /// Weight value
    pub weight: String,
    /// "kg" or "lb" (default "kg")
    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateBodyFatParams {
    /// Age in years (required, does not affect the result)
    pub age: String,
    /// "male" or "female"
    pub gender: String,
    pub weight: String,
    /// "kg" or "lb" (default "kg")
    pub weight_unit: Option<String>,
    pub waist: String,
    /// "cm" or "in" (default "cm")
    pub waist_unit: Option<String>,
    pub neck: String,
    /// "cm" or "in" (default "cm")
    pub neck_unit: Option<String>,
    pub height: String,
    /// "cm" or "in" (default "cm")
    pub height_unit: Option<String>,
    /// Hip circumference, required for women
    pub hip: Option<String>,
    /// "cm" or "in" (default "cm")
    pub hip_unit: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateIdealWeightParams {
    /// Height in centimeters, or feet when height_unit is "ft"
    pub height: String,
    /// Extra inches when height_unit is "ft"
    pub height_inch: Option<String>,
    /// "cm" or "ft" (default "cm")
    #[serde(default = "default_length_unit")]
    pub height_unit: String,
    /// "male" or "female" (default "male")
    #[serde(default = "default_gender")]
    pub gender: String,
}

fn default_length_unit() -> String {
    "cm".to_string()
}

fn default_weight_unit() -> String {
    "kg".to_string()
}

fn default_gender() -> String {
    "male".to_string()
}

// ============================================================================
// Form Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct OpenFormParams {
    /// Form name: bmi, body_fat, ideal_weight
    pub form: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EditFieldParams {
    /// Form name: bmi, body_fat, ideal_weight
    pub form: String,
    /// Field name, e.g. height, heightUnit, waistCircumference
    pub field: String,
    /// New value as typed
    pub value: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl CalculatorService {
    // --- Status ---

    #[tool(description = "Get the current status of the calculator service including build info, database status, and process information")]
    async fn calculator_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get instructions for using the BMI, body fat and ideal weight calculators. Call this before the first calculation in a session.")]
    fn calculator_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CALCULATOR_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CALCULATOR_INSTRUCTIONS)]))
    }

    // --- Calculators ---

    #[tool(description = "Calculate BMI, its category, gauge position and the weight to gain or lose to reach the healthy range")]
    fn calculate_bmi(&self, Parameters(p): Parameters<CalculateBmiParams>) -> Result<CallToolResult, McpError> {
        let result = calculators::calculate_bmi(&p.height, p.height_inch.as_deref(), &p.height_unit, &p.weight, &p.weight_unit)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Estimate body fat percentage, fat mass and lean mass with the U.S. Navy circumference method")]
    fn calculate_body_fat(&self, Parameters(p): Parameters<CalculateBodyFatParams>) -> Result<CallToolResult, McpError> {
        let req = BodyFatRequest {
            age: &p.age,
            gender: &p.gender,
            weight: &p.weight,
            weight_unit: p.weight_unit.as_deref(),
            waist: &p.waist,
            waist_unit: p.waist_unit.as_deref(),
            neck: &p.neck,
            neck_unit: p.neck_unit.as_deref(),
            height: &p.height,
            height_unit: p.height_unit.as_deref(),
            hip: p.hip.as_deref(),
            hip_unit: p.hip_unit.as_deref(),
        };
        let result = calculators::calculate_body_fat(&req).map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Calculate ideal weight in kg and lb from height and gender")]
    fn calculate_ideal_weight(&self, Parameters(p): Parameters<CalculateIdealWeightParams>) -> Result<CallToolResult, McpError> {
        let result = calculators::calculate_ideal_weight(&p.height, p.height_inch.as_deref(), &p.height_unit, &p.gender)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    // --- Forms ---

    #[tool(description = "Open a calculator form (bmi, body_fat, ideal_weight), restoring the values saved from earlier sessions")]
    async fn open_form(&self, Parameters(p): Parameters<OpenFormParams>) -> Result<CallToolResult, McpError> {
        let mut forms = self.forms.lock().await;
        let result = forms.open_form(&p.form).await.map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Edit one field of a calculator form. The value is saved for future sessions and the form's result is returned.")]
    async fn edit_field(&self, Parameters(p): Parameters<EditFieldParams>) -> Result<CallToolResult, McpError> {
        let mut forms = self.forms.lock().await;
        let result = forms.edit_field(&p.form, &p.field, &p.value).map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Run the body fat calculation on the body_fat form. Only produces a result when can_calculate is true.")]
    async fn run_body_fat(&self) -> Result<CallToolResult, McpError> {
        let mut forms = self.forms.lock().await;
        let result = forms.run_body_fat().map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List every saved form field and when it was last written")]
    async fn list_saved_fields(&self) -> Result<CallToolResult, McpError> {
        let forms = self.forms.lock().await;
        let result = forms.list_saved_fields().await.map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for CalculatorService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bodycalc".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Body Calculators".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Body calculators - BMI, body fat (U.S. Navy method) and ideal weight. \
                 IMPORTANT: Call calculator_instructions first. \
                 One-off: calculate_bmi, calculate_body_fat, calculate_ideal_weight. \
                 Remembered inputs: open_form, edit_field, run_body_fat (body fat only), list_saved_fields. \
                 Status: calculator_status."
                    .into(),
            ),
        }
    }
}
