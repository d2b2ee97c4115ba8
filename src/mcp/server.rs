//! DietKit MCP Server Implementation
//!
//! Implements the MCP server with all DietKit tools.

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

use crate::db::Database;
use crate::tools::calculators::{self, GrowthRequest, MetabolicProfileRequest, PlanInput};
use crate::tools::plans::{self, PlanToolError};
use crate::tools::status::{StatusTracker, PLANNER_INSTRUCTIONS};

/// DietKit MCP Service
#[derive(Clone)]
pub struct DietKitService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<DietKitService>,
}

impl DietKitService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn default_tool_type() -> String {
    "meal_planner".to_string()
}

fn plan_error(e: PlanToolError) -> McpError {
    match e {
        PlanToolError::InvalidInput(message) => McpError::invalid_params(message, None),
        e @ PlanToolError::Database { .. } => McpError::internal_error(e.to_string(), None),
    }
}

// ============================================================================
// Parameter Types
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ApplyDietTemplateParams {
    /// Diet type id from list_diet_templates (e.g. "balanced", "diabetic", "cardiac")
    pub diet_type: String,
    /// Macro distribution id within the diet type (e.g. "cho55_pro15_fat30")
    pub distribution: String,
    /// Energy tier in kcal; must match a listed tier exactly
    pub energy_tier: u32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SavePlanParams {
    /// Owner the plan belongs to (user or clinic identifier)
    pub owner: String,
    /// meal_planner, diet_template, or meal_distribution (default: meal_planner)
    #[serde(default = "default_tool_type")]
    pub tool_type: String,
    /// Optional label shown in list_plans
    pub label: Option<String>,
    #[serde(flatten)]
    pub plan: PlanInput,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetPlanParams {
    pub owner: String,
    /// meal_planner, diet_template, or meal_distribution (default: meal_planner)
    #[serde(default = "default_tool_type")]
    pub tool_type: String,
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListPlansParams {
    pub owner: String,
    /// Filter by tool type (optional)
    pub tool_type: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdatePlanParams {
    pub owner: String,
    /// meal_planner, diet_template, or meal_distribution (default: meal_planner)
    #[serde(default = "default_tool_type")]
    pub tool_type: String,
    pub id: i64,
    /// New label (omit to keep the current one)
    pub label: Option<String>,
    /// Full replacement state
    #[serde(flatten)]
    pub plan: PlanInput,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeletePlanParams {
    pub owner: String,
    /// meal_planner, diet_template, or meal_distribution (default: meal_planner)
    #[serde(default = "default_tool_type")]
    pub tool_type: String,
    pub id: i64,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl DietKitService {
    // --- Status ---

    #[tool(description = "Get DietKit service status including version, build info, database path, uptime and memory usage")]
    async fn dietkit_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "IMPORTANT: Call this before building a plan. Explains exchange groups, meal slots, target modes, metabolic inputs and plan storage")]
    fn planner_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(PLANNER_INSTRUCTIONS)]))
    }

    // --- Calculators ---

    #[tool(description = "Compute dry weight, weight-loss severity, BMI, ideal and adjusted body weight, waist-hip ratio, MAMC, and BMR/TEE by Harris-Benedict and Mifflin-St Jeor for the dry and selected weights")]
    fn compute_metabolic_profile(&self, Parameters(p): Parameters<MetabolicProfileRequest>) -> Result<CallToolResult, McpError> {
        let result = calculators::compute_metabolic_profile(&p).map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Total CHO, protein, fat, fiber and kcal for exchange servings, with percent of energy and achievement against kcal/macro targets")]
    fn compute_exchange_totals(&self, Parameters(p): Parameters<PlanInput>) -> Result<CallToolResult, McpError> {
        let result = calculators::compute_exchange_totals(&p).map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Check servings distributed across meal slots against the plan. Returns per-group remainder (negative = over-allocated) and per-slot macro totals")]
    fn check_meal_distribution(&self, Parameters(p): Parameters<PlanInput>) -> Result<CallToolResult, McpError> {
        let result = calculators::check_meal_distribution(&p).map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List diet template types, their macro distributions and available energy tiers")]
    fn list_diet_templates(&self) -> Result<CallToolResult, McpError> {
        to_json(&calculators::list_diet_templates())
    }

    #[tool(description = "Get the serving plan for a diet type, macro distribution and exact energy tier, with its totals")]
    fn apply_diet_template(&self, Parameters(p): Parameters<ApplyDietTemplateParams>) -> Result<CallToolResult, McpError> {
        match calculators::apply_diet_template(&p.diet_type, &p.distribution, p.energy_tier) {
            Some(applied) => to_json(&applied),
            None => to_json(&serde_json::json!({
                "error": "Diet template not found",
                "diet_type": p.diet_type,
                "distribution": p.distribution,
                "energy_tier": p.energy_tier,
            })),
        }
    }

    #[tool(description = "Classify a child's weight, height or BMI against WHO or CDC percentiles. Age by months, years, or date of birth")]
    fn classify_growth(&self, Parameters(p): Parameters<GrowthRequest>) -> Result<CallToolResult, McpError> {
        let result = calculators::classify_growth(&p).map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    // --- Plans ---

    #[tool(description = "Save planner state (servings, fat mode, meal distribution, targets) for an owner")]
    fn save_plan(&self, Parameters(p): Parameters<SavePlanParams>) -> Result<CallToolResult, McpError> {
        let result = plans::save_plan(&self.database, &p.owner, &p.tool_type, p.label, &p.plan).map_err(plan_error)?;
        to_json(&result)
    }

    #[tool(description = "Get a saved plan with its totals and distribution remainders recomputed")]
    fn get_plan(&self, Parameters(p): Parameters<GetPlanParams>) -> Result<CallToolResult, McpError> {
        let result = plans::get_plan(&self.database, &p.owner, &p.tool_type, p.id).map_err(plan_error)?;
        match result {
            Some(detail) => to_json(&detail),
            None => to_json(&serde_json::json!({"error": "Plan not found", "id": p.id})),
        }
    }

    #[tool(description = "List an owner's saved plans, most recently updated first")]
    fn list_plans(&self, Parameters(p): Parameters<ListPlansParams>) -> Result<CallToolResult, McpError> {
        let result = plans::list_plans(&self.database, &p.owner, p.tool_type.as_deref()).map_err(plan_error)?;
        to_json(&result)
    }

    #[tool(description = "Replace a saved plan's state. The last write wins")]
    fn update_plan(&self, Parameters(p): Parameters<UpdatePlanParams>) -> Result<CallToolResult, McpError> {
        let result = plans::update_plan(&self.database, &p.owner, &p.tool_type, p.id, p.label.as_deref(), &p.plan)
            .map_err(plan_error)?;
        match result {
            Some(detail) => to_json(&detail),
            None => to_json(&serde_json::json!({"error": "Plan not found", "id": p.id})),
        }
    }

    #[tool(description = "Delete a saved plan")]
    fn delete_plan(&self, Parameters(p): Parameters<DeletePlanParams>) -> Result<CallToolResult, McpError> {
        let deleted = plans::delete_plan(&self.database, &p.owner, &p.tool_type, p.id).map_err(plan_error)?;
        to_json(&serde_json::json!({"deleted": deleted, "id": p.id}))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for DietKitService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "dietkit".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("DietKit Clinical Nutrition".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "DietKit - Clinical nutrition calculations and exchange meal planning. \
                 IMPORTANT: Call planner_instructions before building a plan. \
                 Assessment: compute_metabolic_profile, classify_growth (children). \
                 Planning: list_diet_templates, apply_diet_template, compute_exchange_totals, check_meal_distribution. \
                 Storage: save_plan/get_plan/list_plans/update_plan/delete_plan (per owner). \
                 Status: dietkit_status."
                    .into(),
            ),
        }
    }
}
