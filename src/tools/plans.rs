//! Plan Record MCP Tools
//!
//! Save, load, list, update and delete planner state. Loaded plans come back
//! with their totals and remainders recomputed from the stored state.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::db::{Database, DbError};
use crate::models::{
    FoodExchangeGroup, PlanRecord, PlanRecordCreate, PlanRecordSummary, PlanState, ToolType,
};
use crate::nutrition::{distribution, GroupRemainder};

use super::calculators::{exchange_summary, ExchangeTotalsResponse, PlanInput};

/// Totals and remainders derived from a stored state
#[derive(Debug, Serialize)]
pub struct PlanSummary {
    #[serde(flatten)]
    pub exchange: ExchangeTotalsResponse,
    pub remainders: BTreeMap<FoodExchangeGroup, GroupRemainder>,
}

pub fn summarize(state: &PlanState) -> PlanSummary {
    let plan = state.serving_plan();
    PlanSummary {
        exchange: exchange_summary(&plan, &state.targets()),
        remainders: distribution::check(&plan, &state.distribution),
    }
}

/// Response for get_plan and update_plan
#[derive(Debug, Serialize)]
pub struct PlanDetail {
    pub record: PlanRecord,
    pub summary: PlanSummary,
}

impl PlanDetail {
    fn from_record(record: PlanRecord) -> Self {
        let summary = summarize(&record.state);
        Self { record, summary }
    }
}

/// Response for save_plan
#[derive(Debug, Serialize)]
pub struct SavePlanResponse {
    pub id: i64,
    pub owner: String,
    pub tool_type: ToolType,
    pub label: Option<String>,
    pub created_at: String,
}

/// Response for list_plans
#[derive(Debug, Serialize)]
pub struct ListPlansResponse {
    pub owner: String,
    pub plans: Vec<PlanRecordSummary>,
    pub total: usize,
}

/// Plan tool failures, split by who has to fix them
#[derive(Debug, Error)]
pub enum PlanToolError {
    /// The caller sent something the tool cannot accept
    #[error("{0}")]
    InvalidInput(String),

    #[error("{context}: {source}")]
    Database {
        context: &'static str,
        #[source]
        source: DbError,
    },
}

impl From<String> for PlanToolError {
    fn from(message: String) -> Self {
        PlanToolError::InvalidInput(message)
    }
}

fn db_error(context: &'static str) -> impl FnOnce(DbError) -> PlanToolError {
    move |source| PlanToolError::Database { context, source }
}

fn parse_tool_type(s: &str) -> Result<ToolType, PlanToolError> {
    ToolType::from_str(s).ok_or_else(|| {
        PlanToolError::InvalidInput(format!(
            "Unknown tool type: {}. Use meal_planner, diet_template, or meal_distribution",
            s
        ))
    })
}

fn state_from_input(input: &PlanInput) -> Result<PlanState, PlanToolError> {
    let plan = input.serving_plan()?;
    let dist = input.meal_distribution()?;
    let targets = input.target_spec()?;
    Ok(PlanState::from_parts(&plan, &dist, &targets))
}

pub fn save_plan(
    db: &Database,
    owner: &str,
    tool_type: &str,
    label: Option<String>,
    input: &PlanInput,
) -> Result<SavePlanResponse, PlanToolError> {
    if owner.trim().is_empty() {
        return Err(PlanToolError::InvalidInput("Owner is required".to_string()));
    }
    let tool_type = parse_tool_type(tool_type)?;
    let state = state_from_input(input)?;

    let conn = db.get_conn().map_err(db_error("Database error"))?;
    let record = PlanRecord::create(
        &conn,
        &PlanRecordCreate {
            owner: owner.to_string(),
            tool_type,
            label,
            state,
        },
    )
    .map_err(db_error("Failed to save plan"))?;

    Ok(SavePlanResponse {
        id: record.id,
        owner: record.owner,
        tool_type: record.tool_type,
        label: record.label,
        created_at: record.created_at,
    })
}

pub fn get_plan(db: &Database, owner: &str, tool_type: &str, id: i64) -> Result<Option<PlanDetail>, PlanToolError> {
    let tool_type = parse_tool_type(tool_type)?;
    let conn = db.get_conn().map_err(db_error("Database error"))?;
    let record = PlanRecord::get(&conn, owner, tool_type, id).map_err(db_error("Failed to get plan"))?;
    Ok(record.map(PlanDetail::from_record))
}

pub fn list_plans(db: &Database, owner: &str, tool_type: Option<&str>) -> Result<ListPlansResponse, PlanToolError> {
    let tool_type = tool_type.map(parse_tool_type).transpose()?;
    let conn = db.get_conn().map_err(db_error("Database error"))?;
    let plans = PlanRecord::list(&conn, owner, tool_type).map_err(db_error("Failed to list plans"))?;
    Ok(ListPlansResponse {
        owner: owner.to_string(),
        total: plans.len(),
        plans,
    })
}

/// Replace a plan's state; `Ok(None)` when the owner has no such record of that tool type
pub fn update_plan(
    db: &Database,
    owner: &str,
    tool_type: &str,
    id: i64,
    label: Option<&str>,
    input: &PlanInput,
) -> Result<Option<PlanDetail>, PlanToolError> {
    let tool_type = parse_tool_type(tool_type)?;
    let state = state_from_input(input)?;
    let conn = db.get_conn().map_err(db_error("Database error"))?;
    match PlanRecord::update_state(&conn, owner, tool_type, id, &state, label) {
        Ok(record) => Ok(Some(PlanDetail::from_record(record))),
        Err(DbError::NotFound(_)) => Ok(None),
        Err(e) => Err(db_error("Failed to update plan")(e)),
    }
}

pub fn delete_plan(db: &Database, owner: &str, tool_type: &str, id: i64) -> Result<bool, PlanToolError> {
    let tool_type = parse_tool_type(tool_type)?;
    let conn = db.get_conn().map_err(db_error("Database error"))?;
    PlanRecord::delete(&conn, owner, tool_type, id).map_err(db_error("Failed to delete plan"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        db
    }

    fn input() -> PlanInput {
        PlanInput {
            servings: BTreeMap::from([("starch".to_string(), 4.0), ("fats_mufa".to_string(), 2.0)]),
            fat_breakdown: true,
            distribution: BTreeMap::from([(
                "starch".to_string(),
                BTreeMap::from([("lunch".to_string(), 3.0)]),
            )]),
            target_kcal: 1500.0,
            target_mode: Some("percent".into()),
            percent_targets: crate::tools::calculators::MacroTargetInput {
                cho: 50.0,
                pro: 20.0,
                fat: 30.0,
            },
            ..PlanInput::default()
        }
    }

    #[test]
    fn test_save_and_get_recomputes_summary() {
        let db = setup();
        let saved = save_plan(&db, "clinic-a", "meal_planner", Some("Week 1".into()), &input()).unwrap();

        let detail = get_plan(&db, "clinic-a", "meal_planner", saved.id).unwrap().unwrap();
        assert_eq!(detail.record.label.as_deref(), Some("Week 1"));
        assert!(detail.record.state.fat_breakdown);
        assert_eq!(detail.summary.exchange.totals.kcal, 4.0 * 80.0 + 2.0 * 45.0);
        assert_eq!(detail.summary.remainders[&FoodExchangeGroup::Starch].remainder, 1.0);
        assert_eq!(detail.summary.remainders[&FoodExchangeGroup::Fats].target, 2.0);
    }

    #[test]
    fn test_get_is_scoped_to_owner_and_tool() {
        let db = setup();
        let saved = save_plan(&db, "clinic-a", "meal_planner", None, &input()).unwrap();
        assert!(get_plan(&db, "clinic-b", "meal_planner", saved.id).unwrap().is_none());
        assert!(get_plan(&db, "clinic-a", "diet_template", saved.id).unwrap().is_none());
        assert!(matches!(
            get_plan(&db, "clinic-a", "spreadsheet", saved.id),
            Err(PlanToolError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_update_is_last_write_wins() {
        let db = setup();
        let saved = save_plan(&db, "clinic-a", "meal_planner", Some("Draft".into()), &input()).unwrap();

        let replacement = PlanInput {
            servings: BTreeMap::from([("fruit".to_string(), 3.0)]),
            ..PlanInput::default()
        };
        let updated = update_plan(&db, "clinic-a", "meal_planner", saved.id, None, &replacement)
            .unwrap()
            .unwrap();
        assert_eq!(updated.record.label.as_deref(), Some("Draft"));
        assert!(!updated.record.state.fat_breakdown);
        assert_eq!(updated.summary.exchange.totals.kcal, 180.0);

        assert!(update_plan(&db, "clinic-b", "meal_planner", saved.id, None, &replacement)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_writes_require_matching_tool_type() {
        let db = setup();
        let saved = save_plan(&db, "clinic-a", "diet_template", Some("Template".into()), &input()).unwrap();
        let replacement = PlanInput {
            servings: BTreeMap::from([("fruit".to_string(), 3.0)]),
            ..PlanInput::default()
        };

        assert!(update_plan(&db, "clinic-a", "meal_planner", saved.id, None, &replacement)
            .unwrap()
            .is_none());
        assert!(!delete_plan(&db, "clinic-a", "meal_planner", saved.id).unwrap());

        let kept = get_plan(&db, "clinic-a", "diet_template", saved.id).unwrap().unwrap();
        assert_eq!(kept.summary.exchange.totals.kcal, 4.0 * 80.0 + 2.0 * 45.0);
        assert!(delete_plan(&db, "clinic-a", "diet_template", saved.id).unwrap());
    }

    #[test]
    fn test_list_and_delete() {
        let db = setup();
        let a = save_plan(&db, "clinic-a", "meal_planner", None, &input()).unwrap();
        save_plan(&db, "clinic-a", "diet_template", None, &input()).unwrap();
        save_plan(&db, "clinic-b", "meal_planner", None, &input()).unwrap();

        assert_eq!(list_plans(&db, "clinic-a", None).unwrap().total, 2);
        assert_eq!(list_plans(&db, "clinic-a", Some("meal_planner")).unwrap().total, 1);

        assert!(delete_plan(&db, "clinic-a", "meal_planner", a.id).unwrap());
        assert!(!delete_plan(&db, "clinic-a", "meal_planner", a.id).unwrap());
        assert_eq!(list_plans(&db, "clinic-a", None).unwrap().total, 1);
    }

    #[test]
    fn test_save_rejects_blank_owner_and_bad_groups() {
        let db = setup();
        assert!(matches!(
            save_plan(&db, " ", "meal_planner", None, &input()),
            Err(PlanToolError::InvalidInput(_))
        ));
        let bad = PlanInput {
            servings: BTreeMap::from([("pasta".to_string(), 1.0)]),
            ..PlanInput::default()
        };
        assert!(matches!(
            save_plan(&db, "clinic-a", "meal_planner", None, &bad),
            Err(PlanToolError::InvalidInput(msg)) if msg.contains("pasta")
        ));
    }

    #[test]
    fn test_saved_plan_keeps_caller_fat_mode() {
        let db = setup();
        let aggregate = PlanInput {
            servings: BTreeMap::from([("fats".to_string(), 3.0), ("fats_sat".to_string(), 1.0)]),
            ..PlanInput::default()
        };
        let saved = save_plan(&db, "clinic-a", "meal_planner", None, &aggregate).unwrap();

        let detail = get_plan(&db, "clinic-a", "meal_planner", saved.id).unwrap().unwrap();
        assert!(!detail.record.state.fat_breakdown);
        assert_eq!(detail.record.state.servings[&FoodExchangeGroup::Fats], 3.0);
        assert_eq!(detail.summary.exchange.totals.fat, 15.0);
    }

    #[test]
    fn test_database_failures_are_not_input_errors() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            list_plans(&db, "clinic-a", None),
            Err(PlanToolError::Database { .. })
        ));
    }
}
