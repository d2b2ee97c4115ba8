//! Plan record model
//!
//! Saved planner state. The store only keeps and replays the caller's
//! state; totals and remainders are recomputed on load.

use std::collections::BTreeMap;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use super::{
    FoodExchangeGroup, MacroTargets, MealDistribution, ServingPlan, ServingPlanRecord,
    TargetMode, TargetSpec,
};

/// Planner tool that owns a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    MealPlanner,
    DietTemplate,
    MealDistribution,
}

impl ToolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::MealPlanner => "meal_planner",
            ToolType::DietTemplate => "diet_template",
            ToolType::MealDistribution => "meal_distribution",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "meal_planner" | "planner" => Some(ToolType::MealPlanner),
            "diet_template" | "template" => Some(ToolType::DietTemplate),
            "meal_distribution" | "distribution" => Some(ToolType::MealDistribution),
            _ => None,
        }
    }
}

impl FromSql for ToolType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        ToolType::from_str(s).ok_or_else(|| FromSqlError::Other(format!("unknown tool type: {}", s).into()))
    }
}

/// Serialized planner state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanState {
    #[serde(default)]
    pub servings: BTreeMap<FoodExchangeGroup, f64>,
    #[serde(default)]
    pub fat_breakdown: bool,
    #[serde(default)]
    pub distribution: MealDistribution,
    #[serde(default)]
    pub target_kcal: f64,
    #[serde(default)]
    pub target_mode: TargetMode,
    #[serde(default)]
    pub manual_gram_targets: MacroTargets,
    #[serde(default)]
    pub manual_percent_targets: MacroTargets,
}

impl PlanState {
    pub fn from_parts(plan: &ServingPlan, distribution: &MealDistribution, targets: &TargetSpec) -> Self {
        let record = ServingPlanRecord::from(plan.clone());
        Self {
            servings: record.servings,
            fat_breakdown: record.fat_breakdown,
            distribution: distribution.clone(),
            target_kcal: targets.target_kcal,
            target_mode: targets.mode,
            manual_gram_targets: targets.manual_grams,
            manual_percent_targets: targets.manual_percent,
        }
    }

    pub fn serving_plan(&self) -> ServingPlan {
        ServingPlan::from(ServingPlanRecord {
            servings: self.servings.clone(),
            fat_breakdown: self.fat_breakdown,
        })
    }

    pub fn targets(&self) -> TargetSpec {
        TargetSpec {
            target_kcal: self.target_kcal,
            mode: self.target_mode,
            manual_grams: self.manual_gram_targets,
            manual_percent: self.manual_percent_targets,
        }
    }
}

/// A saved plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRecord {
    pub id: i64,
    pub owner: String,
    pub tool_type: ToolType,
    pub label: Option<String>,
    pub state: PlanState,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a plan record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRecordCreate {
    pub owner: String,
    pub tool_type: ToolType,
    pub label: Option<String>,
    pub state: PlanState,
}

/// Listing entry without the payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRecordSummary {
    pub id: i64,
    pub tool_type: ToolType,
    pub label: Option<String>,
    pub updated_at: String,
}

impl PlanRecord {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<(Self, String)> {
        let payload: String = row.get("payload")?;
        Ok((
            Self {
                id: row.get("id")?,
                owner: row.get("owner")?,
                tool_type: row.get("tool_type")?,
                label: row.get("label")?,
                state: PlanState::default(),
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")?,
            },
            payload,
        ))
    }

    fn decode((mut record, payload): (Self, String)) -> DbResult<Self> {
        record.state = serde_json::from_str(&payload)?;
        Ok(record)
    }

    /// Insert a new record
    pub fn create(conn: &Connection, data: &PlanRecordCreate) -> DbResult<Self> {
        let payload = serde_json::to_string(&data.state)?;
        conn.execute(
            "INSERT INTO plan_records (owner, tool_type, label, payload) VALUES (?1, ?2, ?3, ?4)",
            params![data.owner, data.tool_type.as_str(), data.label, payload],
        )?;

        let id = conn.last_insert_rowid();
        tracing::info!(id, owner = %data.owner, tool_type = data.tool_type.as_str(), "Saved plan record");
        Self::get_by_id(conn, id)?.ok_or_else(|| DbError::NotFound(format!("plan record {}", id)))
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM plan_records WHERE id = ?1")?;
        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(raw) => Ok(Some(Self::decode(raw)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch by the full (owner, tool type, id) key
    pub fn get(conn: &Connection, owner: &str, tool_type: ToolType, id: i64) -> DbResult<Option<Self>> {
        Ok(Self::get_by_id(conn, id)?
            .filter(|record| record.owner == owner && record.tool_type == tool_type))
    }

    /// Records of an owner, most recently updated first
    pub fn list(conn: &Connection, owner: &str, tool_type: Option<ToolType>) -> DbResult<Vec<PlanRecordSummary>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, tool_type, label, updated_at FROM plan_records
            WHERE owner = ?1 AND (?2 IS NULL OR tool_type = ?2)
            ORDER BY updated_at DESC, id DESC
            "#,
        )?;

        let rows = stmt.query_map(params![owner, tool_type.map(|t| t.as_str())], |row| {
            Ok(PlanRecordSummary {
                id: row.get("id")?,
                tool_type: row.get("tool_type")?,
                label: row.get("label")?,
                updated_at: row.get("updated_at")?,
            })
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(row?);
        }
        Ok(summaries)
    }

    /// Replace the stored state (last write wins)
    pub fn update_state(
        conn: &Connection,
        owner: &str,
        tool_type: ToolType,
        id: i64,
        state: &PlanState,
        label: Option<&str>,
    ) -> DbResult<Self> {
        let payload = serde_json::to_string(state)?;
        let changed = conn.execute(
            r#"
            UPDATE plan_records
            SET payload = ?1, label = COALESCE(?2, label), updated_at = datetime('now')
            WHERE id = ?3 AND owner = ?4 AND tool_type = ?5
            "#,
            params![payload, label, id, owner, tool_type.as_str()],
        )?;
        if changed == 0 {
            return Err(DbError::NotFound(format!("plan record {}", id)));
        }

        tracing::info!(id, owner, tool_type = tool_type.as_str(), "Updated plan record");
        Self::get_by_id(conn, id)?.ok_or_else(|| DbError::NotFound(format!("plan record {}", id)))
    }

    /// Delete a record; returns false when nothing matched
    pub fn delete(conn: &Connection, owner: &str, tool_type: ToolType, id: i64) -> DbResult<bool> {
        let changed = conn.execute(
            "DELETE FROM plan_records WHERE id = ?1 AND owner = ?2 AND tool_type = ?3",
            params![id, owner, tool_type.as_str()],
        )?;
        if changed > 0 {
            tracing::info!(id, owner, tool_type = tool_type.as_str(), "Deleted plan record");
        }
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::MealSlot;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn sample_state() -> PlanState {
        let mut plan = ServingPlan::from_pairs([
            (FoodExchangeGroup::Starch, 6.0),
            (FoodExchangeGroup::Veg, 4.0),
        ]);
        plan.set_fat_breakdown(true);
        plan.set(FoodExchangeGroup::FatsMufa, 2.0);

        let mut distribution = MealDistribution::new();
        distribution.set(FoodExchangeGroup::Starch, MealSlot::Breakfast, 2.0);
        distribution.set(FoodExchangeGroup::FatsMufa, MealSlot::Lunch, 1.0);

        let targets = TargetSpec {
            target_kcal: 1800.0,
            mode: TargetMode::Percent,
            manual_grams: MacroTargets { cho: 220.0, pro: 80.0, fat: 60.0 },
            manual_percent: MacroTargets { cho: 50.0, pro: 20.0, fat: 30.0 },
        };
        PlanState::from_parts(&plan, &distribution, &targets)
    }

    #[test]
    fn test_state_round_trips_through_store() {
        let conn = setup();
        let state = sample_state();
        let created = PlanRecord::create(
            &conn,
            &PlanRecordCreate {
                owner: "dietitian-1".into(),
                tool_type: ToolType::MealPlanner,
                label: Some("Week 1".into()),
                state: state.clone(),
            },
        )
        .unwrap();

        let loaded = PlanRecord::get(&conn, "dietitian-1", ToolType::MealPlanner, created.id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.state, state);
        assert_eq!(loaded.state.serving_plan(), sample_state().serving_plan());
        assert_eq!(loaded.state.targets().mode, TargetMode::Percent);
    }

    #[test]
    fn test_get_requires_matching_owner_and_tool() {
        let conn = setup();
        let created = PlanRecord::create(
            &conn,
            &PlanRecordCreate {
                owner: "a".into(),
                tool_type: ToolType::MealDistribution,
                label: None,
                state: PlanState::default(),
            },
        )
        .unwrap();

        assert!(PlanRecord::get(&conn, "b", ToolType::MealDistribution, created.id).unwrap().is_none());
        assert!(PlanRecord::get(&conn, "a", ToolType::MealPlanner, created.id).unwrap().is_none());
        assert!(PlanRecord::get(&conn, "a", ToolType::MealDistribution, created.id).unwrap().is_some());
    }

    #[test]
    fn test_update_is_last_write_wins() {
        let conn = setup();
        let created = PlanRecord::create(
            &conn,
            &PlanRecordCreate {
                owner: "a".into(),
                tool_type: ToolType::MealPlanner,
                label: Some("draft".into()),
                state: PlanState::default(),
            },
        )
        .unwrap();

        let first = PlanState { target_kcal: 1500.0, ..PlanState::default() };
        let second = PlanState { target_kcal: 1700.0, ..PlanState::default() };
        PlanRecord::update_state(&conn, "a", ToolType::MealPlanner, created.id, &first, None).unwrap();
        let updated =
            PlanRecord::update_state(&conn, "a", ToolType::MealPlanner, created.id, &second, None).unwrap();

        assert_eq!(updated.state.target_kcal, 1700.0);
        assert_eq!(updated.label.as_deref(), Some("draft"));
        assert!(matches!(
            PlanRecord::update_state(&conn, "other", ToolType::MealPlanner, created.id, &first, None),
            Err(DbError::NotFound(_))
        ));
        assert!(matches!(
            PlanRecord::update_state(&conn, "a", ToolType::DietTemplate, created.id, &first, None),
            Err(DbError::NotFound(_))
        ));
        let unchanged = PlanRecord::get(&conn, "a", ToolType::MealPlanner, created.id).unwrap().unwrap();
        assert_eq!(unchanged.state.target_kcal, 1700.0);
    }

    #[test]
    fn test_list_and_delete() {
        let conn = setup();
        for tool_type in [ToolType::MealPlanner, ToolType::DietTemplate] {
            PlanRecord::create(
                &conn,
                &PlanRecordCreate {
                    owner: "a".into(),
                    tool_type,
                    label: None,
                    state: PlanState::default(),
                },
            )
            .unwrap();
        }

        assert_eq!(PlanRecord::list(&conn, "a", None).unwrap().len(), 2);
        let planners = PlanRecord::list(&conn, "a", Some(ToolType::MealPlanner)).unwrap();
        assert_eq!(planners.len(), 1);

        assert!(!PlanRecord::delete(&conn, "a", ToolType::DietTemplate, planners[0].id).unwrap());
        assert!(PlanRecord::delete(&conn, "a", ToolType::MealPlanner, planners[0].id).unwrap());
        assert!(!PlanRecord::delete(&conn, "a", ToolType::MealPlanner, planners[0].id).unwrap());
        assert_eq!(PlanRecord::list(&conn, "a", None).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_stored_tool_type_is_an_error() {
        let conn = setup();
        conn.execute_batch("PRAGMA ignore_check_constraints = ON").unwrap();
        conn.execute(
            "INSERT INTO plan_records (owner, tool_type, payload) VALUES ('a', 'spreadsheet', '{}')",
            [],
        )
        .unwrap();
        let id = conn.last_insert_rowid();

        assert!(PlanRecord::get_by_id(&conn, id).is_err());
        assert!(PlanRecord::list(&conn, "a", None).is_err());
    }
}
