//! Plan CRUD operations and queries.

use std::collections::BTreeMap;

use jiff::Timestamp;
use log::warn;
use rusqlite::{params, types::Type, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, Result, ToolkitError},
    models::{Plan, PlanSummary, Stage, StageData, StageMap},
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_PLAN_SQL: &str =
    "INSERT INTO plans (completed, created_at, updated_at) VALUES (?1, ?2, ?3)";
const INSERT_STAGE_DATA_SQL: &str = "INSERT INTO stage_data (plan_id, stage, good_practice, mappings, policy_tasks, framework_tasks) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_PLAN_SQL: &str =
    "SELECT id, completed, created_at, updated_at FROM plans WHERE id = ?1";
const SELECT_STAGE_DATA_SQL: &str = "SELECT stage, good_practice, mappings, policy_tasks, framework_tasks FROM stage_data WHERE plan_id = ?1";
const LIST_PLANS_SQL: &str =
    "SELECT id, completed, created_at, updated_at FROM plans ORDER BY id DESC";
const UPDATE_PLAN_SQL: &str = "UPDATE plans SET completed = ?1, updated_at = ?2 WHERE id = ?3";
const UPSERT_STAGE_DATA_SQL: &str = "INSERT INTO stage_data (plan_id, stage, good_practice, mappings, policy_tasks, framework_tasks) VALUES (?1, ?2, ?3, ?4, ?5, ?6) ON CONFLICT(plan_id, stage) DO UPDATE SET good_practice = excluded.good_practice, mappings = excluded.mappings, policy_tasks = excluded.policy_tasks, framework_tasks = excluded.framework_tasks";
const DELETE_STAGE_DATA_SQL: &str = "DELETE FROM stage_data WHERE plan_id = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

/// Maps a `plans` row to its scalar columns.
fn plan_row(row: &Row<'_>) -> rusqlite::Result<(u64, bool, Timestamp, Timestamp)> {
    let id = row.get::<_, i64>(0)? as u64;
    let completed: bool = row.get(1)?;
    let created_at = row
        .get::<_, String>(2)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    let updated_at = row
        .get::<_, String>(3)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    Ok((id, completed, created_at, updated_at))
}

/// Maps a `stage_data` row into its stage key and deserialized payload.
fn stage_data_row(row: &Row<'_>) -> rusqlite::Result<(String, StageData)> {
    let stage: String = row.get(0)?;
    let good_practice = match row.get::<_, Option<String>>(1)? {
        Some(json) => Some(serde_json::from_str(&json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
        })?),
        None => None,
    };
    let mappings = serde_json::from_str(&row.get::<_, String>(2)?)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    let policy_tasks = serde_json::from_str(&row.get::<_, String>(3)?)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    let framework_tasks = serde_json::from_str(&row.get::<_, String>(4)?)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok((
        stage,
        StageData {
            good_practice,
            mappings,
            policy_tasks,
            framework_tasks,
        },
    ))
}

impl super::Database {
    /// Creates a new empty plan with all four stage rows pre-populated.
    pub fn create_plan(&mut self) -> Result<Plan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(INSERT_PLAN_SQL, params![false, &now_str, &now_str])
            .map_err(|e| ToolkitError::database("Failed to insert plan", e))?;

        let id = tx.last_insert_rowid() as u64;

        for stage in Stage::ALL {
            tx.execute(
                INSERT_STAGE_DATA_SQL,
                params![id as i64, stage.as_str(), None::<String>, "[]", "[]", "[]"],
            )
            .map_err(|e| ToolkitError::database("Failed to insert stage data", e))?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Plan::empty(id, now))
    }

    /// Retrieves a plan by its ID, including all four stages.
    ///
    /// Missing stage rows are healed to empty data on read; the repair
    /// is logged and persisted on the next save.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        let header = self
            .connection
            .query_row(SELECT_PLAN_SQL, params![id as i64], plan_row)
            .optional()
            .map_err(|e| ToolkitError::database("Failed to query plan", e))?;

        let Some((id, completed, created_at, updated_at)) = header else {
            return Ok(None);
        };

        let mut stmt = self
            .connection
            .prepare(SELECT_STAGE_DATA_SQL)
            .map_err(|e| ToolkitError::database("Failed to prepare query", e))?;

        let rows: BTreeMap<String, StageData> = stmt
            .query_map(params![id as i64], stage_data_row)
            .map_err(|e| ToolkitError::database("Failed to query stage data", e))?
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| ToolkitError::database("Failed to fetch stage data", e))?;

        let (stages, repaired) = StageMap::from_partial(rows);
        if !repaired.is_empty() {
            warn!("Plan {id} was missing stage rows, repaired: {repaired:?}");
        }

        Ok(Some(Plan {
            id,
            stages,
            completed,
            created_at,
            updated_at,
        }))
    }

    /// Lists summaries of all plans, newest first.
    pub fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        let mut stmt = self
            .connection
            .prepare(LIST_PLANS_SQL)
            .map_err(|e| ToolkitError::database("Failed to prepare query", e))?;

        let headers: Vec<(u64, bool, Timestamp, Timestamp)> = stmt
            .query_map([], plan_row)
            .map_err(|e| ToolkitError::database("Failed to query plans", e))?
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| ToolkitError::database("Failed to fetch plans", e))?;

        let mut summaries = Vec::with_capacity(headers.len());
        for (id, ..) in headers {
            if let Some(plan) = self.get_plan(id)? {
                summaries.push(PlanSummary::from(&plan));
            }
        }

        Ok(summaries)
    }

    /// Persists the full state of a plan.
    ///
    /// Returns `false` when no plan row with this ID exists; the caller
    /// decides whether that is an error.
    pub fn save_plan(&mut self, plan: &Plan) -> Result<bool> {
        // Serialize stage payloads before touching the database so a bad
        // document never leaves a half-written transaction behind.
        let mut payloads = Vec::with_capacity(4);
        for (stage, data) in plan.stages.iter() {
            let good_practice = data
                .good_practice
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?;
            payloads.push((
                stage,
                good_practice,
                serde_json::to_string(&data.mappings)?,
                serde_json::to_string(&data.policy_tasks)?,
                serde_json::to_string(&data.framework_tasks)?,
            ));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let rows_affected = tx
            .execute(
                UPDATE_PLAN_SQL,
                params![plan.completed, plan.updated_at.to_string(), plan.id as i64],
            )
            .map_err(|e| ToolkitError::database("Failed to update plan", e))?;

        if rows_affected == 0 {
            return Ok(false);
        }

        for (stage, good_practice, mappings, policy_tasks, framework_tasks) in payloads {
            tx.execute(
                UPSERT_STAGE_DATA_SQL,
                params![
                    plan.id as i64,
                    stage.as_str(),
                    good_practice,
                    mappings,
                    policy_tasks,
                    framework_tasks
                ],
            )
            .map_err(|e| ToolkitError::database("Failed to upsert stage data", e))?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(true)
    }

    /// Permanently deletes a plan and all its stage data.
    ///
    /// Returns the deleted plan's last state, or `None` if it did not
    /// exist. This operation cannot be undone.
    pub fn delete_plan(&mut self, id: u64) -> Result<Option<Plan>> {
        let Some(plan) = self.get_plan(id)? else {
            return Ok(None);
        };

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        // Foreign key cascade covers stage rows, but we'll be explicit
        tx.execute(DELETE_STAGE_DATA_SQL, params![id as i64])
            .map_err(|e| ToolkitError::database("Failed to delete stage data", e))?;
        tx.execute(DELETE_PLAN_SQL, params![id as i64])
            .map_err(|e| ToolkitError::database("Failed to delete plan", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some(plan))
    }
}
