//! Success-factor catalog CRUD operations.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, Result, ToolkitError},
    models::SuccessFactor,
};

const SELECT_FACTOR_SQL: &str =
    "SELECT id, title, tasks, created_at, updated_at FROM factors WHERE id = ?1";
const LIST_FACTORS_SQL: &str = "SELECT id, title, tasks, created_at, updated_at FROM factors";
const UPSERT_FACTOR_SQL: &str = "INSERT INTO factors (id, title, tasks, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(id) DO UPDATE SET title = excluded.title, tasks = excluded.tasks, updated_at = excluded.updated_at";
const DELETE_FACTOR_SQL: &str = "DELETE FROM factors WHERE id = ?1";

fn factor_row(row: &Row<'_>) -> rusqlite::Result<SuccessFactor> {
    let tasks = serde_json::from_str(&row.get::<_, String>(2)?)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    Ok(SuccessFactor {
        id: row.get(0)?,
        title: row.get(1)?,
        tasks,
        created_at: row
            .get::<_, String>(3)?
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?,
        updated_at: row
            .get::<_, String>(4)?
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?,
    })
}

/// Sort key for "<major>.<minor>" identifiers so "10.1" sorts after "2.1".
fn numeric_id_key(id: &str) -> (u32, u32) {
    let mut parts = id.split('.');
    let major = parts.next().and_then(|p| p.parse().ok()).unwrap_or(u32::MAX);
    let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(u32::MAX);
    (major, minor)
}

impl super::Database {
    /// Retrieves a success factor by its ID.
    pub fn get_factor(&self, id: &str) -> Result<Option<SuccessFactor>> {
        self.connection
            .query_row(SELECT_FACTOR_SQL, params![id], factor_row)
            .optional()
            .map_err(|e| ToolkitError::database("Failed to query factor", e))
    }

    /// Lists all success factors in numeric identifier order.
    pub fn list_factors(&self) -> Result<Vec<SuccessFactor>> {
        let mut stmt = self
            .connection
            .prepare(LIST_FACTORS_SQL)
            .map_err(|e| ToolkitError::database("Failed to prepare query", e))?;

        let mut factors: Vec<SuccessFactor> = stmt
            .query_map([], factor_row)
            .map_err(|e| ToolkitError::database("Failed to query factors", e))?
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| ToolkitError::database("Failed to fetch factors", e))?;

        factors.sort_by_key(|f| numeric_id_key(&f.id));
        Ok(factors)
    }

    /// Creates or replaces a success factor.
    pub fn upsert_factor(&mut self, factor: &SuccessFactor) -> Result<()> {
        let tasks = serde_json::to_string(&factor.tasks)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            UPSERT_FACTOR_SQL,
            params![
                factor.id,
                factor.title,
                tasks,
                factor.created_at.to_string(),
                factor.updated_at.to_string()
            ],
        )
        .map_err(|e| ToolkitError::database("Failed to upsert factor", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Permanently deletes a success factor.
    ///
    /// Returns `false` if no factor with this ID existed.
    pub fn delete_factor(&mut self, id: &str) -> Result<bool> {
        let rows_affected = self
            .connection
            .execute(DELETE_FACTOR_SQL, params![id])
            .map_err(|e| ToolkitError::database("Failed to delete factor", e))?;

        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_key_orders_by_magnitude() {
        assert!(numeric_id_key("2.1") < numeric_id_key("10.1"));
        assert!(numeric_id_key("1.9") < numeric_id_key("1.10"));
    }
}
