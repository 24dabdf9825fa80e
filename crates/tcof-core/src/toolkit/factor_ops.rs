//! Success-factor catalog operations for the Toolkit.

use jiff::Timestamp;
use log::warn;
use tokio::task;

use super::Toolkit;
use crate::{
    db::Database,
    error::{Result, ToolkitError},
    models::SuccessFactor,
    params::{FactorTask, RemoveFactorTask, UpsertFactor},
};

impl Toolkit {
    /// Lists all success factors in numeric identifier order.
    pub async fn list_factors(&self) -> Result<Vec<SuccessFactor>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_factors()
        })
        .await
        .map_err(|e| ToolkitError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a success factor by its ID.
    pub async fn get_factor(&self, id: &str) -> Result<Option<SuccessFactor>> {
        let db_path = self.db_path.clone();
        let id = id.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_factor(&id)
        })
        .await
        .map_err(|e| ToolkitError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Creates or replaces a success factor.
    ///
    /// A partial task map is repaired to all four stages before
    /// persisting; the repair is logged. After saving, the stored factor
    /// is read back and its per-stage task counts compared against what
    /// was submitted, so silent storage truncation shows up in the log
    /// instead of months later.
    pub async fn upsert_factor(&self, params: &UpsertFactor) -> Result<SuccessFactor> {
        let (tasks, repaired) = params.validate()?;
        if !repaired.is_empty() {
            warn!(
                "Factor '{}' submitted without tasks for stages {repaired:?}, repaired to empty",
                params.id
            );
        }

        let db_path = self.db_path.clone();
        let id = params.id.clone();
        let title = params.title.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;

            let now = Timestamp::now();
            let created_at = db
                .get_factor(&id)?
                .map(|existing| existing.created_at)
                .unwrap_or(now);

            let factor = SuccessFactor {
                id: id.clone(),
                title,
                tasks,
                created_at,
                updated_at: now,
            };
            db.upsert_factor(&factor)?;

            let stored = db.get_factor(&id)?.ok_or(ToolkitError::FactorNotFound {
                id: id.clone(),
            })?;

            // Read-back integrity check
            for (stage, submitted) in factor.tasks.iter() {
                let stored_count = stored.tasks.get(stage).len();
                if stored_count != submitted.len() {
                    warn!(
                        "Factor '{id}' stage {} stored {stored_count} tasks, submitted {}",
                        stage.as_str(),
                        submitted.len()
                    );
                }
            }

            Ok(stored)
        })
        .await
        .map_err(|e| ToolkitError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Appends a task to a success factor's stage array.
    ///
    /// Returns the updated factor, or `None` if the factor does not
    /// exist.
    pub async fn add_factor_task(&self, params: &FactorTask) -> Result<Option<SuccessFactor>> {
        if params.text.trim().is_empty() {
            return Err(ToolkitError::invalid_input(
                "text",
                "Task text must not be empty",
            ));
        }

        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let Some(mut factor) = db.get_factor(&params.factor_id)? else {
                return Ok(None);
            };

            factor.tasks.get_mut(params.stage).push(params.text);
            factor.updated_at = Timestamp::now();
            db.upsert_factor(&factor)?;

            Ok::<_, ToolkitError>(Some(factor))
        })
        .await
        .map_err(|e| ToolkitError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Removes a success-factor task by index.
    ///
    /// Returns `false` when the factor does not exist or the index is
    /// out of range; the factor is unchanged in either case.
    pub async fn remove_factor_task(&self, params: &RemoveFactorTask) -> Result<bool> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let Some(mut factor) = db.get_factor(&params.factor_id)? else {
                return Ok(false);
            };

            let tasks = factor.tasks.get_mut(params.stage);
            if params.index >= tasks.len() {
                return Ok(false);
            }
            tasks.remove(params.index);
            factor.updated_at = Timestamp::now();
            db.upsert_factor(&factor)?;

            Ok::<_, ToolkitError>(true)
        })
        .await
        .map_err(|e| ToolkitError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Permanently deletes a success factor.
    ///
    /// Returns `false` if no factor with this ID existed.
    pub async fn delete_factor(&self, id: &str) -> Result<bool> {
        let db_path = self.db_path.clone();
        let id = id.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_factor(&id)
        })
        .await
        .map_err(|e| ToolkitError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
