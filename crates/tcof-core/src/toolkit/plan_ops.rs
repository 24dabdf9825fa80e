//! Plan operations for the Toolkit.

use log::{error, warn};
use tokio::task;

use super::Toolkit;
use crate::{
    checklist::{self, Checklist},
    db::Database,
    error::{Result, ToolkitError},
    models::{Plan, PlanSummary},
    mutate::{self, CommandOutcome, PlanCommand},
    params::{DeletePlan, Id},
};

impl Toolkit {
    /// Creates a new empty plan with all four stages pre-populated.
    pub async fn create_plan(&self) -> Result<Plan> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_plan()
        })
        .await
        .map_err(|e| ToolkitError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a plan by its ID.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_plan(plan_id)
        })
        .await
        .map_err(|e| ToolkitError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists summaries of all plans, newest first.
    pub async fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_plans()
        })
        .await
        .map_err(|e| ToolkitError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Persists the full state of a plan.
    ///
    /// Returns `false` when no plan row with this ID exists.
    pub async fn save_plan(&self, plan: &Plan) -> Result<bool> {
        let db_path = self.db_path.clone();
        let plan = plan.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.save_plan(&plan)
        })
        .await
        .map_err(|e| ToolkitError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Permanently deletes a plan. This operation cannot be undone.
    ///
    /// Requires `confirmed` to be set; returns the deleted plan's last
    /// state, or `None` if it did not exist.
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<Option<Plan>> {
        if !params.confirmed {
            return Err(ToolkitError::invalid_input(
                "confirmed",
                "Plan deletion must be explicitly confirmed",
            ));
        }

        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_plan(plan_id)
        })
        .await
        .map_err(|e| ToolkitError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Loads a plan, applies one command, and persists the result.
    ///
    /// This is the sentinel entry point for interactive callers: any
    /// storage failure is logged and collapses to `None`, so a missing
    /// plan and a dead disk look the same to the caller, and neither
    /// aborts an interactive session. Callers needing to distinguish
    /// failures use [`Toolkit::get_plan`] and [`Toolkit::save_plan`]
    /// with [`crate::mutate::apply`] directly.
    pub async fn apply_command(
        &self,
        plan_id: u64,
        command: PlanCommand,
    ) -> Option<(Plan, CommandOutcome)> {
        let db_path = self.db_path.clone();
        let catalog = self.catalog.clone();

        let result = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let Some(mut plan) = db.get_plan(plan_id)? else {
                warn!("Cannot apply command: plan {plan_id} not found");
                return Ok(None);
            };

            let outcome = mutate::apply(&mut plan, &command, &catalog);
            if !db.save_plan(&plan)? {
                warn!("Plan {plan_id} vanished while applying command");
                return Ok(None);
            }

            Ok::<_, ToolkitError>(Some((plan, outcome)))
        })
        .await;

        match result {
            Ok(Ok(applied)) => applied,
            Ok(Err(e)) => {
                error!("Failed to apply command to plan {plan_id}: {e}");
                None
            }
            Err(e) => {
                error!("Task join error while applying command: {e}");
                None
            }
        }
    }

    /// Generates the flattened checklist view of a plan.
    pub async fn checklist(&self, params: &Id) -> Result<Option<Checklist>> {
        let plan = self.get_plan(params).await?;
        Ok(plan.as_ref().map(checklist::generate))
    }
}
