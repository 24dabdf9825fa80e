//! Parameter structures for toolkit operations.
//!
//! Interface-agnostic request types shared by the CLI (and any future
//! interface) without framework-specific derives. Interfaces wrap these
//! with their own argument structs and convert via `From`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, ToolkitError},
    models::{validate_factor_id, Block, Stage, StageMap},
};

/// Generic parameters for operations requiring just a plan ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the plan to operate on
    pub id: u64,
}

/// Parameters for permanently deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletePlan {
    /// The ID of the plan to delete
    pub id: u64,
    /// Explicit confirmation flag; deletion is refused without it
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for recording the chosen delivery zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetZone {
    pub plan_id: u64,
    /// Zone code from the catalog, e.g. "B2"
    pub zone: String,
}

/// Parameters for toggling a framework selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToggleFramework {
    pub plan_id: u64,
    /// Framework code, e.g. "AGILEPM"
    pub code: String,
}

/// Parameters for toggling one good-practice task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleTask {
    pub plan_id: u64,
    pub stage: Stage,
    pub framework_code: String,
    /// Exact task text; toggling is set membership on it
    pub text: String,
}

/// Parameters for creating a custom framework.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCustomFramework {
    pub plan_id: u64,
    /// User-supplied label
    pub name: String,
}

/// Parameters addressing one custom-framework task by text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomTask {
    pub plan_id: u64,
    pub framework_id: String,
    pub stage: Stage,
    pub text: String,
}

/// Parameters addressing one custom-framework task by index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveCustomTask {
    pub plan_id: u64,
    pub framework_id: String,
    pub stage: Stage,
    /// 0-based index into the stage's task array
    pub index: usize,
}

/// Parameters for removing a custom framework.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoveCustomFramework {
    pub plan_id: u64,
    pub framework_id: String,
}

/// Parameters for the clear operations.
///
/// Exactly one of `block` or `stage` is expected; `validate` enforces
/// it so interfaces do not have to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClearPlan {
    pub plan_id: u64,
    /// Clear this block's fields across all stages
    pub block: Option<Block>,
    /// Clear only this stage's good-practice record
    pub stage: Option<Stage>,
}

impl ClearPlan {
    /// Validates that the request addresses exactly one scope.
    pub fn validate(&self) -> Result<()> {
        match (&self.block, &self.stage) {
            (Some(_), Some(_)) => Err(ToolkitError::invalid_input(
                "scope",
                "Provide either a block or a stage to clear, not both",
            )),
            (None, None) => Err(ToolkitError::invalid_input(
                "scope",
                "Provide a block or a stage to clear",
            )),
            _ => Ok(()),
        }
    }
}

/// Parameters for creating or replacing a success factor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertFactor {
    /// Factor identifier, conventionally "<major>.<minor>"
    pub id: String,
    /// Display name
    pub title: String,
    /// Optional string-keyed stage task map; missing stages are repaired
    /// to empty arrays before persisting
    #[serde(default)]
    pub tasks: Option<BTreeMap<String, Vec<String>>>,
}

impl UpsertFactor {
    /// Validates the identifier and title, and repairs the task map.
    ///
    /// Returns the complete stage map plus the list of stages that had
    /// to be repaired, so callers can report the repair.
    pub fn validate(&self) -> Result<(StageMap<Vec<String>>, Vec<Stage>)> {
        validate_factor_id(&self.id)
            .map_err(|reason| ToolkitError::invalid_input("id", reason))?;
        if self.title.trim().is_empty() {
            return Err(ToolkitError::invalid_input(
                "title",
                "Factor title must not be empty",
            ));
        }

        let (tasks, repaired) = match &self.tasks {
            Some(map) => {
                let mut normalized = BTreeMap::new();
                for (key, texts) in map {
                    let stage = key
                        .parse::<Stage>()
                        .map_err(|reason| ToolkitError::invalid_input("tasks", reason))?;
                    normalized.insert(stage.as_str().to_string(), texts.clone());
                }
                StageMap::from_partial(normalized)
            }
            None => (StageMap::default(), Vec::new()),
        };
        Ok((tasks, repaired))
    }
}

/// Parameters for appending a task to a success factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorTask {
    pub factor_id: String,
    pub stage: Stage,
    pub text: String,
}

/// Parameters for removing a success-factor task by index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveFactorTask {
    pub factor_id: String,
    pub stage: Stage,
    /// 0-based index into the stage's task array
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_plan_requires_exactly_one_scope() {
        let both = ClearPlan {
            plan_id: 1,
            block: Some(Block::Complete),
            stage: Some(Stage::Delivery),
        };
        assert!(both.validate().is_err());

        let neither = ClearPlan { plan_id: 1, block: None, stage: None };
        assert!(neither.validate().is_err());

        let block_only = ClearPlan {
            plan_id: 1,
            block: Some(Block::Discover),
            stage: None,
        };
        assert!(block_only.validate().is_ok());
    }

    #[test]
    fn test_upsert_factor_validates_id() {
        let params = UpsertFactor {
            id: "not-an-id".to_string(),
            title: "Plan for benefits".to_string(),
            tasks: None,
        };
        match params.validate() {
            Err(ToolkitError::InvalidInput { field, .. }) => assert_eq!(field, "id"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_upsert_factor_repairs_partial_task_map() {
        let mut tasks = BTreeMap::new();
        tasks.insert("delivery".to_string(), vec!["Track benefits".to_string()]);
        let params = UpsertFactor {
            id: "1.3".to_string(),
            title: "Plan for benefits".to_string(),
            tasks: Some(tasks),
        };

        let (map, repaired) = params.validate().expect("valid params");
        assert_eq!(map.get(Stage::Delivery).len(), 1);
        assert_eq!(repaired.len(), 3);
    }

    #[test]
    fn test_upsert_factor_rejects_unknown_stage_key() {
        let mut tasks = BTreeMap::new();
        tasks.insert("inception".to_string(), Vec::new());
        let params = UpsertFactor {
            id: "1.3".to_string(),
            title: "Plan for benefits".to_string(),
            tasks: Some(tasks),
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_upsert_factor_rejects_blank_title() {
        let params = UpsertFactor {
            id: "1.3".to_string(),
            title: "   ".to_string(),
            tasks: None,
        };
        assert!(params.validate().is_err());
    }
}
