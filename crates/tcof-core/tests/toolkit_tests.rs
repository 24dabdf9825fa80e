use std::collections::BTreeMap;

use tcof_core::{
    models::{Stage, TaskSource},
    mutate::{self, CommandOutcome, PlanCommand},
    params::{DeletePlan, FactorTask, Id, RemoveFactorTask, UpsertFactor},
    ToolkitBuilder, ToolkitError,
};

mod common;
use common::create_test_toolkit;

#[tokio::test]
async fn test_complete_plan_workflow() {
    let (_temp_dir, toolkit) = create_test_toolkit().await;

    // Create a plan
    let plan = toolkit.create_plan().await.expect("Failed to create plan");
    assert!(plan.id > 0);
    assert!(plan.zone().is_none());
    assert!(!plan.completed);

    // Choose a zone
    let (plan, outcome) = toolkit
        .apply_command(
            plan.id,
            PlanCommand::SetZone {
                zone: "B2".to_string(),
            },
        )
        .await
        .expect("Zone command should apply");
    assert_eq!(outcome, CommandOutcome::Done);
    assert_eq!(plan.zone(), Some("B2"));

    // Select a framework; its catalog tasks expand into the plan
    let (plan, outcome) = toolkit
        .apply_command(
            plan.id,
            PlanCommand::ToggleFramework {
                code: "AGILEPM".to_string(),
            },
        )
        .await
        .expect("Framework command should apply");
    assert_eq!(outcome, CommandOutcome::Toggled { on: true });
    assert_eq!(plan.frameworks(), ["AGILEPM".to_string()]);

    // The round trip through storage preserves the expanded tasks
    let reloaded = toolkit
        .get_plan(&Id { id: plan.id })
        .await
        .expect("Failed to reload plan")
        .expect("Plan should exist");
    assert_eq!(reloaded, plan);

    // Checklist flattens the framework tasks with their source tag
    let checklist = toolkit
        .checklist(&Id { id: plan.id })
        .await
        .expect("Failed to generate checklist")
        .expect("Plan should exist");
    assert!(!checklist.items.is_empty());
    assert!(checklist
        .items
        .iter()
        .all(|item| item.source == TaskSource::Framework));

    // Mark the plan complete and verify the summary reflects it
    let (plan, _) = toolkit
        .apply_command(plan.id, PlanCommand::MarkComplete { value: true })
        .await
        .expect("Complete command should apply");
    assert!(plan.completed);

    let summaries = toolkit.list_plans().await.expect("Failed to list plans");
    assert_eq!(summaries.len(), 1);
    assert!(summaries[0].completed);
    assert_eq!(summaries[0].zone.as_deref(), Some("B2"));

    // Delete with confirmation
    let deleted = toolkit
        .delete_plan(&DeletePlan {
            id: plan.id,
            confirmed: true,
        })
        .await
        .expect("Failed to delete plan");
    assert!(deleted.is_some());

    let gone = toolkit
        .get_plan(&Id { id: plan.id })
        .await
        .expect("Lookup should succeed");
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let (_temp_dir, toolkit) = create_test_toolkit().await;
    let plan = toolkit.create_plan().await.expect("Failed to create plan");

    let result = toolkit
        .delete_plan(&DeletePlan {
            id: plan.id,
            confirmed: false,
        })
        .await;
    assert!(matches!(result, Err(ToolkitError::InvalidInput { .. })));

    // The plan survives the refused deletion
    let still_there = toolkit
        .get_plan(&Id { id: plan.id })
        .await
        .expect("Lookup should succeed");
    assert!(still_there.is_some());
}

#[tokio::test]
async fn test_missing_plan_lookups_return_none() {
    let (_temp_dir, toolkit) = create_test_toolkit().await;

    let plan = toolkit
        .get_plan(&Id { id: 999 })
        .await
        .expect("Lookup should succeed");
    assert!(plan.is_none());

    let checklist = toolkit
        .checklist(&Id { id: 999 })
        .await
        .expect("Checklist lookup should succeed");
    assert!(checklist.is_none());

    let applied = toolkit
        .apply_command(
            999,
            PlanCommand::SetZone {
                zone: "A1".to_string(),
            },
        )
        .await;
    assert!(applied.is_none());
}

#[tokio::test]
async fn test_apply_command_collapses_storage_failure_to_none() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let data_dir = temp_dir.path().join("data");
    let db_path = data_dir.join("test.db");
    let toolkit = ToolkitBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create toolkit");

    let mut plan = toolkit.create_plan().await.expect("Failed to create plan");

    // Pull the storage out from under the toolkit
    std::fs::remove_dir_all(&data_dir).expect("Failed to remove data dir");

    // A direct save fails as an error, leaving the document untouched
    mutate::set_zone(&mut plan, "B2");
    let snapshot = plan.clone();
    assert!(toolkit.save_plan(&plan).await.is_err());
    assert_eq!(plan, snapshot);

    // The sentinel path collapses the same failure to None
    let applied = toolkit
        .apply_command(
            plan.id,
            PlanCommand::ToggleFramework {
                code: "AGILEPM".to_string(),
            },
        )
        .await;
    assert!(applied.is_none(), "Storage failure must not panic or error");
    assert_eq!(plan, snapshot);
}

#[tokio::test]
async fn test_custom_framework_workflow() {
    let (_temp_dir, toolkit) = create_test_toolkit().await;
    let plan = toolkit.create_plan().await.expect("Failed to create plan");

    let (plan, outcome) = toolkit
        .apply_command(
            plan.id,
            PlanCommand::CreateCustomFramework {
                name: "Team rituals".to_string(),
            },
        )
        .await
        .expect("Create command should apply");
    let CommandOutcome::Created { id: cf_id } = outcome else {
        panic!("Expected Created outcome, got {outcome:?}");
    };
    assert_eq!(cf_id, "cf-1");

    let (plan, outcome) = toolkit
        .apply_command(
            plan.id,
            PlanCommand::AddCustomTask {
                framework_id: cf_id.clone(),
                stage: Stage::Delivery,
                text: "Weekly demo".to_string(),
            },
        )
        .await
        .expect("Add task command should apply");
    assert_eq!(outcome, CommandOutcome::Done);

    let cf = plan
        .custom_framework(&cf_id)
        .expect("Custom framework should exist");
    assert_eq!(cf.tasks.get(Stage::Delivery), &["Weekly demo".to_string()]);

    // Out-of-range removal is rejected without changing the plan
    let (unchanged, outcome) = toolkit
        .apply_command(
            plan.id,
            PlanCommand::RemoveCustomTask {
                framework_id: cf_id.clone(),
                stage: Stage::Delivery,
                index: 5,
            },
        )
        .await
        .expect("Command should apply");
    assert_eq!(outcome, CommandOutcome::Rejected);
    assert_eq!(
        unchanged.custom_framework(&cf_id).map(|cf| &cf.tasks),
        plan.custom_framework(&cf_id).map(|cf| &cf.tasks)
    );
}

#[tokio::test]
async fn test_factor_workflow() {
    let (_temp_dir, toolkit) = create_test_toolkit().await;

    // Upsert with a partial task map; missing stages are repaired
    let mut tasks = BTreeMap::new();
    tasks.insert(
        "identification".to_string(),
        vec!["Identify benefit owners".to_string()],
    );
    let factor = toolkit
        .upsert_factor(&UpsertFactor {
            id: "1.3".to_string(),
            title: "Plan for benefits".to_string(),
            tasks: Some(tasks),
        })
        .await
        .expect("Failed to upsert factor");
    assert_eq!(factor.task_count(), 1);
    assert!(factor.tasks.get(Stage::Closure).is_empty());

    // Append and remove tasks
    let updated = toolkit
        .add_factor_task(&FactorTask {
            factor_id: "1.3".to_string(),
            stage: Stage::Closure,
            text: "Hand over benefit tracking".to_string(),
        })
        .await
        .expect("Failed to add task")
        .expect("Factor should exist");
    assert_eq!(updated.task_count(), 2);

    let removed = toolkit
        .remove_factor_task(&RemoveFactorTask {
            factor_id: "1.3".to_string(),
            stage: Stage::Closure,
            index: 0,
        })
        .await
        .expect("Failed to remove task");
    assert!(removed);

    // Out-of-range removal reports false
    let removed = toolkit
        .remove_factor_task(&RemoveFactorTask {
            factor_id: "1.3".to_string(),
            stage: Stage::Closure,
            index: 0,
        })
        .await
        .expect("Removal should not error");
    assert!(!removed);

    // Re-upserting preserves the creation timestamp
    let replaced = toolkit
        .upsert_factor(&UpsertFactor {
            id: "1.3".to_string(),
            title: "Plan for benefits realisation".to_string(),
            tasks: None,
        })
        .await
        .expect("Failed to re-upsert factor");
    assert_eq!(replaced.created_at, factor.created_at);
    assert_eq!(replaced.title, "Plan for benefits realisation");

    // Delete
    assert!(toolkit
        .delete_factor("1.3")
        .await
        .expect("Failed to delete factor"));
    assert!(!toolkit
        .delete_factor("1.3")
        .await
        .expect("Second delete should not error"));
}

#[tokio::test]
async fn test_invalid_factor_ids_are_rejected() {
    let (_temp_dir, toolkit) = create_test_toolkit().await;

    let result = toolkit
        .upsert_factor(&UpsertFactor {
            id: "benefits".to_string(),
            title: "Plan for benefits".to_string(),
            tasks: None,
        })
        .await;
    assert!(matches!(result, Err(ToolkitError::InvalidInput { .. })));
}
