//! Pure plan mutators.
//!
//! Every mutation of a [`Plan`] goes through this module: a named
//! function (or the [`apply`] dispatcher) takes the plan and a command
//! and updates it in place, with no I/O of any kind. Persistence is the
//! caller's concern, which is what lets the toolkit fall back to
//! local-only state when a save fails.
//!
//! Each applied command refreshes `updated_at`.

use crate::{
    catalog::Catalog,
    models::{Block, CustomFramework, GpTask, Plan, Stage, StageMap},
};

/// A named mutation of a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanCommand {
    /// Record the chosen delivery zone
    SetZone { zone: String },
    /// Toggle a framework in the selection set
    ToggleFramework { code: String },
    /// Toggle one good-practice task by exact text
    ToggleGpTask {
        stage: Stage,
        framework_code: String,
        text: String,
    },
    /// Append a new custom framework
    CreateCustomFramework { name: String },
    /// Append a task to a custom framework's stage array
    AddCustomTask {
        framework_id: String,
        stage: Stage,
        text: String,
    },
    /// Remove a task from a custom framework's stage array by index
    RemoveCustomTask {
        framework_id: String,
        stage: Stage,
        index: usize,
    },
    /// Remove a custom framework entirely
    RemoveCustomFramework { framework_id: String },
    /// Empty the good-practice task list in every stage
    ClearAllTasks,
    /// Reset one block's fields across all stages
    ClearBlock { block: Block },
    /// Reset the good-practice record of a single stage
    ClearStage { stage: Stage },
    /// Set or unset the completed flag
    MarkComplete { value: bool },
}

/// What a command did to the plan.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The command applied unconditionally
    Done,
    /// A set-membership toggle; `on` is the resulting membership
    Toggled { on: bool },
    /// A custom framework was created with this identifier
    Created { id: String },
    /// The command addressed something that does not exist; the plan is
    /// unchanged
    Rejected,
}

/// Applies one command to a plan, returning what happened.
pub fn apply(plan: &mut Plan, command: &PlanCommand, catalog: &Catalog) -> CommandOutcome {
    match command {
        PlanCommand::SetZone { zone } => {
            set_zone(plan, zone);
            CommandOutcome::Done
        }
        PlanCommand::ToggleFramework { code } => CommandOutcome::Toggled {
            on: toggle_framework(plan, code, catalog),
        },
        PlanCommand::ToggleGpTask {
            stage,
            framework_code,
            text,
        } => {
            if text.trim().is_empty() {
                CommandOutcome::Rejected
            } else {
                CommandOutcome::Toggled {
                    on: toggle_gp_task(plan, *stage, framework_code, text),
                }
            }
        }
        PlanCommand::CreateCustomFramework { name } => CommandOutcome::Created {
            id: create_custom_framework(plan, name),
        },
        PlanCommand::AddCustomTask {
            framework_id,
            stage,
            text,
        } => {
            if add_custom_task(plan, framework_id, *stage, text) {
                CommandOutcome::Done
            } else {
                CommandOutcome::Rejected
            }
        }
        PlanCommand::RemoveCustomTask {
            framework_id,
            stage,
            index,
        } => {
            if remove_custom_task(plan, framework_id, *stage, *index) {
                CommandOutcome::Done
            } else {
                CommandOutcome::Rejected
            }
        }
        PlanCommand::RemoveCustomFramework { framework_id } => {
            if remove_custom_framework(plan, framework_id) {
                CommandOutcome::Done
            } else {
                CommandOutcome::Rejected
            }
        }
        PlanCommand::ClearAllTasks => {
            clear_all_tasks(plan);
            CommandOutcome::Done
        }
        PlanCommand::ClearBlock { block } => {
            clear_block(plan, *block);
            CommandOutcome::Done
        }
        PlanCommand::ClearStage { stage } => {
            clear_stage_good_practice(plan, *stage);
            CommandOutcome::Done
        }
        PlanCommand::MarkComplete { value } => {
            mark_complete(plan, *value);
            CommandOutcome::Done
        }
    }
}

/// Records the chosen zone.
///
/// Every stage's good-practice record mirrors the value; Identification
/// is the authoritative one for reads ([`Plan::zone`]).
pub fn set_zone(plan: &mut Plan, zone: &str) {
    plan.stages.for_each_mut(|_, data| {
        data.good_practice_mut().zone = Some(zone.to_string());
    });
    plan.touch();
}

/// Toggles a framework in the selection set, returning the resulting
/// membership.
///
/// Adding a framework auto-expands it: every catalog task of that
/// framework is toggled on for its stage. Removing it leaves the
/// previously added tasks in place, so selections can be revisited
/// without losing work. A regression test pins the asymmetry.
pub fn toggle_framework(plan: &mut Plan, code: &str, catalog: &Catalog) -> bool {
    let selected = plan.frameworks().iter().any(|c| c == code);

    if selected {
        plan.stages.for_each_mut(|_, data| {
            data.good_practice_mut().frameworks.retain(|c| c != code);
        });
        plan.touch();
        return false;
    }

    plan.stages.for_each_mut(|_, data| {
        let gp = data.good_practice_mut();
        if !gp.frameworks.iter().any(|c| c == code) {
            gp.frameworks.push(code.to_string());
        }
    });

    if let Some(framework) = catalog.framework(code) {
        for stage in Stage::ALL {
            for text in framework.tasks.get(stage) {
                insert_gp_task(plan, stage, code, text);
            }
        }
    }

    plan.touch();
    true
}

/// Set-membership toggle of one task text within (framework_code, stage).
///
/// Returns true when the task is now present. Removal filters every
/// entry with the exact same text, so accidental duplicates collapse.
/// Blank text is never a valid task: the plan is left untouched and
/// false is returned.
pub fn toggle_gp_task(plan: &mut Plan, stage: Stage, framework_code: &str, text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    let tasks = &mut plan.stages.get_mut(stage).good_practice_mut().tasks;
    let present = tasks
        .iter()
        .any(|t| t.framework_code == framework_code && t.stage == stage && t.text == text);

    if present {
        tasks.retain(|t| {
            !(t.framework_code == framework_code && t.stage == stage && t.text == text)
        });
        plan.touch();
        false
    } else {
        tasks.push(GpTask {
            framework_code: framework_code.to_string(),
            stage,
            text: text.to_string(),
        });
        plan.touch();
        true
    }
}

/// Inserts a good-practice task if it is not already present.
fn insert_gp_task(plan: &mut Plan, stage: Stage, framework_code: &str, text: &str) {
    let tasks = &mut plan.stages.get_mut(stage).good_practice_mut().tasks;
    let present = tasks
        .iter()
        .any(|t| t.framework_code == framework_code && t.stage == stage && t.text == text);
    if !present {
        tasks.push(GpTask {
            framework_code: framework_code.to_string(),
            stage,
            text: text.to_string(),
        });
    }
}

/// Appends a new custom framework with four empty stage arrays,
/// returning its generated identifier.
pub fn create_custom_framework(plan: &mut Plan, name: &str) -> String {
    let custom = &mut plan
        .stages
        .get_mut(Stage::Identification)
        .good_practice_mut()
        .custom_frameworks;

    let next = custom
        .iter()
        .filter_map(|cf| cf.id.strip_prefix("cf-").and_then(|n| n.parse::<u64>().ok()))
        .max()
        .unwrap_or(0)
        + 1;
    let id = format!("cf-{next}");

    custom.push(CustomFramework {
        id: id.clone(),
        name: name.to_string(),
        tasks: StageMap::default(),
    });
    plan.touch();
    id
}

/// Appends a task to a custom framework's stage array.
/// Returns false (and changes nothing) when the framework is unknown or
/// the text is blank.
pub fn add_custom_task(plan: &mut Plan, framework_id: &str, stage: Stage, text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    let custom = &mut plan
        .stages
        .get_mut(Stage::Identification)
        .good_practice_mut()
        .custom_frameworks;

    match custom.iter_mut().find(|cf| cf.id == framework_id) {
        Some(cf) => {
            cf.tasks.get_mut(stage).push(text.to_string());
            plan.touch();
            true
        }
        None => false,
    }
}

/// Removes a task from a custom framework's stage array by index.
/// Out-of-range indexes and unknown frameworks are a no-op returning
/// false, never a panic.
pub fn remove_custom_task(plan: &mut Plan, framework_id: &str, stage: Stage, index: usize) -> bool {
    let custom = &mut plan
        .stages
        .get_mut(Stage::Identification)
        .good_practice_mut()
        .custom_frameworks;

    match custom.iter_mut().find(|cf| cf.id == framework_id) {
        Some(cf) => {
            let tasks = cf.tasks.get_mut(stage);
            if index < tasks.len() {
                tasks.remove(index);
                plan.touch();
                true
            } else {
                false
            }
        }
        None => false,
    }
}

/// Removes a custom framework entirely.
/// Returns false when no framework with that identifier exists.
pub fn remove_custom_framework(plan: &mut Plan, framework_id: &str) -> bool {
    let custom = &mut plan
        .stages
        .get_mut(Stage::Identification)
        .good_practice_mut()
        .custom_frameworks;

    let before = custom.len();
    custom.retain(|cf| cf.id != framework_id);
    let removed = custom.len() < before;
    if removed {
        plan.touch();
    }
    removed
}

/// Empties the good-practice task list in every stage, leaving zone,
/// framework selections, and custom frameworks untouched.
pub fn clear_all_tasks(plan: &mut Plan) {
    plan.stages.for_each_mut(|_, data| {
        if let Some(gp) = data.good_practice.as_mut() {
            gp.tasks.clear();
        }
    });
    plan.touch();
}

/// Resets one block's fields in every stage, preserving the other
/// blocks' data.
pub fn clear_block(plan: &mut Plan, block: Block) {
    plan.stages.for_each_mut(|_, data| data.clear_block(block));
    plan.touch();
}

/// Resets the good-practice record of a single stage, leaving every
/// other stage untouched.
pub fn clear_stage_good_practice(plan: &mut Plan, stage: Stage) {
    plan.stages.get_mut(stage).good_practice = None;
    plan.touch();
}

/// Sets or unsets the completed flag.
pub fn mark_complete(plan: &mut Plan, value: bool) {
    plan.completed = value;
    plan.touch();
}
