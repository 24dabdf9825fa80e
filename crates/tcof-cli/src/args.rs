//! Command-line interface definitions using clap
//!
//! This module defines the complete CLI structure using clap's derive
//! API, implementing the parameter wrapper pattern: CLI argument
//! structs carry the clap-specific attributes and convert into the
//! interface-agnostic parameter types from `tcof_core::params` via
//! `From`, so core types stay free of CLI framework concerns.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tcof_core::{
    models::{Block, Stage},
    params::{
        CreateCustomFramework, CustomTask, DeletePlan, FactorTask, Id, RemoveCustomFramework,
        RemoveCustomTask, RemoveFactorTask, SetZone, ToggleFramework,
    },
};

/// Main command-line interface for the TCOF planning toolkit
///
/// TCOF structures delivery plans across four stages (identification,
/// definition, delivery, closure) and three blocks per stage. The CLI
/// manages plans, zone and framework selections, custom frameworks,
/// the success-factor catalog, and checklist export.
#[derive(Parser)]
#[command(version, about, name = "tcof")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/tcof/tcof.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the TCOF CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Choose and inspect delivery zones
    #[command(alias = "z")]
    Zone {
        #[command(subcommand)]
        command: ZoneCommands,
    },
    /// Select good-practice frameworks
    #[command(alias = "fw")]
    Framework {
        #[command(subcommand)]
        command: FrameworkCommands,
    },
    /// Toggle good-practice tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage custom frameworks
    #[command(alias = "c")]
    Custom {
        #[command(subcommand)]
        command: CustomCommands,
    },
    /// Administer the success-factor catalog
    #[command(alias = "f")]
    Factor {
        #[command(subcommand)]
        command: FactorCommands,
    },
    /// Generate and export plan checklists
    #[command(alias = "ck")]
    Checklist {
        #[command(subcommand)]
        command: ChecklistCommands,
    },
}

/// Delivery stage argument for commands addressing one stage
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    Identification,
    Definition,
    Delivery,
    Closure,
}

impl From<StageArg> for Stage {
    fn from(val: StageArg) -> Self {
        match val {
            StageArg::Identification => Stage::Identification,
            StageArg::Definition => Stage::Definition,
            StageArg::Delivery => Stage::Delivery,
            StageArg::Closure => Stage::Closure,
        }
    }
}

/// Block argument for the clear command
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum BlockArg {
    /// Block 1: goal mapping
    Discover,
    /// Block 2: policy and framework tasks
    Design,
    /// Block 3: good-practice selections
    Complete,
}

impl From<BlockArg> for Block {
    fn from(val: BlockArg) -> Self {
        match val {
            BlockArg::Discover => Block::Discover,
            BlockArg::Design => Block::Design,
            BlockArg::Complete => Block::Complete,
        }
    }
}

/// Output format for checklist export
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

/// Show details of a specific plan
#[derive(clap::Args)]
pub struct ShowPlanArgs {
    /// ID of the plan to display
    pub id: u64,
}

impl From<ShowPlanArgs> for Id {
    fn from(val: ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Mark a plan complete (or back to in-progress)
#[derive(clap::Args)]
pub struct CompletePlanArgs {
    /// ID of the plan to mark
    pub id: u64,
    /// Move the plan back to in-progress instead
    #[arg(long)]
    pub undo: bool,
}

/// Clear part of a plan
///
/// Exactly one scope is required: a block (cleared in every stage), a
/// single stage's good-practice record, or the selected good-practice
/// tasks across all stages.
#[derive(clap::Args)]
pub struct ClearPlanArgs {
    /// ID of the plan to clear
    pub id: u64,
    /// Clear this block's data across all stages
    #[arg(long, conflicts_with_all = ["stage", "tasks"])]
    pub block: Option<BlockArg>,
    /// Clear only this stage's good-practice record
    #[arg(long, conflicts_with_all = ["block", "tasks"])]
    pub stage: Option<StageArg>,
    /// Clear the selected good-practice tasks in every stage
    #[arg(long, conflicts_with_all = ["block", "stage"])]
    pub tasks: bool,
}

/// Delete a plan permanently
#[derive(clap::Args)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new empty plan
    #[command(alias = "n")]
    New,
    /// List all plans
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a specific plan
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Mark a plan complete
    Complete(CompletePlanArgs),
    /// Clear part of a plan
    Clear(ClearPlanArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
}

/// Record the chosen delivery zone for a plan
#[derive(clap::Args)]
pub struct SetZoneArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Zone code from the catalog, e.g. B2
    pub zone: String,
}

impl From<SetZoneArgs> for SetZone {
    fn from(val: SetZoneArgs) -> Self {
        SetZone {
            plan_id: val.plan_id,
            zone: val.zone,
        }
    }
}

#[derive(Subcommand)]
pub enum ZoneCommands {
    /// Record the chosen zone for a plan
    Set(SetZoneArgs),
    /// List the zones in the catalog
    #[command(aliases = ["l", "ls"])]
    List,
}

/// Toggle a framework in a plan's selection set
#[derive(clap::Args)]
pub struct ToggleFrameworkArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Framework code, e.g. AGILEPM
    pub code: String,
}

impl From<ToggleFrameworkArgs> for ToggleFramework {
    fn from(val: ToggleFrameworkArgs) -> Self {
        ToggleFramework {
            plan_id: val.plan_id,
            code: val.code,
        }
    }
}

#[derive(Subcommand)]
pub enum FrameworkCommands {
    /// List the frameworks in the catalog
    #[command(aliases = ["l", "ls"])]
    List,
    /// Toggle a framework selection on a plan
    #[command(alias = "t")]
    Toggle(ToggleFrameworkArgs),
}

/// Toggle good-practice tasks by exact text
///
/// Accepts several task texts in one invocation; the save is debounced
/// so rapid toggles write once.
#[derive(clap::Args)]
pub struct ToggleTaskArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Stage the tasks apply to
    pub stage: StageArg,
    /// Framework code the tasks belong to
    pub framework_code: String,
    /// One or more exact task texts to toggle
    #[arg(required = true)]
    pub texts: Vec<String>,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Toggle one or more good-practice tasks
    #[command(alias = "t")]
    Toggle(ToggleTaskArgs),
}

/// Create a custom framework on a plan
#[derive(clap::Args)]
pub struct CreateCustomArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Name for the new framework
    pub name: String,
}

impl From<CreateCustomArgs> for CreateCustomFramework {
    fn from(val: CreateCustomArgs) -> Self {
        CreateCustomFramework {
            plan_id: val.plan_id,
            name: val.name,
        }
    }
}

/// Add a task to a custom framework
#[derive(clap::Args)]
pub struct AddCustomTaskArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Custom framework identifier, e.g. cf-1
    pub framework_id: String,
    /// Stage the task applies to
    pub stage: StageArg,
    /// Task text
    pub text: String,
}

impl From<AddCustomTaskArgs> for CustomTask {
    fn from(val: AddCustomTaskArgs) -> Self {
        CustomTask {
            plan_id: val.plan_id,
            framework_id: val.framework_id,
            stage: val.stage.into(),
            text: val.text,
        }
    }
}

/// Remove a task from a custom framework by index
#[derive(clap::Args)]
pub struct RemoveCustomTaskArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Custom framework identifier, e.g. cf-1
    pub framework_id: String,
    /// Stage the task belongs to
    pub stage: StageArg,
    /// 0-based index of the task to remove
    pub index: usize,
}

impl From<RemoveCustomTaskArgs> for RemoveCustomTask {
    fn from(val: RemoveCustomTaskArgs) -> Self {
        RemoveCustomTask {
            plan_id: val.plan_id,
            framework_id: val.framework_id,
            stage: val.stage.into(),
            index: val.index,
        }
    }
}

/// Remove a custom framework entirely
#[derive(clap::Args)]
pub struct RemoveCustomArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Custom framework identifier, e.g. cf-1
    pub framework_id: String,
}

impl From<RemoveCustomArgs> for RemoveCustomFramework {
    fn from(val: RemoveCustomArgs) -> Self {
        RemoveCustomFramework {
            plan_id: val.plan_id,
            framework_id: val.framework_id,
        }
    }
}

#[derive(Subcommand)]
pub enum CustomCommands {
    /// Create a custom framework on a plan
    #[command(alias = "c")]
    Create(CreateCustomArgs),
    /// Add a task to a custom framework
    AddTask(AddCustomTaskArgs),
    /// Remove a task from a custom framework by index
    RemoveTask(RemoveCustomTaskArgs),
    /// Remove a custom framework entirely
    #[command(alias = "rm")]
    Remove(RemoveCustomArgs),
}

/// Show details of a success factor
#[derive(clap::Args)]
pub struct ShowFactorArgs {
    /// Factor identifier, e.g. 1.3
    pub id: String,
}

/// Create or replace a success factor
#[derive(clap::Args)]
pub struct UpsertFactorArgs {
    /// Factor identifier of the form <major>.<minor>, e.g. 1.3
    pub id: String,
    /// Display name
    pub title: String,
    /// Optional stage task map as JSON, e.g.
    /// '{"delivery": ["Track benefits"]}'
    #[arg(long)]
    pub tasks: Option<String>,
}

/// Append a task to a success factor
#[derive(clap::Args)]
pub struct AddFactorTaskArgs {
    /// Factor identifier, e.g. 1.3
    pub factor_id: String,
    /// Stage the task applies to
    pub stage: StageArg,
    /// Task text
    pub text: String,
}

impl From<AddFactorTaskArgs> for FactorTask {
    fn from(val: AddFactorTaskArgs) -> Self {
        FactorTask {
            factor_id: val.factor_id,
            stage: val.stage.into(),
            text: val.text,
        }
    }
}

/// Remove a success-factor task by index
#[derive(clap::Args)]
pub struct RemoveFactorTaskArgs {
    /// Factor identifier, e.g. 1.3
    pub factor_id: String,
    /// Stage the task belongs to
    pub stage: StageArg,
    /// 0-based index of the task to remove
    pub index: usize,
}

impl From<RemoveFactorTaskArgs> for RemoveFactorTask {
    fn from(val: RemoveFactorTaskArgs) -> Self {
        RemoveFactorTask {
            factor_id: val.factor_id,
            stage: val.stage.into(),
            index: val.index,
        }
    }
}

/// Delete a success factor permanently
#[derive(clap::Args)]
pub struct DeleteFactorArgs {
    /// Factor identifier, e.g. 1.3
    pub id: String,
}

/// Export the full success-factor catalog as JSON
#[derive(clap::Args)]
pub struct ExportFactorsArgs {
    /// Write to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum FactorCommands {
    /// List all success factors
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a success factor
    #[command(alias = "s")]
    Show(ShowFactorArgs),
    /// Create or replace a success factor
    #[command(alias = "u")]
    Upsert(UpsertFactorArgs),
    /// Append a task to a success factor
    AddTask(AddFactorTaskArgs),
    /// Remove a success-factor task by index
    RemoveTask(RemoveFactorTaskArgs),
    /// Delete a success factor permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteFactorArgs),
    /// Export the full catalog as JSON
    #[command(alias = "e")]
    Export(ExportFactorsArgs),
}

/// Show a plan's checklist as markdown
#[derive(clap::Args)]
pub struct ShowChecklistArgs {
    /// ID of the plan
    pub plan_id: u64,
}

/// Export a plan's checklist
#[derive(clap::Args)]
pub struct ExportChecklistArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: ExportFormat,
    /// Write to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ChecklistCommands {
    /// Show a plan's checklist as markdown
    #[command(alias = "s")]
    Show(ShowChecklistArgs),
    /// Export a plan's checklist as JSON or CSV
    #[command(alias = "e")]
    Export(ExportChecklistArgs),
}
