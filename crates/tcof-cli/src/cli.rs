//! Command handlers bridging parsed arguments and the toolkit.
//!
//! Each handler converts its CLI argument struct into core parameters,
//! calls the toolkit, and renders the outcome through the terminal
//! renderer. Storage failures surfaced as `None` by the toolkit's
//! sentinel layer become visible error messages here instead of
//! aborting the process.

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use log::error;
use tcof_core::{
    display::{CreateResult, DeleteResult, Factors, OperationStatus, PlanSummaries},
    mutate::{self, CommandOutcome, PlanCommand},
    params::{ClearPlan, Id, UpsertFactor},
    Debouncer, Toolkit,
};

use crate::{
    args::{
        ChecklistCommands, ClearPlanArgs, CompletePlanArgs, CustomCommands, ExportChecklistArgs,
        ExportFormat, FactorCommands, FrameworkCommands, PlanCommands, SetZoneArgs,
        ShowChecklistArgs, TaskCommands, ToggleTaskArgs, UpsertFactorArgs, ZoneCommands,
    },
    renderer::TerminalRenderer,
};

/// Quiet period for coalescing saves within one invocation. A whole
/// command's toggles arrive at once, so anything beyond a few
/// milliseconds only delays process exit.
const SAVE_QUIET: Duration = Duration::from_millis(10);

/// CLI command dispatcher holding the toolkit and renderer.
pub struct Cli {
    toolkit: Arc<Toolkit>,
    renderer: TerminalRenderer,
    saves: Debouncer,
}

impl Cli {
    pub fn new(toolkit: Toolkit, renderer: TerminalRenderer) -> Self {
        Self {
            toolkit: Arc::new(toolkit),
            renderer,
            saves: Debouncer::new(SAVE_QUIET),
        }
    }

    fn render_failure(&self, message: String) -> Result<()> {
        self.renderer
            .render(&OperationStatus::failure(message).to_string())
    }

    fn render_success(&self, message: String) -> Result<()> {
        self.renderer
            .render(&OperationStatus::success(message).to_string())
    }

    /// Applies one command and renders a message per outcome.
    async fn apply_and_report(
        &self,
        plan_id: u64,
        command: PlanCommand,
        success: &str,
        rejected: &str,
    ) -> Result<()> {
        match self.toolkit.apply_command(plan_id, command).await {
            Some((_, CommandOutcome::Rejected)) => self.render_failure(rejected.to_string()),
            Some(_) => self.render_success(success.to_string()),
            None => self.render_failure(format!("Plan {plan_id} could not be updated")),
        }
    }

    pub async fn list_plans(&self) -> Result<()> {
        let summaries = PlanSummaries(self.toolkit.list_plans().await?);
        if summaries.is_empty() {
            self.renderer.render(&summaries.to_string())
        } else {
            let output = format!("# Plans\n\n{summaries}");
            self.renderer.render(&output)
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::New => {
                let plan = self.toolkit.create_plan().await?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => {
                let id: Id = args.into();
                match self.toolkit.get_plan(&id).await? {
                    Some(plan) => self.renderer.render(&plan.to_string()),
                    None => self.render_failure(format!("Plan {} not found", id.id)),
                }
            }
            PlanCommands::Complete(CompletePlanArgs { id, undo }) => {
                let message = if undo {
                    format!("Plan {id} moved back to in-progress")
                } else {
                    format!("Plan {id} marked complete")
                };
                self.apply_and_report(
                    id,
                    PlanCommand::MarkComplete { value: !undo },
                    &message,
                    "",
                )
                .await
            }
            PlanCommands::Clear(args) => self.clear_plan(args).await,
            PlanCommands::Delete(args) => {
                let params = args.into();
                match self.toolkit.delete_plan(&params).await? {
                    Some(plan) => self.renderer.render(&DeleteResult::new(plan).to_string()),
                    None => self.render_failure(format!("Plan {} not found", params.id)),
                }
            }
        }
    }

    async fn clear_plan(&self, args: ClearPlanArgs) -> Result<()> {
        let command = if args.tasks {
            PlanCommand::ClearAllTasks
        } else {
            let params = ClearPlan {
                plan_id: args.id,
                block: args.block.map(Into::into),
                stage: args.stage.map(Into::into),
            };
            params.validate()?;
            if let Some(block) = params.block {
                PlanCommand::ClearBlock { block }
            } else if let Some(stage) = params.stage {
                PlanCommand::ClearStage { stage }
            } else {
                return self.render_failure("Nothing to clear".to_string());
            }
        };

        self.apply_and_report(args.id, command, &format!("Plan {} cleared", args.id), "")
            .await
    }

    pub async fn handle_zone_command(&self, command: ZoneCommands) -> Result<()> {
        match command {
            ZoneCommands::Set(SetZoneArgs { plan_id, zone }) => {
                if self.toolkit.catalog().zone(&zone).is_none() {
                    return self.render_failure(format!("Unknown zone '{zone}'"));
                }
                self.apply_and_report(
                    plan_id,
                    PlanCommand::SetZone { zone: zone.clone() },
                    &format!("Zone set to {zone}"),
                    "",
                )
                .await
            }
            ZoneCommands::List => {
                let mut output = String::from("# Zones\n\n");
                for zone in &self.toolkit.catalog().zones {
                    output.push_str(&format!(
                        "- **{}** {}: {}\n",
                        zone.code, zone.name, zone.description
                    ));
                }
                self.renderer.render(&output)
            }
        }
    }

    pub async fn handle_framework_command(&self, command: FrameworkCommands) -> Result<()> {
        match command {
            FrameworkCommands::List => {
                let mut output = String::from("# Frameworks\n\n");
                for framework in &self.toolkit.catalog().frameworks {
                    let count: usize = framework.tasks.iter().map(|(_, t)| t.len()).sum();
                    output.push_str(&format!(
                        "- **{}** {} ({count} tasks)\n",
                        framework.code, framework.name
                    ));
                }
                self.renderer.render(&output)
            }
            FrameworkCommands::Toggle(args) => {
                let params: tcof_core::params::ToggleFramework = args.into();
                match self
                    .toolkit
                    .apply_command(
                        params.plan_id,
                        PlanCommand::ToggleFramework {
                            code: params.code.clone(),
                        },
                    )
                    .await
                {
                    Some((_, CommandOutcome::Toggled { on: true })) => self.render_success(
                        format!("Framework {} selected, tasks added", params.code),
                    ),
                    Some((_, CommandOutcome::Toggled { on: false })) => self.render_success(
                        format!("Framework {} deselected, tasks kept", params.code),
                    ),
                    Some(_) | None => self
                        .render_failure(format!("Plan {} could not be updated", params.plan_id)),
                }
            }
        }
    }

    /// Toggles several tasks with a single debounced save.
    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        let TaskCommands::Toggle(ToggleTaskArgs {
            plan_id,
            stage,
            framework_code,
            texts,
        }) = command;

        if texts.iter().any(|text| text.trim().is_empty()) {
            return self.render_failure("Task text must not be empty".to_string());
        }

        let Some(mut plan) = self.toolkit.get_plan(&Id { id: plan_id }).await? else {
            return self.render_failure(format!("Plan {plan_id} not found"));
        };

        let stage = stage.into();
        let mut turned_on = 0usize;
        let mut turned_off = 0usize;
        for text in &texts {
            if mutate::toggle_gp_task(&mut plan, stage, &framework_code, text) {
                turned_on += 1;
            } else {
                turned_off += 1;
            }
        }

        let toolkit = Arc::clone(&self.toolkit);
        let snapshot = plan.clone();
        self.saves.call(&plan_id.to_string(), async move {
            match toolkit.save_plan(&snapshot).await {
                Ok(true) => {}
                Ok(false) => error!("Plan {plan_id} vanished before the debounced save"),
                Err(e) => error!("Debounced save of plan {plan_id} failed: {e}"),
            }
        });
        self.saves.flush().await;

        self.render_success(format!(
            "Toggled {} tasks ({turned_on} on, {turned_off} off)",
            texts.len()
        ))
    }

    pub async fn handle_custom_command(&self, command: CustomCommands) -> Result<()> {
        match command {
            CustomCommands::Create(args) => {
                let params: tcof_core::params::CreateCustomFramework = args.into();
                match self
                    .toolkit
                    .apply_command(
                        params.plan_id,
                        PlanCommand::CreateCustomFramework {
                            name: params.name.clone(),
                        },
                    )
                    .await
                {
                    Some((_, CommandOutcome::Created { id })) => self.render_success(format!(
                        "Created custom framework '{}' with ID: {id}",
                        params.name
                    )),
                    Some(_) | None => self
                        .render_failure(format!("Plan {} could not be updated", params.plan_id)),
                }
            }
            CustomCommands::AddTask(args) => {
                let params: tcof_core::params::CustomTask = args.into();
                self.apply_and_report(
                    params.plan_id,
                    PlanCommand::AddCustomTask {
                        framework_id: params.framework_id.clone(),
                        stage: params.stage,
                        text: params.text,
                    },
                    "Task added",
                    &format!("Custom framework '{}' not found", params.framework_id),
                )
                .await
            }
            CustomCommands::RemoveTask(args) => {
                let params: tcof_core::params::RemoveCustomTask = args.into();
                self.apply_and_report(
                    params.plan_id,
                    PlanCommand::RemoveCustomTask {
                        framework_id: params.framework_id.clone(),
                        stage: params.stage,
                        index: params.index,
                    },
                    "Task removed",
                    &format!(
                        "No task at index {} in custom framework '{}'",
                        params.index, params.framework_id
                    ),
                )
                .await
            }
            CustomCommands::Remove(args) => {
                let params: tcof_core::params::RemoveCustomFramework = args.into();
                self.apply_and_report(
                    params.plan_id,
                    PlanCommand::RemoveCustomFramework {
                        framework_id: params.framework_id.clone(),
                    },
                    &format!("Removed custom framework '{}'", params.framework_id),
                    &format!("Custom framework '{}' not found", params.framework_id),
                )
                .await
            }
        }
    }

    pub async fn handle_factor_command(&self, command: FactorCommands) -> Result<()> {
        match command {
            FactorCommands::List => {
                let factors = Factors(self.toolkit.list_factors().await?);
                if factors.is_empty() {
                    self.renderer.render(&factors.to_string())
                } else {
                    let output = format!("# Success Factors\n\n{factors}");
                    self.renderer.render(&output)
                }
            }
            FactorCommands::Show(args) => match self.toolkit.get_factor(&args.id).await? {
                Some(factor) => self.renderer.render(&factor.to_string()),
                None => self.render_failure(format!("Success factor '{}' not found", args.id)),
            },
            FactorCommands::Upsert(args) => self.upsert_factor(args).await,
            FactorCommands::AddTask(args) => {
                let params = args.into();
                match self.toolkit.add_factor_task(&params).await? {
                    Some(factor) => self.render_success(format!(
                        "Task added to factor '{}' ({} tasks)",
                        factor.id,
                        factor.task_count()
                    )),
                    None => self
                        .render_failure(format!("Success factor '{}' not found", params.factor_id)),
                }
            }
            FactorCommands::RemoveTask(args) => {
                let params = args.into();
                if self.toolkit.remove_factor_task(&params).await? {
                    self.render_success("Task removed".to_string())
                } else {
                    self.render_failure(format!(
                        "No task at index {} in factor '{}'",
                        params.index, params.factor_id
                    ))
                }
            }
            FactorCommands::Delete(args) => match self.toolkit.get_factor(&args.id).await? {
                Some(factor) => {
                    self.toolkit.delete_factor(&args.id).await?;
                    self.renderer.render(&DeleteResult::new(factor).to_string())
                }
                None => self.render_failure(format!("Success factor '{}' not found", args.id)),
            },
            FactorCommands::Export(args) => self.export_factors(args).await,
        }
    }

    async fn export_factors(&self, args: crate::args::ExportFactorsArgs) -> Result<()> {
        let factors = self.toolkit.list_factors().await?;
        let rendered = serde_json::to_string_pretty(&factors)
            .context("Failed to serialize factor catalog")?;

        match args.output {
            Some(path) => {
                std::fs::write(&path, rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                self.render_success(format!("Factor catalog written to {}", path.display()))
            }
            None => {
                println!("{rendered}");
                Ok(())
            }
        }
    }

    async fn upsert_factor(&self, args: UpsertFactorArgs) -> Result<()> {
        let tasks = match &args.tasks {
            Some(json) => Some(
                serde_json::from_str::<BTreeMap<String, Vec<String>>>(json)
                    .context("Invalid task map, expected JSON like {\"delivery\": [\"...\"]}")?,
            ),
            None => None,
        };

        let factor = self
            .toolkit
            .upsert_factor(&UpsertFactor {
                id: args.id,
                title: args.title,
                tasks,
            })
            .await?;
        self.renderer.render(&CreateResult::new(factor).to_string())
    }

    pub async fn handle_checklist_command(&self, command: ChecklistCommands) -> Result<()> {
        match command {
            ChecklistCommands::Show(ShowChecklistArgs { plan_id }) => {
                match self.toolkit.checklist(&Id { id: plan_id }).await? {
                    Some(checklist) => self.renderer.render(&checklist.to_string()),
                    None => self.render_failure(format!("Plan {plan_id} not found")),
                }
            }
            ChecklistCommands::Export(args) => self.export_checklist(args).await,
        }
    }

    async fn export_checklist(&self, args: ExportChecklistArgs) -> Result<()> {
        let ExportChecklistArgs {
            plan_id,
            format,
            output,
        } = args;

        let Some(checklist) = self.toolkit.checklist(&Id { id: plan_id }).await? else {
            return self.render_failure(format!("Plan {plan_id} not found"));
        };

        let rendered = match format {
            ExportFormat::Json => checklist.to_json()?,
            ExportFormat::Csv => {
                let mut buffer = Vec::new();
                checklist
                    .write_csv(&mut buffer)
                    .context("Failed to serialize checklist as CSV")?;
                String::from_utf8(buffer).context("CSV output was not valid UTF-8")?
            }
        };

        match output {
            Some(path) => {
                std::fs::write(&path, rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                self.render_success(format!("Checklist written to {}", path.display()))
            }
            None => {
                // Raw output, exports must stay machine-readable
                print!("{rendered}");
                if !rendered.ends_with('\n') {
                    println!();
                }
                Ok(())
            }
        }
    }
}
