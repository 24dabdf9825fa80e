//! Display implementations for domain models.
//!
//! Markdown-formatted output for rich terminal display, separated from
//! the model definitions to keep business logic and presentation apart.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{
    Block, Plan, PlanSummary, Stage, StageData, StageTask, SuccessFactor, TaskSource,
};

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capitalized stage heading for markdown sections.
fn stage_heading(stage: Stage) -> &'static str {
    match stage {
        Stage::Identification => "Identification",
        Stage::Definition => "Definition",
        Stage::Delivery => "Delivery",
        Stage::Closure => "Closure",
    }
}

fn write_checkbox_task(f: &mut fmt::Formatter<'_>, task: &StageTask) -> fmt::Result {
    let mark = if task.done { "x" } else { " " };
    writeln!(f, "- [{mark}] {} ({})", task.text, task.source)
}

fn write_stage_section(f: &mut fmt::Formatter<'_>, stage: Stage, data: &StageData) -> fmt::Result {
    let gp_tasks = data
        .good_practice
        .as_ref()
        .map(|gp| gp.tasks.as_slice())
        .unwrap_or_default();

    let is_empty = data.mappings.is_empty()
        && data.policy_tasks.is_empty()
        && data.framework_tasks.is_empty()
        && gp_tasks.is_empty();
    if is_empty {
        return Ok(());
    }

    writeln!(f, "\n## {}", stage_heading(stage))?;
    writeln!(f)?;

    if !data.mappings.is_empty() {
        writeln!(f, "- Goal maps: {}", data.mappings.len())?;
    }
    for task in &data.policy_tasks {
        write_checkbox_task(f, task)?;
    }
    for task in &data.framework_tasks {
        write_checkbox_task(f, task)?;
    }
    for task in gp_tasks {
        writeln!(f, "- [{}] {}", task.framework_code, task.text)?;
    }

    Ok(())
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Plan {}", self.id)?;
        writeln!(f)?;

        // Metadata section
        let status = if self.completed {
            "Completed"
        } else {
            "In progress"
        };
        writeln!(f, "- Status: {status}")?;
        writeln!(f, "- Zone: {}", self.zone().unwrap_or("not set"))?;
        if self.frameworks().is_empty() {
            writeln!(f, "- Frameworks: none")?;
        } else {
            writeln!(f, "- Frameworks: {}", self.frameworks().join(", "))?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if !self.custom_frameworks().is_empty() {
            writeln!(f)?;
            writeln!(f, "Custom frameworks:")?;
            for cf in self.custom_frameworks() {
                let count: usize = cf.tasks.iter().map(|(_, t)| t.len()).sum();
                writeln!(f, "- {} ({}, {count} tasks)", cf.name, cf.id)?;
            }
        }

        for (stage, data) in self.stages.iter() {
            write_stage_section(f, stage, data)?;
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.completed { " [completed]" } else { "" };
        writeln!(f, "## Plan {}{status}", self.id)?;
        writeln!(f)?;

        if let Some(zone) = &self.zone {
            writeln!(f, "- **Zone**: {zone}")?;
        }
        writeln!(f, "- **Frameworks**: {}", self.framework_count)?;
        writeln!(f, "- **Tasks**: {}", self.task_count)?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?; // Blank line after each plan

        Ok(())
    }
}

impl fmt::Display for SuccessFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} {}", self.id, self.title)?;
        writeln!(f)?;
        writeln!(f, "- Tasks: {}", self.task_count())?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        for (stage, tasks) in self.tasks.iter() {
            if tasks.is_empty() {
                continue;
            }
            writeln!(f, "\n## {}", stage_heading(stage))?;
            writeln!(f)?;
            for task in tasks {
                writeln!(f, "- {task}")?;
            }
        }

        Ok(())
    }
}
