//! Checklist generation: folding a plan into a flat, exportable task
//! list grouped by stage.

use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{Plan, Stage, TaskSource},
};

/// One flattened checklist entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    /// Originating stage
    pub stage: Stage,
    /// Where the task came from
    pub source: TaskSource,
    /// Framework code or custom framework name, when applicable
    pub framework: Option<String>,
    /// Task description
    pub text: String,
    /// Completion state
    pub done: bool,
}

/// A flattened, stage-ordered checklist for one plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    /// The plan this checklist was generated from
    pub plan_id: u64,
    /// Whether the plan was marked complete
    pub completed: bool,
    /// Items in stage order; no deduplication is applied here
    pub items: Vec<ChecklistItem>,
}

/// Folds a plan into its checklist.
///
/// Stage order is the canonical lifecycle order; within a stage the
/// order is policy tasks, framework tasks, toggled good-practice tasks,
/// then custom-framework tasks. Duplicate texts are kept as-is: dedupe
/// is a catalog-side concern, not a checklist one.
pub fn generate(plan: &Plan) -> Checklist {
    let mut items = Vec::new();

    for stage in Stage::ALL {
        let data = plan.stages.get(stage);

        for task in &data.policy_tasks {
            items.push(ChecklistItem {
                stage,
                source: task.source,
                framework: None,
                text: task.text.clone(),
                done: task.done,
            });
        }

        for task in &data.framework_tasks {
            items.push(ChecklistItem {
                stage,
                source: task.source,
                framework: None,
                text: task.text.clone(),
                done: task.done,
            });
        }

        if let Some(gp) = &data.good_practice {
            for task in &gp.tasks {
                items.push(ChecklistItem {
                    stage,
                    source: TaskSource::Framework,
                    framework: Some(task.framework_code.clone()),
                    text: task.text.clone(),
                    done: false,
                });
            }
        }

        for cf in plan.custom_frameworks() {
            for text in cf.tasks.get(stage) {
                items.push(ChecklistItem {
                    stage,
                    source: TaskSource::Custom,
                    framework: Some(cf.name.clone()),
                    text: text.clone(),
                    done: false,
                });
            }
        }
    }

    Checklist {
        plan_id: plan.id,
        completed: plan.completed,
        items,
    }
}

impl Checklist {
    /// Serializes the checklist as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the checklist as CSV rows with a header line.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "stage,source,framework,text,done")?;
        for item in &self.items {
            writeln!(
                writer,
                "{},{},{},{},{}",
                item.stage.as_str(),
                item.source.as_str(),
                csv_field(item.framework.as_deref().unwrap_or("")),
                csv_field(&item.text),
                item.done,
            )?;
        }
        Ok(())
    }
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

impl fmt::Display for Checklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Checklist for plan {}", self.plan_id)?;
        writeln!(f)?;
        if self.items.is_empty() {
            writeln!(f, "No tasks selected yet.")?;
            return Ok(());
        }

        for stage in Stage::ALL {
            let stage_items: Vec<_> =
                self.items.iter().filter(|i| i.stage == stage).collect();
            if stage_items.is_empty() {
                continue;
            }
            writeln!(f, "## {}", stage.as_str())?;
            writeln!(f)?;
            for item in stage_items {
                let mark = if item.done { "x" } else { " " };
                match &item.framework {
                    Some(fw) => writeln!(f, "- [{mark}] {} ({fw})", item.text)?,
                    None => writeln!(f, "- [{mark}] {}", item.text)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::{
        catalog::Catalog,
        models::{StageTask, TaskSource},
        mutate,
    };

    fn populated_plan() -> Plan {
        let catalog = Catalog::load().expect("embedded catalog must parse");
        let mut plan = Plan::empty(7, Timestamp::now());
        mutate::set_zone(&mut plan, "B2");
        mutate::toggle_framework(&mut plan, "AGILEPM", &catalog);
        let id = mutate::create_custom_framework(&mut plan, "My Method");
        mutate::add_custom_task(&mut plan, &id, Stage::Delivery, "Check risk log");
        plan.stages.get_mut(Stage::Closure).policy_tasks.push(StageTask {
            text: "Archive the decision log".to_string(),
            done: true,
            source: TaskSource::Manual,
        });
        plan
    }

    #[test]
    fn test_generate_tags_sources_and_stages() {
        let plan = populated_plan();
        let checklist = generate(&plan);
        assert_eq!(checklist.plan_id, 7);

        assert!(checklist
            .items
            .iter()
            .any(|i| i.source == TaskSource::Custom
                && i.stage == Stage::Delivery
                && i.text == "Check risk log"));
        assert!(checklist
            .items
            .iter()
            .any(|i| i.source == TaskSource::Framework
                && i.framework.as_deref() == Some("AGILEPM")));
        assert!(checklist
            .items
            .iter()
            .any(|i| i.source == TaskSource::Manual && i.done));
    }

    #[test]
    fn test_generate_does_not_deduplicate() {
        let mut plan = Plan::empty(1, Timestamp::now());
        for _ in 0..2 {
            plan.stages.get_mut(Stage::Delivery).policy_tasks.push(StageTask {
                text: "Same text".to_string(),
                done: false,
                source: TaskSource::Manual,
            });
        }
        let checklist = generate(&plan);
        assert_eq!(checklist.items.len(), 2);
    }

    #[test]
    fn test_items_are_in_stage_order() {
        let plan = populated_plan();
        let checklist = generate(&plan);
        let positions: Vec<usize> = checklist
            .items
            .iter()
            .map(|i| Stage::ALL.iter().position(|s| *s == i.stage).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_csv_export_escapes_delimiters() {
        let mut plan = Plan::empty(1, Timestamp::now());
        plan.stages.get_mut(Stage::Delivery).policy_tasks.push(StageTask {
            text: "Review \"risk\" log, then escalate".to_string(),
            done: false,
            source: TaskSource::Manual,
        });
        let checklist = generate(&plan);

        let mut buf = Vec::new();
        checklist.write_csv(&mut buf).expect("CSV write");
        let csv = String::from_utf8(buf).expect("valid UTF-8");
        assert!(csv.starts_with("stage,source,framework,text,done"));
        assert!(csv.contains("\"Review \"\"risk\"\" log, then escalate\""));
    }

    #[test]
    fn test_json_round_trip() {
        let plan = populated_plan();
        let checklist = generate(&plan);
        let json = checklist.to_json().expect("JSON serialization");
        let parsed: Checklist = serde_json::from_str(&json).expect("JSON parse");
        assert_eq!(parsed.items, checklist.items);
    }
}
