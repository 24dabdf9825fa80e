//! Plan summary for list views.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Plan, Stage};

/// Summary information about a plan for list display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Whether the plan has been marked complete
    pub completed: bool,
    /// Chosen zone code, if any
    pub zone: Option<String>,
    /// Number of selected frameworks
    pub framework_count: u32,
    /// Total tasks across all stages and sources
    pub task_count: u32,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        let mut task_count = 0usize;
        for stage in Stage::ALL {
            let data = plan.stages.get(stage);
            task_count += data.policy_tasks.len() + data.framework_tasks.len();
            if let Some(gp) = &data.good_practice {
                task_count += gp.tasks.len();
            }
        }
        for cf in plan.custom_frameworks() {
            task_count += cf.tasks.iter().map(|(_, t)| t.len()).sum::<usize>();
        }

        Self {
            id: plan.id,
            completed: plan.completed,
            zone: plan.zone().map(String::from),
            framework_count: plan.frameworks().len() as u32,
            task_count: task_count as u32,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GpTask, StageTask, TaskSource};

    #[test]
    fn test_summary_counts_all_task_sources() {
        let mut plan = Plan::empty(1, Timestamp::now());
        let data = plan.stages.get_mut(Stage::Delivery);
        data.policy_tasks.push(StageTask {
            text: "Review policy".to_string(),
            done: false,
            source: TaskSource::Factor,
        });
        data.good_practice_mut().tasks.push(GpTask {
            framework_code: "AGILEPM".to_string(),
            stage: Stage::Delivery,
            text: "Run retrospective".to_string(),
        });

        let summary = PlanSummary::from(&plan);
        assert_eq!(summary.task_count, 2);
        assert_eq!(summary.framework_count, 0);
        assert!(!summary.completed);
    }
}
