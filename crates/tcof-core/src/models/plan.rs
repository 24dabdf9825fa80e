//! Plan document model and the per-stage data it carries.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Block, Stage, StageMap};

/// Where a checklist task originally came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskSource {
    /// Canonical task from the success-factor catalog
    Factor,
    /// Task auto-selected or toggled from a good-practice framework
    Framework,
    /// Task from a user-defined custom framework
    Custom,
    /// Task typed in directly by the user
    Manual,
}

impl TaskSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskSource::Factor => "factor",
            TaskSource::Framework => "framework",
            TaskSource::Custom => "custom",
            TaskSource::Manual => "manual",
        }
    }
}

/// A task tracked inside a stage's Block 2 lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageTask {
    /// Task description
    pub text: String,

    /// Whether the user has ticked this task off
    #[serde(default)]
    pub done: bool,

    /// Origin of the task
    pub source: TaskSource,
}

/// A selected good-practice task.
///
/// Unique within its (framework_code, stage) pair; toggling acts as set
/// membership on the exact text, never as a counter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpTask {
    /// Code of the framework (catalog or custom) the task belongs to
    pub framework_code: String,

    /// Stage the task applies to (redundant with the containing stage,
    /// kept for indexing convenience)
    pub stage: Stage,

    /// Task description, non-empty
    pub text: String,
}

/// A user-defined good-practice framework with its own per-stage tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomFramework {
    /// Opaque identifier, generated when the framework is created
    pub id: String,

    /// User-supplied label
    pub name: String,

    /// Task texts per stage; all four arrays always present
    #[serde(default)]
    pub tasks: StageMap<Vec<String>>,
}

/// The Block 3 good-practice selection record for one stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GoodPractice {
    /// Chosen delivery zone code, if any
    #[serde(default)]
    pub zone: Option<String>,

    /// Selected framework codes, unique and insertion-ordered
    #[serde(default)]
    pub frameworks: Vec<String>,

    /// Toggled-on good-practice tasks
    #[serde(default)]
    pub tasks: Vec<GpTask>,

    /// User-defined frameworks
    #[serde(default)]
    pub custom_frameworks: Vec<CustomFramework>,
}

/// Per-stage plan data, grouped by owning block.
///
/// Arrays are always present, never optional; only the good-practice
/// record is lazily created, and all writers go through
/// [`StageData::good_practice_mut`] so the healing logic lives in one
/// place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StageData {
    /// Block 3: good-practice selections
    #[serde(default)]
    pub good_practice: Option<GoodPractice>,

    /// Block 1: opaque goal-map payloads
    #[serde(default)]
    pub mappings: Vec<serde_json::Value>,

    /// Block 2: policy tasks
    #[serde(default)]
    pub policy_tasks: Vec<StageTask>,

    /// Block 2: framework-derived tasks
    #[serde(default)]
    pub framework_tasks: Vec<StageTask>,
}

impl StageData {
    /// Returns the good-practice record, creating an empty one if absent.
    pub fn good_practice_mut(&mut self) -> &mut GoodPractice {
        self.good_practice.get_or_insert_with(GoodPractice::default)
    }

    /// Resets the fields owned by one block, leaving the others intact.
    pub fn clear_block(&mut self, block: Block) {
        match block {
            Block::Discover => self.mappings.clear(),
            Block::Design => {
                self.policy_tasks.clear();
                self.framework_tasks.clear();
            }
            Block::Complete => self.good_practice = None,
        }
    }
}

/// A complete TCOF plan spanning the four delivery stages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Per-stage data, all four stages always present
    pub stages: StageMap<StageData>,

    /// Set true only by an explicit mark-complete action
    #[serde(default)]
    pub completed: bool,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Plan {
    /// Creates an empty plan with all four stages pre-populated.
    pub fn empty(id: u64, now: Timestamp) -> Self {
        Self {
            id,
            stages: StageMap::default(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// The chosen zone. All stages mirror the same value, but
    /// Identification is authoritative for reads.
    pub fn zone(&self) -> Option<&str> {
        self.stages
            .get(Stage::Identification)
            .good_practice
            .as_ref()
            .and_then(|gp| gp.zone.as_deref())
    }

    /// Selected framework codes, read from the authoritative stage.
    pub fn frameworks(&self) -> &[String] {
        self.stages
            .get(Stage::Identification)
            .good_practice
            .as_ref()
            .map(|gp| gp.frameworks.as_slice())
            .unwrap_or_default()
    }

    /// Custom frameworks live on the authoritative stage only; each one
    /// already spans all four stages internally.
    pub fn custom_frameworks(&self) -> &[CustomFramework] {
        self.stages
            .get(Stage::Identification)
            .good_practice
            .as_ref()
            .map(|gp| gp.custom_frameworks.as_slice())
            .unwrap_or_default()
    }

    /// Looks up a custom framework by its identifier.
    pub fn custom_framework(&self, id: &str) -> Option<&CustomFramework> {
        self.custom_frameworks().iter().find(|cf| cf.id == id)
    }

    /// Refreshes the modification timestamp.
    pub(crate) fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
