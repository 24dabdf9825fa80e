//! Data models for plans, stages, and the success-factor catalog.
//!
//! Domain models only; Display implementations live in
//! [`crate::display::models`] to keep data structures and presentation
//! logic separate, following the same split the rest of the crate uses.

pub mod factor;
pub mod plan;
pub mod stage;
pub mod summary;

pub use factor::{validate_factor_id, SuccessFactor};
pub use plan::{CustomFramework, GoodPractice, GpTask, Plan, StageData, StageTask, TaskSource};
pub use stage::{Block, Stage, StageMap};
pub use summary::PlanSummary;
