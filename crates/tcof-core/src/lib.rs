//! Core library for the TCOF planning toolkit.
//!
//! This crate provides the business logic of The Connected Outcomes
//! Framework toolkit: plan documents spanning the four delivery stages,
//! the embedded zone and framework catalog, pure plan mutators, the
//! success-factor catalog, checklist generation, and SQLite-backed
//! persistence.
//!
//! # Architecture
//!
//! - **Models** ([`models`]): plan documents, stage data, and factors,
//!   each implementing [`std::fmt::Display`] for direct formatting
//! - **Mutators** ([`mutate`]): every plan change is a pure in-place
//!   function with no I/O, so persistence failures never corrupt state
//! - **Toolkit** ([`toolkit`]): the async facade that pairs mutators
//!   with storage and implements the recovery policy
//! - **Display Wrappers** ([`display`]): contextual formatting for
//!   collections and operation results
//!
//! # Quick Start
//!
//! ```rust
//! use tcof_core::{ToolkitBuilder, mutate::PlanCommand, params::Id};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let toolkit = ToolkitBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let plan = toolkit.create_plan().await?;
//!
//! // Mutations go through commands; storage failures collapse to None
//! let applied = toolkit
//!     .apply_command(plan.id, PlanCommand::SetZone { zone: "B2".to_string() })
//!     .await;
//!
//! if let Some((plan, _outcome)) = applied {
//!     println!("{plan}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod checklist;
pub mod db;
pub mod debounce;
pub mod display;
pub mod error;
pub mod models;
pub mod mutate;
pub mod params;
pub mod toolkit;

// Re-export commonly used types
pub use catalog::Catalog;
pub use checklist::{Checklist, ChecklistItem};
pub use db::Database;
pub use debounce::Debouncer;
pub use display::{
    CreateResult, DeleteResult, Factors, LocalDateTime, OperationStatus, PlanSummaries,
};
pub use error::{Result, ToolkitError};
pub use models::{
    Block, CustomFramework, GoodPractice, GpTask, Plan, PlanSummary, Stage, StageData, StageMap,
    StageTask, SuccessFactor, TaskSource,
};
pub use mutate::{CommandOutcome, PlanCommand};
pub use params::{DeletePlan, Id, UpsertFactor};
pub use toolkit::{Toolkit, ToolkitBuilder};
