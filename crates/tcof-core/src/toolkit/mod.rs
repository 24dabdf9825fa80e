//! High-level toolkit API for managing plans and success factors.
//!
//! This module provides the main [`Toolkit`] interface for interacting
//! with the TCOF planning system. The toolkit acts as the central
//! coordinator between the application layers and the database,
//! implementing the persistence and recovery policy on top of the pure
//! mutators in [`crate::mutate`].
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Interfaces   │    │     Toolkit     │    │    Database     │
//! │  (CLI, future)  │───▶│ (plan_ops,      │───▶│   (via db/)     │
//! │                 │    │  factor_ops)    │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     User Interface      Business Logic         Data Persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Toolkit`] instances with configuration
//! - [`plan_ops`]: Plan lifecycle, command application, and checklist generation
//! - [`factor_ops`]: Success-factor catalog administration
//!
//! ## Error policy
//!
//! Operations that can legitimately find nothing return `Option`
//! inside `Result`. [`Toolkit::apply_command`] goes one step further:
//! it returns a bare `Option`, swallowing storage failures after
//! logging them, so interactive callers keep a working in-memory plan
//! even when the disk is gone.
//!
//! # Usage
//!
//! ```rust
//! use tcof_core::{ToolkitBuilder, params::Id};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let toolkit = ToolkitBuilder::new()
//!     .with_database_path(Some("/tmp/tcof.db"))
//!     .build()
//!     .await?;
//!
//! let plan = toolkit.create_plan().await?;
//! let fetched = toolkit.get_plan(&Id { id: plan.id }).await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use crate::catalog::Catalog;

// Module declarations
pub mod builder;
pub mod factor_ops;
pub mod plan_ops;

// Re-export the main types
pub use builder::ToolkitBuilder;

/// Main toolkit interface for managing plans and success factors.
pub struct Toolkit {
    pub(crate) db_path: PathBuf,
    pub(crate) catalog: Catalog,
}

impl Toolkit {
    /// Creates a new toolkit with the specified database path.
    pub(crate) fn new(db_path: PathBuf, catalog: Catalog) -> Self {
        Self { db_path, catalog }
    }

    /// The embedded zone and framework catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
