//! Display formatting functions and result types.
//!
//! Domain models carry their own `Display` implementations producing
//! markdown for rich terminal rendering; collections and operation
//! results get newtype wrappers so empty collections and confirmation
//! messages format consistently everywhere.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (PlanSummaries, Factors)
//! - [`results`]: Operation result types (CreateResult, DeleteResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! # Usage
//!
//! ```rust
//! use tcof_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Zone set to B2".to_string());
//! assert!(format!("{status}").contains("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

// Re-export commonly used types for convenience
pub use collections::{Factors, PlanSummaries};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult};
pub use status::OperationStatus;
