//! Success-factor catalog model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::StageMap;

/// An admin-editable success factor with canonical tasks per stage.
///
/// Factors are reference data, not part of any plan. All four stage
/// arrays exist on every factor; editors repair missing arrays before
/// persisting and report the repair instead of absorbing it silently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuccessFactor {
    /// Identifier, conventionally "<major>.<minor>" (e.g. "1.3")
    pub id: String,

    /// Display name
    pub title: String,

    /// Canonical task texts per stage
    #[serde(default)]
    pub tasks: StageMap<Vec<String>>,

    /// Timestamp when the factor was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the factor was last modified (UTC)
    pub updated_at: Timestamp,
}

impl SuccessFactor {
    /// Total number of tasks across all stages.
    pub fn task_count(&self) -> usize {
        self.tasks.iter().map(|(_, tasks)| tasks.len()).sum()
    }
}

/// Validates a factor identifier of the form "<major>.<minor>".
pub fn validate_factor_id(id: &str) -> Result<(), String> {
    let mut parts = id.split('.');
    let valid = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(major), Some(minor), None)
            if major.parse::<u32>().is_ok() && minor.parse::<u32>().is_ok()
    );
    if valid {
        Ok(())
    } else {
        Err(format!(
            "Invalid factor ID '{id}'. Expected \"<major>.<minor>\", e.g. \"1.3\""
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_factor_id_accepts_major_minor() {
        assert!(validate_factor_id("1.3").is_ok());
        assert!(validate_factor_id("12.0").is_ok());
    }

    #[test]
    fn test_validate_factor_id_rejects_malformed() {
        assert!(validate_factor_id("1").is_err());
        assert!(validate_factor_id("1.2.3").is_err());
        assert!(validate_factor_id("a.b").is_err());
        assert!(validate_factor_id("").is_err());
    }
}
