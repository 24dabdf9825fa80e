//! Collection wrapper types for displaying groups of domain objects.
//!
//! Newtype wrappers around collections so empty collections format
//! gracefully and each element renders through its own Display.

use std::{fmt, ops::Index};

use crate::models::{PlanSummary, SuccessFactor};

/// Newtype wrapper for displaying collections of plan summaries.
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plan summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the plan summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PlanSummaries {
    type Item = PlanSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{plan}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying collections of success factors.
pub struct Factors(pub Vec<SuccessFactor>);

impl Factors {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of factors in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the factors.
    pub fn iter(&self) -> std::slice::Iter<'_, SuccessFactor> {
        self.0.iter()
    }
}

impl Index<usize> for Factors {
    type Output = SuccessFactor;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Factors {
    type Item = SuccessFactor;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Factors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No success factors found.")
        } else {
            for factor in &self.0 {
                // Compact one-line form for list views
                writeln!(
                    f,
                    "- {} {} ({} tasks)",
                    factor.id,
                    factor.title,
                    factor.task_count()
                )?;
            }
            Ok(())
        }
    }
}
