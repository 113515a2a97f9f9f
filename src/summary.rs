//! End-of-run aggregation over validation results.
//!
//! Owned by the caller; results are folded in one at a time.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::outcome::CheckKind;
use crate::validator::ValidationResult;

/// One failed check of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEntry {
    pub record_id: String,
    pub check: CheckKind,
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Failed-outcome count per check.
    pub failures_by_check: BTreeMap<CheckKind, usize>,
    /// Skipped-outcome count per check.
    pub skipped_by_check: BTreeMap<CheckKind, usize>,
    pub failures: Vec<FailureEntry>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &ValidationResult) {
        self.total += 1;
        if result.overall_valid {
            self.valid += 1;
        } else {
            self.invalid += 1;
        }

        for outcome in &result.outcomes {
            if let Some(failure) = outcome.failure() {
                *self.failures_by_check.entry(outcome.kind).or_insert(0) += 1;
                self.failures.push(FailureEntry {
                    record_id: result.label().to_string(),
                    check: outcome.kind,
                    code: failure.code(),
                    message: failure.to_string(),
                });
            } else if outcome.is_skipped() {
                *self.skipped_by_check.entry(outcome.kind).or_insert(0) += 1;
            }
        }
    }

    pub fn all_valid(&self) -> bool {
        self.invalid == 0
    }
}

impl<'a> FromIterator<&'a ValidationResult> for RunSummary {
    fn from_iter<I: IntoIterator<Item = &'a ValidationResult>>(iter: I) -> Self {
        let mut summary = RunSummary::new();
        for result in iter {
            summary.record(result);
        }
        summary
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} records: {} valid, {} invalid",
            self.total, self.valid, self.invalid
        )?;
        for (check, count) in &self.failures_by_check {
            write!(f, "\n  {check}: {count} failed")?;
        }
        for (check, count) in &self.skipped_by_check {
            write!(f, "\n  {check}: {count} skipped")?;
        }
        for entry in &self.failures {
            write!(f, "\n  - {} [{}] {}", entry.record_id, entry.code, entry.message)?;
        }
        Ok(())
    }
}
