//! Per-check outcomes and the failure taxonomy.
//!
//! Every rule produces exactly one [`CheckOutcome`]. A check that could not
//! run is [`CheckStatus::Skipped`], which is neither a pass nor a failure.

use serde::Serialize;
use thiserror::Error;

use crate::span::FieldSpan;

/// The individual rules applied to a record, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CheckKind {
    Line1Length,
    Checksum,
    SatelliteNumber,
    Epoch,
    Line2Length,
    Eccentricity,
    Line2Checksum,
}

impl CheckKind {
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::Line1Length => "line1_length",
            CheckKind::Checksum => "checksum",
            CheckKind::SatelliteNumber => "satellite_number",
            CheckKind::Epoch => "epoch",
            CheckKind::Line2Length => "line2_length",
            CheckKind::Eccentricity => "eccentricity",
            CheckKind::Line2Checksum => "line2_checksum",
        }
    }

    /// TLE line (1 or 2) the check reads.
    pub fn line(&self) -> u8 {
        match self {
            CheckKind::Line1Length
            | CheckKind::Checksum
            | CheckKind::SatelliteNumber
            | CheckKind::Epoch => 1,
            CheckKind::Line2Length | CheckKind::Eccentricity | CheckKind::Line2Checksum => 2,
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a rule failed.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Failure {
    #[error("Line {line} length must be {expected} characters, got {actual}")]
    LengthMismatch {
        line: u8,
        expected: usize,
        actual: usize,
    },

    #[error("Checksum failed on line {line}: expected {expected}, calculated {calculated}")]
    ChecksumMismatch {
        line: u8,
        expected: u8,
        calculated: u8,
    },

    #[error("Failed to parse {field} on line {line} at {span}: '{token}' ({reason})")]
    ParseFailure {
        line: u8,
        field: &'static str,
        span: FieldSpan,
        token: String,
        reason: String,
    },

    #[error("Invalid satellite number '{token}' at {span}")]
    InvalidSatelliteNumber { span: FieldSpan, token: String },

    #[error("Epoch year {year:02} is not accepted ({rule})")]
    InvalidEpochYear { year: u16, rule: String },

    #[error("Epoch day {day} is out of range (must be > 0 and < {max_exclusive})")]
    InvalidEpochDay { day: u16, max_exclusive: u16 },

    #[error("Invalid eccentricity '{token}' at {span}: not representable below 1.0")]
    InvalidEccentricity { span: FieldSpan, token: String },
}

impl Failure {
    /// Stable identifier of the failure class.
    pub fn code(&self) -> &'static str {
        match self {
            Failure::LengthMismatch { .. } => "LengthMismatch",
            Failure::ChecksumMismatch { .. } => "ChecksumMismatch",
            Failure::ParseFailure { .. } => "ParseFailure",
            Failure::InvalidSatelliteNumber { .. } => "InvalidSatelliteNumber",
            Failure::InvalidEpochYear { .. } => "InvalidEpochYear",
            Failure::InvalidEpochDay { .. } => "InvalidEpochDay",
            Failure::InvalidEccentricity { .. } => "InvalidEccentricity",
        }
    }
}

/// Pass, fail, or not attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail")]
pub enum CheckStatus {
    Passed,
    Failed(Failure),
    Skipped { reason: String },
}

/// Result of one rule. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub kind: CheckKind,
    pub status: CheckStatus,
    /// Extracted value the rule looked at, if it got that far.
    pub value: Option<String>,
    pub message: Option<String>,
}

impl CheckOutcome {
    pub fn passed(kind: CheckKind, value: Option<String>) -> Self {
        CheckOutcome {
            kind,
            status: CheckStatus::Passed,
            value,
            message: None,
        }
    }

    pub fn failed(kind: CheckKind, failure: Failure, value: Option<String>) -> Self {
        let message = Some(failure.to_string());
        CheckOutcome {
            kind,
            status: CheckStatus::Failed(failure),
            value,
            message,
        }
    }

    pub fn skipped(kind: CheckKind, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        CheckOutcome {
            kind,
            message: Some(reason.clone()),
            status: CheckStatus::Skipped { reason },
            value: None,
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self.status, CheckStatus::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, CheckStatus::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, CheckStatus::Skipped { .. })
    }

    /// Ran to completion, whether it passed or failed.
    pub fn is_attempted(&self) -> bool {
        !self.is_skipped()
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.status {
            CheckStatus::Failed(f) => Some(f),
            _ => None,
        }
    }
}

/// Coarse verdict carried by a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Pass,
    Fail,
    Skip,
}

/// Structured diagnostic record for an external observer to route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticEvent {
    pub check: CheckKind,
    pub verdict: Verdict,
    pub value: Option<String>,
    pub message: Option<String>,
}

impl From<&CheckOutcome> for DiagnosticEvent {
    fn from(outcome: &CheckOutcome) -> Self {
        let verdict = match outcome.status {
            CheckStatus::Passed => Verdict::Pass,
            CheckStatus::Failed(_) => Verdict::Fail,
            CheckStatus::Skipped { .. } => Verdict::Skip,
        };
        DiagnosticEvent {
            check: outcome.kind,
            verdict,
            value: outcome.value.clone(),
            message: outcome.message.clone(),
        }
    }
}
