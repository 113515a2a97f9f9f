//! Write-through consumers of validation results.
//!
//! A sink only records what the validator already decided. A sink error is
//! reported as a [`SinkFailure`] next to the result and never changes it.

use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::outcome::Verdict;
use crate::validator::ValidationResult;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Sink rejected record: {0}")]
    Rejected(String),
}

/// Consumer of validated records.
pub trait ResultSink {
    fn name(&self) -> &str;

    fn accept(&mut self, result: &ValidationResult) -> Result<(), SinkError>;
}

/// A sink could not take a result. Never implies the record is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkFailure {
    pub sink: String,
    pub record_id: String,
    pub message: String,
}

impl std::fmt::Display for SinkFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sink '{}' failed for {}: {}", self.sink, self.record_id, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SinkReport {
    Accepted,
    Failed(SinkFailure),
}

impl SinkReport {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SinkReport::Accepted)
    }
}

/// Hand `result` to `sink`, converting an error into a [`SinkReport`].
pub fn deliver(result: &ValidationResult, sink: &mut dyn ResultSink) -> SinkReport {
    match sink.accept(result) {
        Ok(()) => SinkReport::Accepted,
        Err(e) => {
            let failure = SinkFailure {
                sink: sink.name().to_string(),
                record_id: result.label().to_string(),
                message: e.to_string(),
            };
            error!(sink = %failure.sink, record = %failure.record_id, "Sink failure: {}", failure.message);
            SinkReport::Failed(failure)
        }
    }
}

/// Forwards diagnostic events to `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ResultSink for TracingSink {
    fn name(&self) -> &str {
        "tracing"
    }

    fn accept(&mut self, result: &ValidationResult) -> Result<(), SinkError> {
        let record = result.label();
        for event in &result.events {
            let value = event.value.as_deref().unwrap_or("-");
            let message = event.message.as_deref().unwrap_or("");
            match event.verdict {
                Verdict::Pass => debug!(record, check = %event.check, value, "Pass"),
                Verdict::Fail => warn!(record, check = %event.check, value, "Failed: {message}"),
                Verdict::Skip => info!(record, check = %event.check, "Skipped: {message}"),
            }
        }
        if result.overall_valid {
            info!(record, "TLE valid");
        } else {
            warn!(record, failed = result.failures().count(), "TLE invalid");
        }
        Ok(())
    }
}

/// Row of the `tle_validation` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredValidation {
    pub id: i64,
    pub record_id: Option<String>,
    pub overall_valid: bool,
    pub line1_length: i64,
    pub line2_length: i64,
    pub checksum_expected: Option<i64>,
    pub checksum_calculated: Option<i64>,
    pub satellite_number: Option<String>,
    pub epoch_year: Option<i64>,
    pub epoch_day: Option<i64>,
    pub eccentricity_token: Option<String>,
    pub validated_at: String,
}

/// Stores extracted fields in SQLite, one row per result.
#[derive(Debug)]
pub struct SqliteSink {
    db: Connection,
}

impl SqliteSink {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, SinkError> {
        Self::with_connection(Connection::open(db_path)?)
    }

    pub fn open_in_memory() -> Result<Self, SinkError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(db: Connection) -> Result<Self, SinkError> {
        db.execute(
            "CREATE TABLE IF NOT EXISTS tle_validation (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                record_id TEXT,
                overall_valid INTEGER NOT NULL,
                line1_length INTEGER NOT NULL,
                line2_length INTEGER NOT NULL,
                checksum_expected INTEGER,
                checksum_calculated INTEGER,
                satellite_number TEXT,
                epoch_year INTEGER,
                epoch_day INTEGER,
                eccentricity_token TEXT,
                validated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self { db })
    }

    /// All stored rows in insertion order.
    pub fn rows(&self) -> Result<Vec<StoredValidation>, SinkError> {
        let mut stmt = self.db.prepare(
            "SELECT id, record_id, overall_valid, line1_length, line2_length,
                    checksum_expected, checksum_calculated, satellite_number,
                    epoch_year, epoch_day, eccentricity_token, validated_at
             FROM tle_validation ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StoredValidation {
                    id: row.get(0)?,
                    record_id: row.get(1)?,
                    overall_valid: row.get(2)?,
                    line1_length: row.get(3)?,
                    line2_length: row.get(4)?,
                    checksum_expected: row.get(5)?,
                    checksum_calculated: row.get(6)?,
                    satellite_number: row.get(7)?,
                    epoch_year: row.get(8)?,
                    epoch_day: row.get(9)?,
                    eccentricity_token: row.get(10)?,
                    validated_at: row.get(11)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn count(&self) -> Result<usize, SinkError> {
        let n: i64 = self
            .db
            .query_row("SELECT COUNT(*) FROM tle_validation", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

impl ResultSink for SqliteSink {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn accept(&mut self, result: &ValidationResult) -> Result<(), SinkError> {
        let f = &result.fields;
        self.db.execute(
            "INSERT INTO tle_validation (
                record_id, overall_valid, line1_length, line2_length,
                checksum_expected, checksum_calculated, satellite_number,
                epoch_year, epoch_day, eccentricity_token, validated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                result.record_id,
                result.overall_valid,
                f.line1_length as i64,
                f.line2_length as i64,
                f.checksum_expected.map(i64::from),
                f.checksum_calculated.map(i64::from),
                f.satellite_number,
                f.epoch_year.map(i64::from),
                f.epoch_day.map(i64::from),
                f.eccentricity_token,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}
