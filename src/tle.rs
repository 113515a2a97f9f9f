//! Two-Line Element (TLE) records.
//!
//! A record is kept as its raw text: validation works on fixed columns, so
//! nothing is parsed up front. Supports batch reading of 2-line and 3-line
//! (named) inputs.
//!
//! # TLE Format Reference
//! ```text
//! Line 0 (optional): Satellite Name (up to 24 chars)
//! Line 1: 1 NNNNNC NNNNNAAA NNNNN.NNNNNNNN +.NNNNNNNN +NNNNN-N +NNNNN-N N NNNNN
//! Line 2: 2 NNNNN NNN.NNNN NNN.NNNN NNNNNNN NNN.NNNN NNN.NNNN NN.NNNNNNNNNNNNNN
//! ```
//!
//! # Example
//! ```
//! use tle_validator::tle::TleRecord;
//!
//! let input = "EXPLORER 7\n\
//! 1 00011U 59001A   25266.56989994  .00000842  00000-0  43621-3 0  9990\n\
//! 2 00011  32.8735  13.8888 1448157 340.0672  14.8534 11.90033149503789\n";
//!
//! let records = TleRecord::parse_batch(input).unwrap();
//! assert_eq!(records[0].name.as_deref(), Some("EXPLORER 7"));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("No TLEs found in input")]
    Empty,

    #[error("Failed to read TLE input: {0}")]
    Io(#[from] std::io::Error),
}

/// One candidate record: two data lines and an optional title line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TleRecord {
    /// Satellite name (from line 0, if present).
    pub name: Option<String>,
    pub line1: String,
    pub line2: String,
}

impl TleRecord {
    pub fn new(line1: impl Into<String>, line2: impl Into<String>) -> Self {
        TleRecord {
            name: None,
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    pub fn with_name(name: impl Into<String>, line1: impl Into<String>, line2: impl Into<String>) -> Self {
        TleRecord {
            name: Some(name.into()),
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    /// Split a string containing multiple TLEs (2-line or 3-line format).
    ///
    /// A line starting with '1' followed by one starting with '2' is a
    /// 2-line record, and a line directly before such a pair is its name.
    /// Every other non-blank line still ends up in a record so the validator
    /// reports it: a line 1 or line 2 without its partner gets an empty
    /// partner, and an unrecognized line directly before a '2' line is taken
    /// as a malformed line 1. Lines starting with '#' are comments. Lines are
    /// kept verbatim apart from the line terminator, so width problems
    /// survive for the validator.
    pub fn parse_batch(input: &str) -> Result<Vec<Self>, BatchError> {
        let lines: Vec<&str> = input
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty() && !l.starts_with('#'))
            .collect();

        let is_line1 = |i: usize| lines.get(i).is_some_and(|l| l.starts_with('1'));
        let is_line2 = |i: usize| lines.get(i).is_some_and(|l| l.starts_with('2'));

        let mut records = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            if is_line1(i) {
                if is_line2(i + 1) {
                    records.push(TleRecord::new(lines[i], lines[i + 1]));
                    i += 2;
                } else {
                    records.push(TleRecord::new(lines[i], ""));
                    i += 1;
                }
            } else if is_line2(i) {
                records.push(TleRecord::new("", lines[i]));
                i += 1;
            } else if is_line1(i + 1) && is_line2(i + 2) {
                records.push(TleRecord::with_name(lines[i].trim(), lines[i + 1], lines[i + 2]));
                i += 3;
            } else if is_line1(i + 1) {
                records.push(TleRecord::with_name(lines[i].trim(), lines[i + 1], ""));
                i += 2;
            } else if is_line2(i + 1) {
                records.push(TleRecord::new(lines[i], lines[i + 1]));
                i += 2;
            } else {
                records.push(TleRecord::new(lines[i], ""));
                i += 1;
            }
        }

        if records.is_empty() {
            return Err(BatchError::Empty);
        }
        Ok(records)
    }

    /// Read and split a batch from any reader.
    pub fn read_batch(mut reader: impl std::io::Read) -> Result<Vec<Self>, BatchError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse_batch(&input)
    }
}

impl std::fmt::Display for TleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(name) = &self.name {
            writeln!(f, "{name}")?;
        }
        writeln!(f, "{}", self.line1)?;
        write!(f, "{}", self.line2)
    }
}
