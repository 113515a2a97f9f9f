//! Individual field checkers.
//!
//! Each checker reads one fixed span, converts it, and returns a
//! [`CheckOutcome`](crate::outcome::CheckOutcome) together with whatever it
//! managed to extract. Checkers never panic and never return `Err`: every
//! conversion problem becomes a failed outcome.

pub mod checksum;
pub mod eccentricity;
pub mod epoch;
pub mod length;
pub mod satellite;

use crate::outcome::Failure;
use crate::span::FieldSpan;

/// Parse an all-digit token (surrounding whitespace allowed).
///
/// Signs, inner spaces and any other characters are rejected.
pub(crate) fn parse_digits(token: &str) -> Result<u32, String> {
    let token = token.trim();
    if token.is_empty() {
        return Err("empty field".to_string());
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err("expected digits only".to_string());
    }
    token.parse::<u32>().map_err(|e| e.to_string())
}

/// Failure for a span that does not fit inside the line.
pub(crate) fn span_out_of_range(line: u8, span: FieldSpan, line_len: usize) -> Failure {
    Failure::ParseFailure {
        line,
        field: span.name,
        span,
        token: String::new(),
        reason: format!("line is {line_len} characters, span needs {}", span.end),
    }
}
