//! Satellite catalog number, line 1 columns [2,7).

use crate::checks::{parse_digits, span_out_of_range};
use crate::constants::SATELLITE_NUMBER;
use crate::outcome::{CheckKind, CheckOutcome, Failure};
use crate::span::char_len;

#[derive(Debug, Clone)]
pub struct SatelliteCheck {
    pub outcome: CheckOutcome,
    /// Catalog number exactly as written (trimmed), leading zeros kept.
    /// Kept even when rejected so sinks see the offending token.
    pub number: Option<String>,
}

/// Catalog numbers are identifiers: only parseability is checked, no range.
pub fn parse_satellite_number(line: &str) -> SatelliteCheck {
    let kind = CheckKind::SatelliteNumber;
    let Some(token) = SATELLITE_NUMBER.extract_trimmed(line) else {
        return SatelliteCheck {
            outcome: CheckOutcome::failed(
                kind,
                span_out_of_range(1, SATELLITE_NUMBER, char_len(line)),
                None,
            ),
            number: None,
        };
    };

    match parse_digits(token) {
        Ok(_) => SatelliteCheck {
            outcome: CheckOutcome::passed(kind, Some(token.to_string())),
            number: Some(token.to_string()),
        },
        Err(_) => SatelliteCheck {
            outcome: CheckOutcome::failed(
                kind,
                Failure::InvalidSatelliteNumber {
                    span: SATELLITE_NUMBER,
                    token: token.to_string(),
                },
                Some(token.to_string()),
            ),
            number: (!token.is_empty()).then(|| token.to_string()),
        },
    }
}
