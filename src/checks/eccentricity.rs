//! Eccentricity, line 2 columns [26,33).
//!
//! The field is written without its leading "0.", so a well-formed token
//! read as a plain number is integral. Any token carrying a real fractional
//! part means the record does not encode a value below 1.0.

use crate::checks::span_out_of_range;
use crate::constants::ECCENTRICITY;
use crate::outcome::{CheckKind, CheckOutcome, Failure};
use crate::span::char_len;

#[derive(Debug, Clone)]
pub struct EccentricityCheck {
    pub outcome: CheckOutcome,
    pub token: Option<String>,
    /// Value with the implied decimal restored, e.g. "1448157" -> 0.1448157.
    pub value: Option<f64>,
}

pub fn parse_eccentricity(line: &str) -> EccentricityCheck {
    let kind = CheckKind::Eccentricity;
    let Some(token) = ECCENTRICITY.extract_trimmed(line) else {
        return EccentricityCheck {
            outcome: CheckOutcome::failed(
                kind,
                span_out_of_range(2, ECCENTRICITY, char_len(line)),
                None,
            ),
            token: None,
            value: None,
        };
    };
    let owned = token.to_string();

    let parsed = match token.parse::<f64>() {
        Ok(v) => v,
        Err(e) => {
            let failure = Failure::ParseFailure {
                line: 2,
                field: ECCENTRICITY.name,
                span: ECCENTRICITY,
                token: owned.clone(),
                reason: e.to_string(),
            };
            return EccentricityCheck {
                outcome: CheckOutcome::failed(kind, failure, Some(owned.clone())),
                token: Some(owned),
                value: None,
            };
        }
    };

    if !parsed.is_finite() || parsed != parsed.trunc() {
        let failure = Failure::InvalidEccentricity {
            span: ECCENTRICITY,
            token: owned.clone(),
        };
        return EccentricityCheck {
            outcome: CheckOutcome::failed(kind, failure, Some(owned.clone())),
            token: Some(owned),
            value: None,
        };
    }

    EccentricityCheck {
        outcome: CheckOutcome::passed(kind, Some(owned.clone())),
        value: implied_decimal(token),
        token: Some(owned),
    }
}

/// Restore the implied leading decimal of an all-digit token.
fn implied_decimal(token: &str) -> Option<f64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    format!("0.{token}").parse::<f64>().ok()
}
