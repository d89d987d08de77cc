//! Input validation
//!
//! Pure parse and range-check functions for each vital field. These never
//! loop or prompt; the interactive retry loop lives in the CLI, which prints
//! the error and re-requests input on `Err`.

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::DATE_FORMAT;

pub const BP_SYS_MIN: i64 = 50;
pub const BP_SYS_MAX: i64 = 250;
pub const BP_DIA_MIN: i64 = 30;
pub const BP_DIA_MAX: i64 = 150;
pub const PULSE_RATE_MIN: f64 = 45.0;
pub const PULSE_RATE_MAX: f64 = 250.0;
pub const WEIGHT_MIN: f64 = 50.0;
pub const WEIGHT_MAX: f64 = 500.0;
pub const TEMP_MIN: f64 = 90.0;
pub const TEMP_MAX: f64 = 115.0;

/// Validation failure. `Format` is malformed text, `Range` is a value
/// outside its domain bounds (including systolic <= diastolic). Both carry
/// the message shown to the user at the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    Format(String),
    #[error("{0}")]
    Range(String),
}

/// Parse a strict `mm/dd/yyyy` date.
pub fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::Format("Invalid date".to_string()))
}

/// Parse a `sys/dia` blood-pressure reading. Exactly two numeric tokens are
/// required; the pair must satisfy systolic in [50,250], diastolic in
/// [30,150], and systolic > diastolic.
pub fn parse_blood_pressure(text: &str) -> Result<(i64, i64), ValidationError> {
    let format_err = || {
        ValidationError::Format(
            "Invalid blood pressure. Please enter two numbers, e.g. 120/80".to_string(),
        )
    };

    let parts: Vec<&str> = text.trim().split('/').collect();
    if parts.len() != 2 {
        return Err(format_err());
    }
    for part in &parts {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(format_err());
        }
    }

    let bp_sys: i64 = parts[0].parse().map_err(|_| format_err())?;
    let bp_dia: i64 = parts[1].parse().map_err(|_| format_err())?;

    let sys_ok = (BP_SYS_MIN..=BP_SYS_MAX).contains(&bp_sys);
    let dia_ok = (BP_DIA_MIN..=BP_DIA_MAX).contains(&bp_dia);
    if !sys_ok || !dia_ok || bp_sys <= bp_dia {
        return Err(ValidationError::Range(
            "Please enter some realistic values".to_string(),
        ));
    }

    Ok((bp_sys, bp_dia))
}

/// Parse a number and check it against an inclusive range.
pub fn parse_ranged_number(text: &str, min: f64, max: f64) -> Result<f64, ValidationError> {
    let value: f64 = text.trim().parse().map_err(|_| {
        ValidationError::Format("Invalid input. Please enter a number.".to_string())
    })?;
    if !(min..=max).contains(&value) {
        return Err(ValidationError::Range(format!(
            "Please enter a value between {} and {}.",
            min, max
        )));
    }
    Ok(value)
}

pub fn parse_pulse_rate(text: &str) -> Result<i64, ValidationError> {
    parse_ranged_number(text, PULSE_RATE_MIN, PULSE_RATE_MAX).map(|v| v as i64)
}

pub fn parse_weight(text: &str) -> Result<i64, ValidationError> {
    parse_ranged_number(text, WEIGHT_MIN, WEIGHT_MAX).map(|v| v as i64)
}

pub fn parse_temp(text: &str) -> Result<f64, ValidationError> {
    parse_ranged_number(text, TEMP_MIN, TEMP_MAX)
}

/// Trimmed passthrough; empty notes stay empty.
pub fn parse_notes(text: &str) -> String {
    text.trim().to_string()
}
