//! Vital record model
//!
//! One day's recorded vital signs, serialized to the CSV columns
//! `date,bp_sys,bp_dia,pulse_rate,weight,temp,notes`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One entry per calendar date. The date is the unique key within a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalRecord {
    #[serde(with = "csv_date")]
    pub date: NaiveDate,
    #[serde(deserialize_with = "de_lenient_i64")]
    pub bp_sys: i64,
    #[serde(deserialize_with = "de_lenient_i64")]
    pub bp_dia: i64,
    #[serde(deserialize_with = "de_lenient_i64")]
    pub pulse_rate: i64,
    #[serde(deserialize_with = "de_lenient_i64")]
    pub weight: i64,
    #[serde(deserialize_with = "de_lenient_f64")]
    pub temp: f64,
    #[serde(default)]
    pub notes: String,
}

/// Serde adapter for the `mm/dd/yyyy` date column.
mod csv_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::config::DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

// Numeric cells coerce to zero when unparsable, so a hand-edited file still
// loads and the bad cell surfaces as a missing-day candidate downstream.

fn de_lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse::<f64>().map(|v| v as i64).unwrap_or(0))
}

fn de_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse::<f64>().unwrap_or(0.0))
}

/// Blood-pressure risk tier for a validated reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BpClassification {
    Normal,
    Elevated,
    HypertensionStage1,
    HypertensionStage2,
    HypertensiveCrisis,
}

impl BpClassification {
    /// Classify a validated systolic/diastolic pair. Rules are evaluated in
    /// a fixed order and the first match wins.
    ///
    /// The crisis rule (systolic > 180 or diastolic > 120) is unreachable:
    /// any such reading already matches the stage 2 rule above it. The rule
    /// table is kept as published rather than reordered.
    pub fn classify(bp_sys: i64, bp_dia: i64) -> Self {
        if (120..=129).contains(&bp_sys) && bp_dia < 80 {
            BpClassification::Elevated
        } else if (130..=139).contains(&bp_sys) || (80..=90).contains(&bp_dia) {
            BpClassification::HypertensionStage1
        } else if bp_sys >= 140 || bp_dia >= 90 {
            BpClassification::HypertensionStage2
        } else if bp_sys > 180 || bp_dia > 120 {
            BpClassification::HypertensiveCrisis
        } else {
            BpClassification::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BpClassification::Normal => "normal",
            BpClassification::Elevated => "elevated",
            BpClassification::HypertensionStage1 => "hypertension stage 1",
            BpClassification::HypertensionStage2 => "hypertension stage 2",
            BpClassification::HypertensiveCrisis => "hypertensive crisis",
        }
    }

    /// Advisory printed to the user after a successful reading.
    pub fn advisory(&self) -> &'static str {
        match self {
            BpClassification::Normal => "Great. Looks normal.",
            BpClassification::Elevated => "Just saying your BP is slightly elevated",
            BpClassification::HypertensionStage1 => "High BP. Possibly hypertension stage 1",
            BpClassification::HypertensionStage2 => "High BP. Possibly hypertension stage 2",
            BpClassification::HypertensiveCrisis => {
                "High BP. Possibly hypertensive crisis. Please consult a doctor."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_fixed_points() {
        assert_eq!(BpClassification::classify(125, 75), BpClassification::Elevated);
        assert_eq!(
            BpClassification::classify(135, 85),
            BpClassification::HypertensionStage1
        );
        assert_eq!(
            BpClassification::classify(145, 95),
            BpClassification::HypertensionStage2
        );
        assert_eq!(BpClassification::classify(115, 70), BpClassification::Normal);
    }

    #[test]
    fn test_classify_priority_order() {
        // 125/85 matches both the elevated systolic band and the stage 1
        // diastolic band; stage 1 wins because elevated requires dia < 80.
        assert_eq!(
            BpClassification::classify(125, 85),
            BpClassification::HypertensionStage1
        );
        // Diastolic 90 sits in both the stage 1 band [80,90] and the stage 2
        // threshold; the earlier rule wins.
        assert_eq!(
            BpClassification::classify(110, 90),
            BpClassification::HypertensionStage1
        );
    }

    #[test]
    fn test_crisis_rule_is_unreachable() {
        // Readings above the crisis thresholds always satisfy the stage 2
        // rule first, so the crisis tier is never produced.
        assert_eq!(
            BpClassification::classify(190, 125),
            BpClassification::HypertensionStage2
        );
        assert_eq!(
            BpClassification::classify(240, 40),
            BpClassification::HypertensionStage2
        );
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(BpClassification::classify(119, 79), BpClassification::Normal);
        assert_eq!(BpClassification::classify(120, 79), BpClassification::Elevated);
        assert_eq!(
            BpClassification::classify(130, 70),
            BpClassification::HypertensionStage1
        );
        assert_eq!(
            BpClassification::classify(140, 70),
            BpClassification::HypertensionStage2
        );
    }
}
