//! Range materialization
//!
//! Turns the sparse vitals table into a dense day-by-day sequence for a
//! query window. Days without a record become all-zero rows, and any row
//! whose five vitals are all zero is labeled a missing day.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Table, VitalRecord};

/// Notes text applied to all-zero rows.
pub const MISSING_DAY_NOTE: &str = "missing day";

/// One materialized calendar day: a real record's values or a synthetic
/// all-zero row. `date_index` is the slot's calendar date, used for the
/// chart x-axis and the tail report.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySlot {
    pub date_index: NaiveDate,
    pub bp_sys: i64,
    pub bp_dia: i64,
    pub pulse_rate: i64,
    pub weight: i64,
    pub temp: f64,
    pub notes: String,
}

impl DailySlot {
    fn from_record(record: &VitalRecord) -> Self {
        Self {
            date_index: record.date,
            bp_sys: record.bp_sys,
            bp_dia: record.bp_dia,
            pulse_rate: record.pulse_rate,
            weight: record.weight,
            temp: record.temp,
            notes: record.notes.clone(),
        }
    }

    fn empty(date: NaiveDate) -> Self {
        Self {
            date_index: date,
            bp_sys: 0,
            bp_dia: 0,
            pulse_rate: 0,
            weight: 0,
            temp: 0.0,
            notes: String::new(),
        }
    }

    /// True when all five vital fields are exactly zero. A stored record
    /// with genuinely zero vitals is indistinguishable from an absent day.
    pub fn is_missing_day(&self) -> bool {
        self.bp_sys == 0
            && self.bp_dia == 0
            && self.pulse_rate == 0
            && self.weight == 0
            && self.temp == 0.0
    }
}

/// Materialize the ordered daily sequence for `[start, end]` (inclusive).
///
/// The dense span runs between the filtered subset's own minimum and maximum
/// dates, not the requested window edges: a window with no matching records
/// yields an empty sequence rather than a zero-filled range, and a window
/// whose edges hold no data densifies only between the dates that do. Since
/// the filter already restricts to the window, the span equals the window
/// whenever records sit on both edges. `start > end` filters to nothing and
/// so also yields an empty sequence.
pub fn materialize_range(table: &Table, start: NaiveDate, end: NaiveDate) -> Vec<DailySlot> {
    let mut by_date: BTreeMap<NaiveDate, &VitalRecord> = BTreeMap::new();
    for record in table.iter() {
        if record.date >= start && record.date <= end {
            // Last write wins on duplicate dates, matching store semantics.
            by_date.insert(record.date, record);
        }
    }

    let (first, last) = match (
        by_date.keys().next().copied(),
        by_date.keys().next_back().copied(),
    ) {
        (Some(first), Some(last)) => (first, last),
        _ => return Vec::new(),
    };

    let mut slots = Vec::new();
    let mut day = first;
    loop {
        let mut slot = match by_date.get(&day) {
            Some(record) => DailySlot::from_record(record),
            None => DailySlot::empty(day),
        };
        if slot.is_missing_day() {
            slot.notes = MISSING_DAY_NOTE.to_string();
        }
        slots.push(slot);

        if day == last {
            break;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    slots
}
