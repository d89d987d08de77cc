//! Vitals table
//!
//! Insertion-ordered collection of vital records, the in-memory image of the
//! persisted file. Records are keyed by date; upsert overwrites in place.

use chrono::NaiveDate;

use super::VitalRecord;

/// Outcome of an upsert, so callers can phrase their confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Added,
    Updated,
}

/// The vitals table. Order is insertion order, not date order.
#[derive(Debug, Clone, Default)]
pub struct Table {
    records: Vec<VitalRecord>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: VitalRecord) {
        self.records.push(record);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VitalRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get_by_date(&self, date: NaiveDate) -> Option<&VitalRecord> {
        self.records.iter().find(|r| r.date == date)
    }

    /// Insert-or-overwrite keyed by date. An existing record keeps its
    /// position; only the non-date fields are replaced.
    pub fn upsert(&mut self, record: VitalRecord) -> Upserted {
        match self.records.iter_mut().find(|r| r.date == record.date) {
            Some(existing) => {
                existing.bp_sys = record.bp_sys;
                existing.bp_dia = record.bp_dia;
                existing.pulse_rate = record.pulse_rate;
                existing.weight = record.weight;
                existing.temp = record.temp;
                existing.notes = record.notes;
                Upserted::Updated
            }
            None => {
                self.records.push(record);
                Upserted::Added
            }
        }
    }
}
