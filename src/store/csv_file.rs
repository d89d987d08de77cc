//! CSV-backed record store
//!
//! Loads the vitals table from a flat CSV file and persists it back with a
//! full truncating rewrite on every upsert. The store assumes exclusive
//! single-process access; there is no locking or partial-write protection.

use std::fs::File;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{StoreConfig, COLUMNS};
use crate::models::{Table, Upserted, VitalRecord};

/// Store error types. Write failures are reported to the user and the
/// session continues; they never crash the process.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to read vitals file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unable to write vitals file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Flat-file store for the vitals table.
pub struct CsvStore {
    config: StoreConfig,
}

impl CsvStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Load the persisted table. A missing file is created header-only on
    /// the spot so subsequent loads are idempotent.
    pub fn load(&self) -> StoreResult<Table> {
        let path = self.config.data_path();
        if !path.exists() {
            info!(path = %path.display(), "vitals file not found, creating it");
            let table = Table::new();
            self.persist(&table)?;
            return Ok(table);
        }

        let mut reader = csv::Reader::from_path(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut table = Table::new();
        for row in reader.deserialize() {
            let record: VitalRecord = row.map_err(|source| StoreError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            table.push(record);
        }
        debug!(records = table.len(), "loaded vitals table");
        Ok(table)
    }

    /// Insert-or-overwrite keyed by date, then persist the whole table.
    pub fn upsert(&self, record: VitalRecord) -> StoreResult<Upserted> {
        let date = record.date;
        let mut table = self.load()?;
        let outcome = table.upsert(record);
        self.persist(&table)?;
        info!(date = %date, outcome = ?outcome, "stored vitals record");
        Ok(outcome)
    }

    /// Truncating rewrite of the whole file, header first.
    fn persist(&self, table: &Table) -> StoreResult<()> {
        let path = self.config.data_path();
        let write_err = |source: csv::Error| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(|e| write_err(e.into()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer.write_record(&COLUMNS).map_err(write_err)?;
        for record in table.iter() {
            writer.serialize(record).map_err(write_err)?;
        }
        writer.flush().map_err(|e| write_err(csv::Error::from(e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn store_in(dir: &tempfile::TempDir) -> CsvStore {
        CsvStore::new(StoreConfig::new(dir.path().join("vitals.csv")))
    }

    fn record(date: NaiveDate) -> VitalRecord {
        VitalRecord {
            date,
            bp_sys: 122,
            bp_dia: 78,
            pulse_rate: 64,
            weight: 181,
            temp: 98.6,
            notes: "morning reading".to_string(),
        }
    }

    #[test]
    fn test_first_load_creates_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let table = store.load().unwrap();
        assert!(table.is_empty());

        let contents = std::fs::read_to_string(store.config().data_path()).unwrap();
        assert_eq!(
            contents.trim_end(),
            "date,bp_sys,bp_dia,pulse_rate,weight,temp,notes"
        );

        // Loading again finds the file and stays empty.
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        assert_eq!(store.upsert(record(date)).unwrap(), Upserted::Added);

        let table = store.load().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get_by_date(date).unwrap(), &record(date));
    }

    #[test]
    fn test_upsert_same_date_updates_instead_of_appending() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        store.upsert(record(date)).unwrap();
        let mut second = record(date);
        second.bp_sys = 140;
        second.notes = "evening reading".to_string();
        assert_eq!(store.upsert(second.clone()).unwrap(), Upserted::Updated);

        let table = store.load().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get_by_date(date).unwrap(), &second);
    }

    #[test]
    fn test_load_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let later = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        store.upsert(record(later)).unwrap();
        store.upsert(record(earlier)).unwrap();

        let dates: Vec<NaiveDate> = store.load().unwrap().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![later, earlier]);
    }

    #[test]
    fn test_notes_with_delimiters_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let mut rec = record(date);
        rec.notes = "dizzy, saw \"spots\" after standing".to_string();
        store.upsert(rec.clone()).unwrap();

        let table = store.load().unwrap();
        assert_eq!(table.get_by_date(date).unwrap().notes, rec.notes);
    }

    #[test]
    fn test_unparsable_numeric_cells_coerce_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vitals.csv");
        std::fs::write(
            &path,
            "date,bp_sys,bp_dia,pulse_rate,weight,temp,notes\n\
             03/09/2024,n/a,78,64,181,oops,\n",
        )
        .unwrap();

        let store = CsvStore::new(StoreConfig::new(path));
        let table = store.load().unwrap();
        let rec = table
            .get_by_date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
            .unwrap();
        assert_eq!(rec.bp_sys, 0);
        assert_eq!(rec.temp, 0.0);
        assert_eq!(rec.bp_dia, 78);
    }
}
