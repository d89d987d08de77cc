//! Store configuration
//!
//! The file path and schema constants for the persisted vitals table. Built
//! once in `main` and handed to the store at construction.

use std::path::{Path, PathBuf};

/// Date format used for prompts and for the persisted `date` column.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Column order of the persisted vitals file.
pub const COLUMNS: [&str; 7] = [
    "date",
    "bp_sys",
    "bp_dia",
    "pulse_rate",
    "weight",
    "temp",
    "notes",
];

/// Immutable store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    data_path: PathBuf,
}

impl StoreConfig {
    pub fn new<P: Into<PathBuf>>(data_path: P) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }

    /// Path of the CSV file holding the vitals table.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Chart output path, a sibling of the data file.
    pub fn chart_path(&self) -> PathBuf {
        self.data_path.with_file_name("vitals_chart.png")
    }
}
