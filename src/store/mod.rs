//! Record store
//!
//! Flat-file persistence for the vitals table.

pub mod csv_file;

pub use csv_file::{CsvStore, StoreError, StoreResult};
