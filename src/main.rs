//! vitalog
//!
//! Interactive logger for daily vital signs: record blood pressure, pulse,
//! weight, and temperature per calendar date, then review or chart a range.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use vitalog::build_info;
use vitalog::cli;
use vitalog::config::StoreConfig;
use vitalog::store::CsvStore;

/// Get the vitals file path from the environment or use the default
fn get_data_path() -> PathBuf {
    std::env::var("VITALOG_DATA_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to the project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("vitals.csv");
            path
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr so stdout stays clean for the menu session
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("vitalog=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let data_path = get_data_path();
    eprintln!("Vitals file: {}", data_path.display());

    if let Some(parent) = data_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let store = CsvStore::new(StoreConfig::new(data_path));
    cli::run(&store)?;

    Ok(())
}
