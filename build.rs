//! Build script for vitalog
//!
//! Tracks a monotonically increasing build number and embeds it, with the
//! compile timestamp, into the binary for the startup banner.

use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let counter_path = Path::new("build_number.txt");
    let build_number = next_build_number(counter_path);
    fs::write(counter_path, build_number.to_string()).expect("Failed to write build number file");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=VITALOG_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=VITALOG_BUILD_TIMESTAMP={}", timestamp);
}

fn next_build_number(path: &Path) -> u64 {
    let current = fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);
    current + 1
}
