//! Build information module
//!
//! Compile-time constants for the build number and timestamp, surfaced in
//! the startup banner.

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: u64 = match option_env!("VITALOG_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("VITALOG_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Const function to parse u64 at compile time
const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    eprintln!("===============================================");
    eprintln!("  vitalog - personal vital-sign logger");
    eprintln!("  Version: {} | Build: {}", VERSION, BUILD_NUMBER);
    eprintln!("  Compiled: {}", BUILD_TIMESTAMP);
    eprintln!("===============================================");
}
