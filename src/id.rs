//! ID generation utilities for ReplayCI
//!
//! Provides the clock helper used for event timestamps and the run identifier generator.

use rand::Rng;

const RUN_ID_SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Generate a run ID
///
/// Format: `{YYYYMMDD}_{HHMMSS}_{4 random lowercase alphanumerics}`
/// Example: `20260119_142301_k3x9`
///
/// IDs sort chronologically, which is what latest-fixtures resolution relies on.
pub fn generate_run_id() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let mut rng = rand::rng();
    let suffix: String = (0..4)
        .map(|_| RUN_ID_SUFFIX_CHARSET[rng.random_range(0..RUN_ID_SUFFIX_CHARSET.len())] as char)
        .collect();
    format!("{}_{}", timestamp, suffix)
}
