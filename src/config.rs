// Config module for shared configuration utilities

use crate::constants;
use std::path::PathBuf;
use std::time::Duration;

pub fn out_dir() -> PathBuf {
    std::env::var("PACKBUMP_OUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(constants::DEFAULT_OUT_DIR))
}

/// Offline when PACKBUMP_OFFLINE is "1" or "true"
pub fn offline() -> bool {
    std::env::var("PACKBUMP_OFFLINE")
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

pub fn fetch_timeout() -> Duration {
    let secs = std::env::var("PACKBUMP_FETCH_TIMEOUT")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(constants::DEFAULT_FETCH_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true")
}
