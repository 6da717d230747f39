//! Display helpers for attachment sizes and message timestamps.

use chrono::{DateTime, Local, Utc};

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// `1536` -> `1.5 KB`, `10485760` -> `10 MB`
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut exponent = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && exponent < UNITS.len() - 1 {
        value /= 1024.0;
        exponent += 1;
    }

    if value >= 10.0 {
        format!("{} {}", value.round(), UNITS[exponent])
    } else {
        format!("{:.1} {}", value, UNITS[exponent])
    }
}

/// Local wall-clock time such as `3:07 PM`
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%-I:%M %p").to_string()
}
