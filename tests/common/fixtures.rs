//! Test fixtures and constants.

use chrono::{Duration, Utc};

/// Panel geometry used by the default config
pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 480;

/// Not a decodable JPEG, but carries the JPEG magic bytes
pub const FAKE_JPEG: &[u8] = b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00fixture";

/// Build an events file with dates relative to now
pub fn events_at(entries: &[(Duration, &str)]) -> String {
    let now = Utc::now();
    let pairs: Vec<(String, &str)> = entries
        .iter()
        .map(|&(offset, name)| ((now + offset).to_rfc3339(), name))
        .collect();
    serde_json::to_string(&pairs).unwrap()
}

/// Events a whole number of days from now
pub fn events_json(entries: &[(i64, &str)]) -> String {
    let entries: Vec<_> = entries.iter().map(|&(d, n)| (Duration::days(d), n)).collect();
    events_at(&entries)
}

/// Events a whole number of hours from now
pub fn events_json_hours(entries: &[(i64, &str)]) -> String {
    let entries: Vec<_> = entries.iter().map(|&(h, n)| (Duration::hours(h), n)).collect();
    events_at(&entries)
}

/// Two upcoming events and one in the past
pub fn default_events() -> String {
    events_json(&[(10, "Holiday"), (-3, "Yesterday's news"), (40, "Birthday")])
}
