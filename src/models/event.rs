use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Error type for reading the events file
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Invalid events file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A named date to count down to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub date: DateTime<Utc>,
    pub name: String,
}

/// A rendered day counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days: i64,
    pub unit: &'static str,
    pub name: String,
}

impl Countdown {
    pub fn new(event: &Event, now: DateTime<Utc>) -> Self {
        let days = days_until(event.date, now);
        Self {
            days,
            unit: if days == 1 { "day until" } else { "days until" },
            name: event.name.to_uppercase(),
        }
    }
}

/// Parse the events file: a JSON array of `[date, name]` pairs.
///
/// Entries whose date cannot be parsed are skipped with a warning.
pub fn parse_events(json: &str) -> Result<Vec<Event>, EventError> {
    let entries: Vec<(String, String)> = serde_json::from_str(json)?;

    let events = entries
        .into_iter()
        .filter_map(|(date, name)| match parse_date(&date) {
            Some(date) => Some(Event { date, name }),
            None => {
                tracing::warn!(date = %date, name = %name, "Skipping event with unparseable date");
                None
            }
        })
        .collect();

    Ok(events)
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (UTC) and `YYYY-MM-DD` (midnight UTC)
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Events at or after `now`, soonest first
pub fn upcoming(events: &[Event], now: DateTime<Utc>) -> Vec<Event> {
    let mut kept: Vec<Event> = events.iter().filter(|e| e.date >= now).cloned().collect();
    kept.sort_by_key(|e| e.date);
    kept
}

/// Whole days remaining, counting the current day: `1 + floor(diff / 1 day)`
pub fn days_until(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    1 + (date - now).num_milliseconds().div_euclid(MS_PER_DAY)
}
