//! Caller-side input handling: reading normalized change events, validating
//! the incident instant, and filtering events to the analysis window. The
//! engine assumes well-formed input, so everything malformed is rejected
//! here, before scoring.

use crate::core::ChangeEvent;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read a JSON array of normalized change events.
pub fn read_events(path: &Path) -> Result<Vec<ChangeEvent>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open events file {}", path.display()))?;
    let events: Vec<ChangeEvent> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse change events from {}", path.display()))?;
    Ok(events)
}

pub fn parse_incident_at(raw: &str) -> Result<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .with_context(|| format!("invalid incident timestamp '{raw}', expected RFC 3339"))
}

/// Keep only events inside the analysis window: at most `window_hours` before
/// the incident, and not after it. Window filtering is the caller's job, not
/// the engine's.
pub fn filter_to_window(
    events: Vec<ChangeEvent>,
    incident_at: DateTime<Utc>,
    window_hours: i64,
) -> Vec<ChangeEvent> {
    let window_start = incident_at - Duration::hours(window_hours);
    events
        .into_iter()
        .filter(|e| e.occurred_at >= window_start && e.occurred_at <= incident_at)
        .collect()
}
