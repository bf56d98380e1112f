#![allow(dead_code)]

use causemap::{ChangeEvent, IncidentContext};
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};

pub const INCIDENT_AT: &str = "2026-08-05T12:00:00Z";

pub fn incident_at() -> DateTime<Utc> {
    INCIDENT_AT.parse().unwrap()
}

pub fn context() -> IncidentContext {
    IncidentContext::new(incident_at())
}

/// A production change event `minutes` before the incident.
pub fn event_minutes_before(id: &str, kind: &str, service: &str, minutes: i64) -> ChangeEvent {
    ChangeEvent {
        id: id.to_string(),
        occurred_at: incident_at() - Duration::minutes(minutes),
        service: service.to_string(),
        environment: "prod".to_string(),
        kind: kind.to_string(),
        source: "test-harness".to_string(),
        summary: format!("{kind} to {service}"),
        meta: Map::new(),
    }
}

pub fn with_meta(mut event: ChangeEvent, key: &str, value: Value) -> ChangeEvent {
    event.meta.insert(key.to_string(), value);
    event
}
