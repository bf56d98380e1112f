use crate::core::{ChangeEvent, IncidentContext};
use crate::risk::{ScoreFactor, TIMING_WEIGHT};
use chrono::{DateTime, Utc};

pub const NAME: &str = "Timing Proximity";

/// Score how close the change landed to the incident. Changes after the
/// incident score zero; otherwise closer is higher.
pub fn assess(event: &ChangeEvent, context: &IncidentContext) -> ScoreFactor {
    let minutes = minutes_before_incident(event.occurred_at, context.incident_at);
    let (score, label) = bucket(minutes);

    let (description, evidence) = if minutes < 0.0 {
        (
            "Change occurred after the incident".to_string(),
            vec![format!(
                "Occurred after incident: change landed {} after the incident began",
                format_elapsed(-minutes)
            )],
        )
    } else {
        (
            format!(
                "Change occurred {} before the incident",
                format_elapsed(minutes)
            ),
            vec![format!(
                "{label}: {} between change and incident",
                format_elapsed(minutes)
            )],
        )
    };

    ScoreFactor {
        name: NAME.to_string(),
        score,
        weight: TIMING_WEIGHT,
        description,
        evidence,
    }
}

fn minutes_before_incident(occurred_at: DateTime<Utc>, incident_at: DateTime<Utc>) -> f64 {
    (incident_at - occurred_at).num_seconds() as f64 / 60.0
}

/// Fixed proximity buckets. Negative means the change postdates the incident
/// and cannot have caused it.
pub(crate) fn bucket(minutes: f64) -> (f64, &'static str) {
    match minutes {
        m if m < 0.0 => (0.0, "Occurred after incident"),
        m if m <= 5.0 => (100.0, "Extremely close timing"),
        m if m <= 15.0 => (85.0, "Very close timing"),
        m if m <= 30.0 => (70.0, "Close timing"),
        m if m <= 60.0 => (50.0, "Moderate timing proximity"),
        m if m <= 120.0 => (30.0, "Within the incident window"),
        _ => (10.0, "Distant timing"),
    }
}

fn format_elapsed(minutes: f64) -> String {
    if minutes > 120.0 {
        format!("{:.1} hours", minutes / 60.0)
    } else {
        format!("{} minutes", minutes.round() as i64)
    }
}
