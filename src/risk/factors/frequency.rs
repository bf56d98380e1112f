use crate::core::{ChangeEvent, IncidentContext};
use crate::risk::{ScoreFactor, FREQUENCY_WEIGHT};
use chrono::Duration;

pub const NAME: &str = "Change Frequency";

/// How much change activity the event's service saw in the 24 hours before
/// the incident. The bucketing is deliberately non-monotonic: a single,
/// isolated change to a rarely-touched service is itself anomalous and
/// scores above the normal 2-3 range.
pub fn assess(
    event: &ChangeEvent,
    context: &IncidentContext,
    all_events: &[ChangeEvent],
) -> ScoreFactor {
    let count = recent_change_count(&event.service, context, all_events);
    let (score, description) = bucket(count);

    ScoreFactor {
        name: NAME.to_string(),
        score,
        weight: FREQUENCY_WEIGHT,
        description: description.to_string(),
        evidence: vec![format!(
            "{count} change(s) to '{}' in the 24 hours before the incident",
            event.service
        )],
    }
}

/// Events for the same service whose timestamp falls in the 24-hour window
/// ending at the incident instant. Both ends of the window are inclusive.
fn recent_change_count(
    service: &str,
    context: &IncidentContext,
    all_events: &[ChangeEvent],
) -> usize {
    let window_start = context.incident_at - Duration::hours(24);
    all_events
        .iter()
        .filter(|e| e.service == service)
        .filter(|e| e.occurred_at >= window_start && e.occurred_at <= context.incident_at)
        .count()
}

pub(crate) fn bucket(count: usize) -> (f64, &'static str) {
    match count {
        0 | 1 => (
            30.0,
            "Unusual activity: an isolated change to a rarely-touched service is itself anomalous",
        ),
        2 | 3 => (20.0, "Change rate is within the normal range"),
        4..=6 => (
            40.0,
            "High change rate increases the chance of interacting failures",
        ),
        _ => (
            70.0,
            "Very high change rate suggests firefighting or ongoing instability",
        ),
    }
}
