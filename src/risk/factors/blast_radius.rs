use crate::core::ChangeEvent;
use crate::risk::{ScoreFactor, BLAST_RADIUS_WEIGHT};
use std::collections::BTreeSet;

pub const NAME: &str = "Blast Radius";

const AFFECTS_ALL_USERS_BONUS: f64 = 20.0;
const BREAKING_CHANGE_BONUS: f64 = 25.0;
const DATABASE_MIGRATION_BONUS: f64 = 15.0;

/// Breadth of simultaneous change activity around this event, as a proxy for
/// impact scope: how many services changed within +/-10 minutes, plus
/// bonuses for flags the event carries itself.
pub fn assess(event: &ChangeEvent, all_events: &[ChangeEvent]) -> ScoreFactor {
    let services = affected_services(event, all_events);
    let mut score = base_score(services.len());
    let mut evidence = vec![affected_evidence(event, &services)];

    if event.meta_flag("affects_all_users") {
        score += AFFECTS_ALL_USERS_BONUS;
        evidence.push("Change is flagged as affecting all users".to_string());
    }
    if event.meta_flag("breaking_change") {
        score += BREAKING_CHANGE_BONUS;
        evidence.push("Change is flagged as a breaking change".to_string());
    }
    if event.meta_flag("database_migration") {
        score += DATABASE_MIGRATION_BONUS;
        evidence.push("Change includes a database migration".to_string());
    }

    ScoreFactor {
        name: NAME.to_string(),
        score: score.min(100.0),
        weight: BLAST_RADIUS_WEIGHT,
        description: description(services.len()),
        evidence,
    }
}

/// The event's own service plus the services of every other event (by id)
/// within ten minutes either side. Ordered so evidence text is stable.
fn affected_services<'a>(
    event: &'a ChangeEvent,
    all_events: &'a [ChangeEvent],
) -> BTreeSet<&'a str> {
    let mut services = BTreeSet::new();
    services.insert(event.service.as_str());
    for other in all_events {
        if other.id == event.id {
            continue;
        }
        let seconds_apart = (other.occurred_at - event.occurred_at).num_seconds().abs();
        if seconds_apart <= 600 {
            services.insert(other.service.as_str());
        }
    }
    services
}

pub(crate) fn base_score(service_count: usize) -> f64 {
    match service_count {
        0 | 1 => 20.0,
        2 | 3 => 50.0,
        _ => 80.0,
    }
}

fn description(service_count: usize) -> String {
    match service_count {
        0 | 1 => "Change was isolated to a single service".to_string(),
        n if n <= 3 => format!("Concurrent changes touched {n} services"),
        n => format!("Wide fan-out: concurrent changes touched {n} services"),
    }
}

fn affected_evidence(event: &ChangeEvent, services: &BTreeSet<&str>) -> String {
    if services.len() == 1 {
        format!(
            "Only '{}' changed in the surrounding 10 minutes",
            event.service
        )
    } else {
        format!(
            "{} services changed within 10 minutes: {}",
            services.len(),
            services.iter().copied().collect::<Vec<_>>().join(", ")
        )
    }
}
