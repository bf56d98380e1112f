use crate::core::{ChangeEvent, EventKind};
use crate::risk::{ScoreFactor, EVENT_KIND_WEIGHT};
use serde_json::Value;

pub const NAME: &str = "Event Type Risk";

/// Baseline risk inherent to the category of change, independent of when or
/// where it landed.
pub fn assess(event: &ChangeEvent) -> ScoreFactor {
    let kind = event.event_kind();
    let score = base_score(kind);
    let mut evidence = vec![narrative_evidence(kind).to_string()];

    // A deployment that explicitly reports no rollback path is harder to
    // recover from; only a literal `false` counts, absence does not.
    if kind == EventKind::Deployment
        && event.meta.get("rollback_available") == Some(&Value::Bool(false))
    {
        evidence.push("No rollback available; recovery requires a fix-forward".to_string());
    }

    ScoreFactor {
        name: NAME.to_string(),
        score,
        weight: EVENT_KIND_WEIGHT,
        description: description(kind).to_string(),
        evidence,
    }
}

/// Fixed baseline score per change category. Unrecognized categories fall
/// back to 50 rather than failing.
pub(crate) fn base_score(kind: EventKind) -> f64 {
    match kind {
        EventKind::Migration => 85.0,
        EventKind::Hotfix => 80.0,
        EventKind::Infrastructure => 75.0,
        EventKind::Deployment => 70.0,
        EventKind::ConfigChange => 60.0,
        EventKind::FeatureFlag => 50.0,
        EventKind::Scaling => 45.0,
        EventKind::Rollback => 40.0,
        EventKind::Maintenance => 30.0,
        EventKind::Unknown => 50.0,
    }
}

fn description(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Migration => {
            "Database migrations risk data corruption and irreversible schema changes"
        }
        EventKind::Hotfix => "Hotfixes ship under time pressure with reduced review and testing",
        EventKind::Infrastructure => {
            "Infrastructure changes can destabilize everything running on top of them"
        }
        EventKind::Deployment => "Deployments introduce new code and new failure modes",
        EventKind::ConfigChange => {
            "Configuration changes take effect immediately and bypass the usual test cycle"
        }
        EventKind::FeatureFlag => "Feature flag toggles alter behavior without a deployment",
        EventKind::Scaling => "Scaling events shift capacity and traffic distribution",
        EventKind::Rollback => "Rollbacks restore a known-good state but can mask the underlying fault",
        EventKind::Maintenance => "Routine maintenance rarely causes incidents",
        EventKind::Unknown => "Unrecognized change type; assuming moderate baseline risk",
    }
}

fn narrative_evidence(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Migration => "Schema or data changes are hard to reverse once applied",
        EventKind::Hotfix => "Emergency changes skip parts of the normal release process",
        EventKind::Infrastructure => {
            "Networking, compute, and platform changes affect many services at once"
        }
        EventKind::Deployment => "New application code is the most common incident trigger",
        EventKind::ConfigChange => "Config edits are rarely covered by automated tests",
        EventKind::FeatureFlag => "Flag flips change behavior instantly for targeted cohorts",
        EventKind::Scaling => "Capacity changes can expose load-related defects",
        EventKind::Rollback => "Reverting to a previous version is usually stabilizing",
        EventKind::Maintenance => "Planned maintenance follows a rehearsed procedure",
        EventKind::Unknown => "No risk profile for this change type; using the default",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn event_of_kind(kind: &str) -> ChangeEvent {
        ChangeEvent {
            id: "evt-1".to_string(),
            occurred_at: "2026-08-05T11:57:00Z".parse().unwrap(),
            service: "api".to_string(),
            environment: "prod".to_string(),
            kind: kind.to_string(),
            source: "ci".to_string(),
            summary: String::new(),
            meta: Map::new(),
        }
    }

    #[test]
    fn test_base_score_table() {
        assert_eq!(base_score(EventKind::Migration), 85.0);
        assert_eq!(base_score(EventKind::Hotfix), 80.0);
        assert_eq!(base_score(EventKind::Infrastructure), 75.0);
        assert_eq!(base_score(EventKind::Deployment), 70.0);
        assert_eq!(base_score(EventKind::ConfigChange), 60.0);
        assert_eq!(base_score(EventKind::FeatureFlag), 50.0);
        assert_eq!(base_score(EventKind::Scaling), 45.0);
        assert_eq!(base_score(EventKind::Rollback), 40.0);
        assert_eq!(base_score(EventKind::Maintenance), 30.0);
        assert_eq!(base_score(EventKind::Unknown), 50.0);
    }

    #[test]
    fn test_unknown_type_uses_default() {
        let factor = assess(&event_of_kind("blue-green-cutover"));
        assert_eq!(factor.score, 50.0);
        assert!(factor.description.contains("Unrecognized"));
    }

    #[test]
    fn test_migration_cites_data_risk() {
        let factor = assess(&event_of_kind("migration"));
        assert_eq!(factor.score, 85.0);
        assert!(factor.description.contains("data corruption"));
    }

    #[test]
    fn test_deployment_without_rollback_adds_evidence() {
        let mut event = event_of_kind("deployment");
        event.meta.insert("rollback_available".to_string(), json!(false));
        let factor = assess(&event);
        assert_eq!(factor.evidence.len(), 2);
        assert!(factor.evidence[1].contains("No rollback available"));
    }

    #[test]
    fn test_rollback_flag_must_be_literal_false() {
        // Absent flag: no extra evidence.
        let factor = assess(&event_of_kind("deployment"));
        assert_eq!(factor.evidence.len(), 1);

        // String "false" is not the boolean false.
        let mut event = event_of_kind("deployment");
        event.meta.insert("rollback_available".to_string(), json!("false"));
        let factor = assess(&event);
        assert_eq!(factor.evidence.len(), 1);
    }
}
