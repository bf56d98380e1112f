use crate::core::{ChangeEvent, Environment, IncidentContext};
use crate::risk::{explanation, factors, RiskLevel, ScoreFactor, ScoreResult};
use log::debug;

/// Score one change event against the incident. The batch is consulted by
/// the frequency and blast-radius factors; pass a one-element slice when the
/// event stands alone.
pub fn score_change_event(
    event: &ChangeEvent,
    context: &IncidentContext,
    all_events: &[ChangeEvent],
) -> ScoreResult {
    let factors = vec![
        factors::timing::assess(event, context),
        factors::event_kind::assess(event),
        factors::criticality::assess(event, context),
        factors::frequency::assess(event, context, all_events),
        factors::blast_radius::assess(event, all_events),
    ];

    let weighted_sum: f64 = factors.iter().map(ScoreFactor::weighted).sum();
    let multiplier = environment_multiplier(event.env());
    let score = (weighted_sum * multiplier).clamp(0.0, 100.0).round() as u32;
    let level = RiskLevel::from_score(score);

    debug!(
        "scored change {} as {}/100 ({}) in {}",
        event.id, score, level, event.environment
    );

    let explanation = explanation::explain_event(score, level, &factors);
    let recommendations = explanation::event_recommendations(event, level, &factors);

    ScoreResult {
        score,
        level,
        explanation,
        factors,
        recommendations,
    }
}

/// Environment scaling. A change in production carries its full weighted
/// score; lower environments are scaled down, and unrecognized environments
/// get a cautious middle ground.
pub(crate) fn environment_multiplier(environment: Environment) -> f64 {
    match environment {
        Environment::Production => 1.0,
        Environment::Staging => 0.7,
        Environment::Development => 0.3,
        Environment::Test => 0.2,
        Environment::Other => 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    fn event(service: &str, kind: &str, environment: &str, occurred_at: &str) -> ChangeEvent {
        ChangeEvent {
            id: "evt-1".to_string(),
            occurred_at: occurred_at.parse().unwrap(),
            service: service.to_string(),
            environment: environment.to_string(),
            kind: kind.to_string(),
            source: "ci".to_string(),
            summary: String::new(),
            meta: Map::new(),
        }
    }

    fn context() -> IncidentContext {
        IncidentContext::new("2026-08-05T12:00:00Z".parse().unwrap())
            .with_service("database")
    }

    #[test]
    fn test_environment_multiplier_table() {
        assert_eq!(environment_multiplier(Environment::Production), 1.0);
        assert_eq!(environment_multiplier(Environment::Staging), 0.7);
        assert_eq!(environment_multiplier(Environment::Development), 0.3);
        assert_eq!(environment_multiplier(Environment::Test), 0.2);
        assert_eq!(environment_multiplier(Environment::Other), 0.5);
    }

    #[test]
    fn test_prod_migration_three_minutes_before_incident() {
        // Timing 100 * .30 + type 85 * .25 + criticality 90 * .20
        // + frequency 30 * .15 + blast 20 * .10 = 75.75, prod x1.0 -> 76.
        let event = event("database", "migration", "prod", "2026-08-05T11:57:00Z");
        let batch = vec![event.clone()];
        let result = score_change_event(&event, &context(), &batch);

        assert_eq!(result.score, 76);
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(result.factors.len(), 5);
        assert_eq!(result.factors[0].score, 100.0);
        assert_eq!(result.factors[1].score, 85.0);
        assert_eq!(result.factors[2].score, 90.0);
        assert_eq!(result.factors[3].score, 30.0);
        assert_eq!(result.factors[4].score, 20.0);
    }

    #[test]
    fn test_staging_scales_the_same_event_down() {
        let event = event("database", "migration", "staging", "2026-08-05T11:57:00Z");
        let batch = vec![event.clone()];
        let result = score_change_event(&event, &context(), &batch);

        // 75.75 * 0.7 = 53.025 -> 53.
        assert_eq!(result.score, 53);
        assert_eq!(result.level, RiskLevel::Medium);
    }

    #[test]
    fn test_unrecognized_environment_uses_default_multiplier() {
        let event = event("database", "migration", "qa-eu", "2026-08-05T11:57:00Z");
        let batch = vec![event.clone()];
        let result = score_change_event(&event, &context(), &batch);

        // 75.75 * 0.5 = 37.875 -> 38.
        assert_eq!(result.score, 38);
        assert_eq!(result.level, RiskLevel::Low);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let event = event("database", "migration", "prod", "2026-08-05T11:57:00Z");
        let batch = vec![event.clone()];
        let first = score_change_event(&event, &context(), &batch);
        let second = score_change_event(&event, &context(), &batch);
        assert_eq!(first, second);
    }

    #[test]
    fn test_event_after_incident_in_test_environment_scores_near_zero() {
        let event = event("scratch", "maintenance", "test", "2026-08-05T13:00:00Z");
        let batch = vec![event.clone()];
        let result = score_change_event(&event, &context(), &batch);

        // 0*.3 + 30*.25 + 50*.2 + 30*.15 + 20*.1 = 24.0, x0.2 -> 4.8 -> 5.
        assert_eq!(result.score, 5);
        assert_eq!(result.level, RiskLevel::Low);
    }

    #[test]
    fn test_explanation_names_primary_factor() {
        let event = event("database", "migration", "prod", "2026-08-05T11:57:00Z");
        let batch = vec![event.clone()];
        let result = score_change_event(&event, &context(), &batch);

        // Timing contributes 30.0 weighted, the largest share.
        assert!(result.explanation.contains("Timing Proximity"));
        assert!(result
            .explanation
            .contains("should be investigated as a potential root cause"));
    }
}
