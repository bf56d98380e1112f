use crate::core::{ChangeEvent, IncidentContext};
use crate::risk::{
    explanation, find_event_correlations, score_change_event, IncidentAssessment, RiskLevel,
    ScoreFactor, ScoreResult, ScoredEvent, HIGH_THRESHOLD,
};
use im::Vector;
use log::debug;
use rayon::prelude::*;

const TOP_FACTOR_LIMIT: usize = 5;

/// Assess a whole batch of change events against one incident: score each
/// event (with the batch as context for its frequency and blast-radius
/// factors), detect cross-event correlations, and combine both into an
/// overall assessment.
///
/// Per-event scoring is pure, so it runs in parallel; the output is
/// identical to scoring sequentially in batch order.
pub fn score_event_batch(
    events: &[ChangeEvent],
    context: &IncidentContext,
) -> IncidentAssessment {
    if events.is_empty() {
        return IncidentAssessment {
            overall: ScoreResult {
                score: 0,
                level: RiskLevel::Low,
                explanation: explanation::empty_batch_explanation(),
                factors: vec![],
                recommendations: explanation::empty_batch_recommendations(),
            },
            scored: Vector::new(),
            correlations: vec![],
        };
    }

    let scored: Vec<ScoredEvent> = events
        .par_iter()
        .map(|event| ScoredEvent {
            event: event.clone(),
            result: score_change_event(event, context, events),
        })
        .collect();

    let correlations = find_event_correlations(events, context);

    let average: f64 =
        scored.iter().map(|s| s.result.score as f64).sum::<f64>() / scored.len() as f64;
    let correlation_risk: f64 = correlations.iter().map(|c| c.risk_increase).sum();
    let score = (average + correlation_risk).clamp(0.0, 100.0).round() as u32;
    let level = RiskLevel::from_score(score);

    debug!(
        "batch of {} events: average {:.1}, correlation risk {:.1}, overall {}",
        scored.len(),
        average,
        correlation_risk,
        score
    );

    let high_risk_events = scored
        .iter()
        .filter(|s| s.result.score >= HIGH_THRESHOLD)
        .count();
    let explanation = explanation::explain_batch(
        score,
        level,
        scored.len(),
        high_risk_events,
        correlations.len(),
    );
    let recommendations = explanation::batch_recommendations(level, &scored, &correlations);

    IncidentAssessment {
        overall: ScoreResult {
            score,
            level,
            explanation,
            factors: top_factors(&scored, TOP_FACTOR_LIMIT),
            recommendations,
        },
        scored: Vector::from(scored),
        correlations,
    }
}

/// The strongest contributors across every event, by weighted score. The
/// sort is stable, so equal contributions keep their original relative
/// order (batch order, then factor order within an event).
fn top_factors(scored: &[ScoredEvent], limit: usize) -> Vec<ScoreFactor> {
    let mut all: Vec<ScoreFactor> = scored
        .iter()
        .flat_map(|s| s.result.factors.iter().cloned())
        .collect();
    all.sort_by(|a, b| {
        b.weighted()
            .partial_cmp(&a.weighted())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    all.truncate(limit);
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    fn event(id: &str, kind: &str, service: &str, occurred_at: &str) -> ChangeEvent {
        ChangeEvent {
            id: id.to_string(),
            occurred_at: occurred_at.parse().unwrap(),
            service: service.to_string(),
            environment: "prod".to_string(),
            kind: kind.to_string(),
            source: "ci".to_string(),
            summary: String::new(),
            meta: Map::new(),
        }
    }

    fn context() -> IncidentContext {
        IncidentContext::new("2026-08-05T12:00:00Z".parse().unwrap())
    }

    #[test]
    fn test_empty_batch_is_a_valid_low_result() {
        let assessment = score_event_batch(&[], &context());
        assert_eq!(assessment.overall.score, 0);
        assert_eq!(assessment.overall.level, RiskLevel::Low);
        assert!(assessment.overall.factors.is_empty());
        assert_eq!(assessment.overall.recommendations.len(), 1);
        assert!(assessment.scored.is_empty());
        assert!(assessment.correlations.is_empty());
    }

    #[test]
    fn test_single_event_batch_overall_equals_individual() {
        let events = vec![event("a", "migration", "database", "2026-08-05T11:57:00Z")];
        let assessment = score_event_batch(&events, &context().with_service("database"));

        assert_eq!(assessment.scored.len(), 1);
        assert_eq!(assessment.scored[0].result.score, 76);
        // No correlations, so the overall score is the single event's score.
        assert_eq!(assessment.overall.score, 76);
        assert_eq!(assessment.overall.level, RiskLevel::High);
    }

    #[test]
    fn test_correlation_risk_added_to_average() {
        let events = vec![
            event("a", "deployment", "api", "2026-08-05T11:50:00Z"),
            event("b", "deployment", "web", "2026-08-05T11:52:00Z"),
            event("c", "migration", "db", "2026-08-05T11:55:00Z"),
        ];
        let assessment = score_event_batch(&events, &context());

        let average: f64 = assessment
            .scored
            .iter()
            .map(|s| s.result.score as f64)
            .sum::<f64>()
            / 3.0;
        // Chain 20 + migration 25 + fan-out 15.
        let correlation_risk: f64 = assessment
            .correlations
            .iter()
            .map(|c| c.risk_increase)
            .sum();
        assert_eq!(correlation_risk, 60.0);

        let expected = (average + correlation_risk).clamp(0.0, 100.0).round() as u32;
        assert_eq!(assessment.overall.score, expected);
    }

    #[test]
    fn test_overall_score_clamped_to_100() {
        // Enough deployments to push correlation risk past the clamp.
        let events: Vec<ChangeEvent> = (0..8)
            .map(|i| {
                event(
                    &format!("d{i}"),
                    "deployment",
                    &format!("svc-{i}"),
                    "2026-08-05T11:55:00Z",
                )
            })
            .collect();
        let assessment = score_event_batch(&events, &context());
        // Chain alone adds 80; fan-out adds 40 more.
        assert_eq!(assessment.overall.score, 100);
        assert_eq!(assessment.overall.level, RiskLevel::Critical);
    }

    #[test]
    fn test_top_factors_are_limited_and_sorted() {
        let events = vec![
            event("a", "migration", "database", "2026-08-05T11:57:00Z"),
            event("b", "deployment", "api", "2026-08-05T11:58:00Z"),
        ];
        let assessment = score_event_batch(&events, &context());

        assert_eq!(assessment.overall.factors.len(), 5);
        for pair in assessment.overall.factors.windows(2) {
            assert!(pair[0].weighted() >= pair[1].weighted());
        }
    }

    #[test]
    fn test_explanation_counts_high_risk_events_and_correlations() {
        let events = vec![
            event("a", "migration", "database", "2026-08-05T11:57:00Z"),
            event("b", "deployment", "api", "2026-08-05T11:58:00Z"),
        ];
        let assessment = score_event_batch(&events, &context());
        assert!(assessment.overall.explanation.contains("2 change event(s)"));
        assert!(assessment
            .overall
            .explanation
            .contains("1 correlation pattern(s)"));
    }

    #[test]
    fn test_batch_scoring_is_deterministic() {
        let events = vec![
            event("a", "deployment", "api", "2026-08-05T11:50:00Z"),
            event("b", "deployment", "web", "2026-08-05T11:52:00Z"),
            event("c", "migration", "db", "2026-08-05T11:55:00Z"),
        ];
        let first = score_event_batch(&events, &context());
        let second = score_event_batch(&events, &context());
        assert_eq!(first, second);
    }
}
