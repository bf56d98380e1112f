//! Explanation and recommendation synthesis. Everything here is templated
//! text assembly over already-computed scores and factors; no scoring math
//! happens in this module, so the wording can change without touching the
//! numbers (and vice versa).

use crate::core::{ChangeEvent, EventKind};
use crate::risk::{factors, Correlation, RiskLevel, ScoreFactor, ScoredEvent};

/// The factor with the largest weighted contribution. Ties resolve to the
/// factor encountered first.
pub(crate) fn primary_factor(factors: &[ScoreFactor]) -> Option<&ScoreFactor> {
    let mut best: Option<&ScoreFactor> = None;
    for factor in factors {
        match best {
            Some(current) if factor.weighted() <= current.weighted() => {}
            _ => best = Some(factor),
        }
    }
    best
}

pub fn explain_event(score: u32, level: RiskLevel, factors: &[ScoreFactor]) -> String {
    let closing = match level {
        RiskLevel::Critical | RiskLevel::High => {
            "This change should be investigated as a potential root cause."
        }
        RiskLevel::Medium => {
            "This change may have contributed to the incident and should be reviewed."
        }
        RiskLevel::Low => "This change is unlikely to be the primary cause of the incident.",
    };

    match primary_factor(factors) {
        Some(primary) => format!(
            "{} risk score of {}/100. The primary risk factor is {}: {}. {}",
            level.label(),
            score,
            primary.name,
            primary.description,
            closing
        ),
        None => format!("{} risk score of {}/100. {}", level.label(), score, closing),
    }
}

pub fn event_recommendations(
    event: &ChangeEvent,
    level: RiskLevel,
    factors: &[ScoreFactor],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if matches!(level, RiskLevel::Critical | RiskLevel::High) {
        recommendations.push("Investigate this change immediately as a likely root cause".to_string());
        recommendations.push("Check whether this change can be rolled back safely".to_string());
        recommendations.push("Review the approval process that let this change ship".to_string());
    }

    if factor_score(factors, factors::timing::NAME) >= 80.0 {
        recommendations.push(
            "Verify the exact timing correlation between this change and the incident onset"
                .to_string(),
        );
    }

    if event.event_kind() == EventKind::Migration {
        recommendations.push(
            "Check database logs for migration errors, lock contention, or partial application"
                .to_string(),
        );
        recommendations.push(
            "Verify the schema change is backward compatible with the running application"
                .to_string(),
        );
    }

    if factor_score(factors, factors::frequency::NAME) >= 60.0 {
        recommendations.push(format!(
            "Consider a change freeze for '{}' until it stabilizes",
            event.service
        ));
    }

    if let Some(author) = event.meta_str("author") {
        recommendations.push(format!(
            "Contact {author}, who authored this change, for context"
        ));
    }

    recommendations
}

fn factor_score(factors: &[ScoreFactor], name: &str) -> f64 {
    factors
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.score)
        .unwrap_or(0.0)
}

pub fn explain_batch(
    score: u32,
    level: RiskLevel,
    events_analyzed: usize,
    high_risk_events: usize,
    correlation_count: usize,
) -> String {
    format!(
        "{} overall risk score of {}/100 based on {} change event(s) analyzed. \
         {} event(s) scored 60 or higher individually, and {} correlation pattern(s) \
         were detected.",
        level.label(),
        score,
        events_analyzed,
        high_risk_events,
        correlation_count
    )
}

pub fn empty_batch_explanation() -> String {
    "No change events found in the analysis window. The incident is unlikely to be caused \
     by a recorded change."
        .to_string()
}

pub fn empty_batch_recommendations() -> Vec<String> {
    vec![
        "Expand the analysis window, or investigate non-change causes such as infrastructure \
         failures, capacity limits, or external dependencies"
            .to_string(),
    ]
}

pub fn batch_recommendations(
    level: RiskLevel,
    scored: &[ScoredEvent],
    correlations: &[Correlation],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    match level {
        RiskLevel::Critical => {
            recommendations.push(
                "Coordinate an immediate investigation across all implicated services".to_string(),
            );
            recommendations
                .push("Consider emergency rollback of the highest-risk changes".to_string());
        }
        RiskLevel::High => {
            recommendations
                .push("Prioritize investigation of the highest-scoring changes".to_string());
            recommendations.push("Prepare rollback plans for the top candidates".to_string());
        }
        RiskLevel::Medium | RiskLevel::Low => {}
    }

    for (position, entry) in top_events(scored, 3).iter().enumerate() {
        recommendations.push(format!(
            "{}. Investigate {} to {} (score: {})",
            position + 1,
            entry.event.kind,
            entry.event.service,
            entry.result.score
        ));
    }

    if !correlations.is_empty() {
        recommendations.push(
            "Analyze the detected correlation patterns; correlated changes can interact in ways \
             individual scores miss"
                .to_string(),
        );
    }

    recommendations
}

/// Highest-scoring events first; ties keep their batch order.
fn top_events(scored: &[ScoredEvent], limit: usize) -> Vec<&ScoredEvent> {
    let mut ranked: Vec<&ScoredEvent> = scored.iter().collect();
    ranked.sort_by(|a, b| b.result.score.cmp(&a.result.score));
    ranked.truncate(limit);
    ranked
}
