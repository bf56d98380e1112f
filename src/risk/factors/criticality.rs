use crate::core::{ChangeEvent, IncidentContext};
use crate::risk::{ScoreFactor, CRITICALITY_WEIGHT};

pub const NAME: &str = "Service Criticality";

const DIRECT_MATCH_SCORE: f64 = 90.0;
const DEFAULT_SCORE: f64 = 50.0;

// Substring tiers checked in priority order; the first match wins.
const TIERS: &[(&[&str], f64, &str)] = &[
    (&["payment", "billing"], 90.0, "handles payment or billing traffic"),
    (&["auth", "login"], 85.0, "gates authentication for every user"),
    (&["database", "db"], 85.0, "owns persistent state shared by other services"),
    (&["api", "gateway"], 80.0, "sits on the critical request path"),
    (&["web", "frontend"], 60.0, "is user-facing but degrades gracefully"),
];

/// How critical the changed service is, either by direct correlation with the
/// incident service or inferred from its name.
pub fn assess(event: &ChangeEvent, context: &IncidentContext) -> ScoreFactor {
    if context.service.as_deref() == Some(event.service.as_str()) {
        return ScoreFactor {
            name: NAME.to_string(),
            score: DIRECT_MATCH_SCORE,
            weight: CRITICALITY_WEIGHT,
            description: "Change was made to the same service the incident was reported against"
                .to_string(),
            evidence: vec![format!(
                "Direct correlation: '{}' is the incident service",
                event.service
            )],
        };
    }

    let (score, rationale) = infer_tier(&event.service.to_lowercase());
    ScoreFactor {
        name: NAME.to_string(),
        score,
        weight: CRITICALITY_WEIGHT,
        description: format!("Service '{}' {}", event.service, rationale),
        evidence: vec![format!(
            "Inferred criticality {}/100 from the service name",
            score
        )],
    }
}

fn infer_tier(name: &str) -> (f64, &'static str) {
    for (needles, score, rationale) in TIERS {
        if needles.iter().any(|needle| name.contains(needle)) {
            return (*score, rationale);
        }
    }
    (DEFAULT_SCORE, "has no recognized criticality profile")
}
