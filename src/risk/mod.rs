pub mod aggregate;
pub mod correlation;
pub mod explanation;
pub mod factors;
pub mod methodology;
pub mod scorer;

use crate::core::ChangeEvent;
use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use aggregate::score_event_batch;
pub use correlation::find_event_correlations;
pub use methodology::{methodology, Methodology};
pub use scorer::score_change_event;

// The five factor weights. They must sum to exactly 1.0; the methodology
// payload and the property tests both check this.
pub const TIMING_WEIGHT: f64 = 0.30;
pub const EVENT_KIND_WEIGHT: f64 = 0.25;
pub const CRITICALITY_WEIGHT: f64 = 0.20;
pub const FREQUENCY_WEIGHT: f64 = 0.15;
pub const BLAST_RADIUS_WEIGHT: f64 = 0.10;

pub const CRITICAL_THRESHOLD: u32 = 80;
pub const HIGH_THRESHOLD: u32 = 60;
pub const MEDIUM_THRESHOLD: u32 = 40;

/// One scored input signal: a 0-100 sub-score, the fixed fraction it
/// contributes to the final score, and the human-readable rationale.
/// Lives only within the scoring call that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub name: String,
    pub score: f64,
    pub weight: f64,
    pub description: String,
    pub evidence: Vec<String>,
}

impl ScoreFactor {
    /// The factor's contribution to the weighted sum.
    pub fn weighted(&self) -> f64 {
        self.score * self.weight
    }
}

/// Discretization of the 0-100 risk score.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,    // score < 40
    Medium, // 40-59
    High,   // 60-79
    Critical, // 80-100
}

impl RiskLevel {
    /// Breakpoints are inclusive-lower, checked in descending order, so
    /// exactly one level applies to any score.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= CRITICAL_THRESHOLD => RiskLevel::Critical,
            s if s >= HIGH_THRESHOLD => RiskLevel::High,
            s if s >= MEDIUM_THRESHOLD => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "critical",
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }

    /// Sentence-initial form for report text.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "Critical",
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The scored outcome for one change event, or for a whole batch when
/// produced by the aggregate assessor (whose `factors` are the top
/// contributors across all events).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u32,
    pub level: RiskLevel,
    pub explanation: String,
    pub factors: Vec<ScoreFactor>,
    pub recommendations: Vec<String>,
}

/// The cross-event patterns the detector recognizes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CorrelationPattern {
    DeploymentChain,
    MigrationWithDeployment,
    CrossServiceFanOut,
}

/// A detected pattern across multiple events that compounds risk beyond what
/// any individual score captures. `risk_increase` is added to the aggregate
/// score before the final clamp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub pattern: CorrelationPattern,
    pub event_ids: Vec<String>,
    pub description: String,
    pub risk_increase: f64,
}

/// One event paired with its score, as returned by batch assessment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredEvent {
    pub event: ChangeEvent,
    pub result: ScoreResult,
}

/// The overall assessment for an incident: the combined score, every
/// individual score that fed it, and the correlations that compounded it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncidentAssessment {
    pub overall: ScoreResult,
    pub scored: Vector<ScoredEvent>,
    pub correlations: Vec<Correlation>,
}
