use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A recorded modification to a service/environment: a deployment, migration,
/// config edit, and so on. Produced by external ingestion and read-only here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub id: String,
    pub occurred_at: DateTime<Utc>,
    pub service: String,
    pub environment: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub summary: String,
    /// Open metadata map carried from the ingestion side. Recognized signals
    /// include `breaking_change`, `affects_all_users`, `database_migration`,
    /// `rollback_available`, and `author`.
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl ChangeEvent {
    pub fn event_kind(&self) -> EventKind {
        EventKind::classify(&self.kind)
    }

    pub fn env(&self) -> Environment {
        Environment::classify(&self.environment)
    }

    /// Whether a metadata flag is set, using the truthiness rules of the
    /// JSON-producing ingestion side.
    pub fn meta_flag(&self, key: &str) -> bool {
        self.meta.get(key).is_some_and(is_truthy)
    }

    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.meta.get(key).and_then(Value::as_str)
    }
}

/// The incident being analyzed: when it started, and whatever else the
/// operator knows about it. Only `incident_at` is required.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncidentContext {
    pub incident_at: DateTime<Utc>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub description: Option<String>,
}

impl IncidentContext {
    pub fn new(incident_at: DateTime<Utc>) -> Self {
        Self {
            incident_at,
            service: None,
            environment: None,
            severity: None,
            description: None,
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Operator-reported incident severity. Not an input to scoring; carried for
/// reporting context.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown severity '{0}', expected critical, high, medium, or low")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => Err(ParseSeverityError(other.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        };
        write!(f, "{s}")
    }
}

/// Change-event categories the scoring tables know about. Anything the
/// ingestion side sends that is not listed here classifies as `Unknown`
/// rather than failing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Deployment,
    Migration,
    Hotfix,
    Infrastructure,
    ConfigChange,
    FeatureFlag,
    Scaling,
    Rollback,
    Maintenance,
    Unknown,
}

impl EventKind {
    pub const ALL: [EventKind; 10] = [
        EventKind::Deployment,
        EventKind::Migration,
        EventKind::Hotfix,
        EventKind::Infrastructure,
        EventKind::ConfigChange,
        EventKind::FeatureFlag,
        EventKind::Scaling,
        EventKind::Rollback,
        EventKind::Maintenance,
        EventKind::Unknown,
    ];

    pub fn classify(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "deployment" => EventKind::Deployment,
            "migration" => EventKind::Migration,
            "hotfix" => EventKind::Hotfix,
            "infrastructure" => EventKind::Infrastructure,
            "config-change" => EventKind::ConfigChange,
            "feature-flag" => EventKind::FeatureFlag,
            "scaling" => EventKind::Scaling,
            "rollback" => EventKind::Rollback,
            "maintenance" => EventKind::Maintenance,
            _ => EventKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Deployment => "deployment",
            EventKind::Migration => "migration",
            EventKind::Hotfix => "hotfix",
            EventKind::Infrastructure => "infrastructure",
            EventKind::ConfigChange => "config-change",
            EventKind::FeatureFlag => "feature-flag",
            EventKind::Scaling => "scaling",
            EventKind::Rollback => "rollback",
            EventKind::Maintenance => "maintenance",
            EventKind::Unknown => "unknown",
        }
    }
}

/// Deployment environments with distinct risk profiles. Unrecognized names
/// classify as `Other`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Staging,
    Development,
    Test,
    Other,
}

impl Environment {
    pub const ALL: [Environment; 5] = [
        Environment::Production,
        Environment::Staging,
        Environment::Development,
        Environment::Test,
        Environment::Other,
    ];

    pub fn classify(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "prod" | "production" => Environment::Production,
            "staging" => Environment::Staging,
            "dev" | "development" => Environment::Development,
            "test" => Environment::Test,
            _ => Environment::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Other => "other",
        }
    }
}

/// Truthiness of a metadata value, matching the semantics of the JavaScript
/// ingestion pipeline: null, false, 0, NaN, and "" are falsy; arrays and
/// objects are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
