// Export modules for library usage
pub mod cli;
pub mod core;
pub mod io;
pub mod risk;

// Re-export commonly used types
pub use crate::core::{
    is_truthy, ChangeEvent, Environment, EventKind, IncidentContext, ParseSeverityError, Severity,
};

pub use crate::risk::{
    find_event_correlations, methodology, score_change_event, score_event_batch, Correlation,
    CorrelationPattern, IncidentAssessment, Methodology, RiskLevel, ScoreFactor, ScoreResult,
    ScoredEvent,
};

pub use crate::io::input::{filter_to_window, parse_incident_at, read_events};
pub use crate::io::output::{create_writer, JsonWriter, OutputWriter, TerminalWriter};
