use crate::core::{ChangeEvent, EventKind, IncidentContext};
use crate::risk::{Correlation, CorrelationPattern};
use log::debug;
use std::collections::BTreeSet;

const DEPLOYMENT_CHAIN_INCREASE_PER_EVENT: f64 = 10.0;
const MIGRATION_WITH_DEPLOYMENT_INCREASE: f64 = 25.0;
const FAN_OUT_INCREASE_PER_SERVICE: f64 = 5.0;
const FAN_OUT_MIN_SERVICES: usize = 3;

/// Scan a batch for patterns that compound risk beyond what any individual
/// score captures. The three checks are independent; all of them may fire
/// for the same batch, and overlapping event sets are not deduplicated.
pub fn find_event_correlations(
    events: &[ChangeEvent],
    _context: &IncidentContext,
) -> Vec<Correlation> {
    let mut correlations = Vec::new();

    let deployments: Vec<&ChangeEvent> = events
        .iter()
        .filter(|e| e.event_kind() == EventKind::Deployment)
        .collect();
    let migration_count = events
        .iter()
        .filter(|e| e.event_kind() == EventKind::Migration)
        .count();

    if deployments.len() >= 2 {
        correlations.push(Correlation {
            pattern: CorrelationPattern::DeploymentChain,
            event_ids: deployments.iter().map(|e| e.id.clone()).collect(),
            description: format!(
                "{} deployments in the analysis window form a deployment chain; a fault in any \
                 of them can surface as a single incident",
                deployments.len()
            ),
            risk_increase: DEPLOYMENT_CHAIN_INCREASE_PER_EVENT * deployments.len() as f64,
        });
    }

    if migration_count >= 1 && !deployments.is_empty() {
        let involved: Vec<String> = events
            .iter()
            .filter(|e| {
                matches!(
                    e.event_kind(),
                    EventKind::Migration | EventKind::Deployment
                )
            })
            .map(|e| e.id.clone())
            .collect();
        correlations.push(Correlation {
            pattern: CorrelationPattern::MigrationWithDeployment,
            event_ids: involved,
            description: "A database migration landed alongside a deployment; schema and code \
                          changes can fail in combination even when each is sound alone"
                .to_string(),
            risk_increase: MIGRATION_WITH_DEPLOYMENT_INCREASE,
        });
    }

    let distinct_services: BTreeSet<&str> = events.iter().map(|e| e.service.as_str()).collect();
    if distinct_services.len() >= FAN_OUT_MIN_SERVICES {
        correlations.push(Correlation {
            pattern: CorrelationPattern::CrossServiceFanOut,
            event_ids: events.iter().map(|e| e.id.clone()).collect(),
            description: format!(
                "Changes fanned out across {} services in the same window, widening the \
                 potential impact scope",
                distinct_services.len()
            ),
            risk_increase: FAN_OUT_INCREASE_PER_SERVICE * distinct_services.len() as f64,
        });
    }

    debug!(
        "found {} correlation(s) across {} event(s)",
        correlations.len(),
        events.len()
    );

    correlations
}
