use causemap::{score_event_batch, ChangeEvent, IncidentContext};
use chrono::Duration;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::Map;
use std::hint::black_box;

fn create_test_batch(num_events: usize) -> (Vec<ChangeEvent>, IncidentContext) {
    let incident_at = "2026-08-05T12:00:00Z".parse().unwrap();
    let kinds = [
        "deployment",
        "migration",
        "config-change",
        "scaling",
        "hotfix",
    ];
    let services = ["payments-api", "auth-service", "orders-db", "gateway", "web"];

    let events = (0..num_events)
        .map(|i| ChangeEvent {
            id: format!("evt-{i}"),
            occurred_at: incident_at - Duration::minutes((i as i64 * 7) % 1440),
            service: services[i % services.len()].to_string(),
            environment: "prod".to_string(),
            kind: kinds[i % kinds.len()].to_string(),
            source: "bench".to_string(),
            summary: String::new(),
            meta: Map::new(),
        })
        .collect();

    let context = IncidentContext::new(incident_at).with_service("payments-api");
    (events, context)
}

fn bench_batch_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_scoring");

    for size in [10, 100, 1000] {
        let (events, context) = create_test_batch(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| score_event_batch(black_box(&events), black_box(&context)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_batch_scoring);
criterion_main!(benches);
