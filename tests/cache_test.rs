mod common;

use ai_news_dashboard::sources::FetchSource;
use ai_news_dashboard::{Aggregator, CacheGate};
use chrono::{DateTime, Duration, TimeZone, Utc};
use common::{article, call_count, init_tracing, ScriptedSource};

const TIMEOUT_SECS: u64 = 900;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn gate_with_batches(
    batches: Vec<Vec<ai_news_dashboard::types::Article>>,
) -> (CacheGate, std::sync::Arc<std::sync::atomic::AtomicUsize>) {
    let (source, calls) = ScriptedSource::new(batches);
    let aggregator = Aggregator::new(vec![(
        "scripted".to_string(),
        Box::new(source) as Box<dyn FetchSource>,
    )]);
    (CacheGate::new(aggregator, TIMEOUT_SECS), calls)
}

#[tokio::test]
async fn fresh_snapshot_is_served_without_refetch() {
    init_tracing();

    let first = vec![article("a", "s", "2024-05-31T00:00:00")];
    let (mut gate, calls) = gate_with_batches(vec![first.clone()]);

    let at_zero = gate.get(t0()).await;
    assert_eq!(at_zero, first);
    assert_eq!(call_count(&calls), 1);

    let at_500 = gate.get(t0() + Duration::seconds(500)).await;
    assert_eq!(at_500, first);
    assert_eq!(call_count(&calls), 1, "fresh snapshot must not re-fetch");
}

#[tokio::test]
async fn stale_snapshot_triggers_refetch() {
    init_tracing();

    let first = vec![article("old", "s", "2024-05-31T00:00:00")];
    let second = vec![article("new", "s", "2024-06-01T00:00:00")];
    let (mut gate, calls) = gate_with_batches(vec![first, second.clone()]);

    gate.get(t0()).await;
    let at_901 = gate.get(t0() + Duration::seconds(901)).await;
    assert_eq!(at_901, second);
    assert_eq!(call_count(&calls), 2);
    assert_eq!(gate.captured_at(), Some(t0() + Duration::seconds(901)));
}

#[tokio::test]
async fn age_below_timeout_is_still_fresh_at_the_boundary() {
    init_tracing();

    let first = vec![article("a", "s", "2024-05-31T00:00:00")];
    let (mut gate, calls) = gate_with_batches(vec![first]);

    gate.get(t0()).await;
    gate.get(t0() + Duration::seconds(899)).await;
    assert_eq!(call_count(&calls), 1);

    // Exactly at the timeout the snapshot is stale.
    gate.get(t0() + Duration::seconds(900)).await;
    assert_eq!(call_count(&calls), 2);
}

#[tokio::test]
async fn empty_refetch_keeps_serving_the_stale_snapshot() {
    init_tracing();

    let first = vec![article("keep", "s", "2024-05-31T00:00:00")];
    let (mut gate, calls) = gate_with_batches(vec![first.clone(), Vec::new()]);

    gate.get(t0()).await;
    let after_outage = gate.get(t0() + Duration::seconds(901)).await;
    assert_eq!(after_outage, first, "staleness beats emptiness");
    assert_eq!(call_count(&calls), 2);
    // The old capture time survives; the empty run cached nothing.
    assert_eq!(gate.captured_at(), Some(t0()));
}

#[tokio::test]
async fn emptiness_is_never_cached() {
    init_tracing();

    let eventual = vec![article("late", "s", "2024-06-01T00:00:00")];
    let (mut gate, calls) = gate_with_batches(vec![Vec::new(), eventual.clone()]);

    let empty = gate.get(t0()).await;
    assert!(empty.is_empty());
    assert_eq!(gate.captured_at(), None);

    // Next request re-runs the aggregator even though no time passed.
    let second = gate.get(t0() + Duration::seconds(1)).await;
    assert_eq!(second, eventual);
    assert_eq!(call_count(&calls), 2);
}

#[tokio::test]
async fn invalidate_forces_a_refetch() {
    init_tracing();

    let first = vec![article("a", "s", "2024-05-31T00:00:00")];
    let second = vec![article("b", "s", "2024-06-01T00:00:00")];
    let (mut gate, calls) = gate_with_batches(vec![first, second.clone()]);

    gate.get(t0()).await;
    gate.invalidate();
    let refetched = gate.get(t0() + Duration::seconds(1)).await;
    assert_eq!(refetched, second);
    assert_eq!(call_count(&calls), 2);
}
