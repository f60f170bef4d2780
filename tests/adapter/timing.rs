//! Per-call timing accumulation

use crate::common::*;
use cpbench::{field_map, AdapterConfig, CallTiming, ClusterpointAdapter, Coordinator, Db, Status};
use std::sync::Arc;

const EPS: f64 = 1e-9;

fn scripted_adapter(
    script: Vec<CallTiming>,
) -> (ClusterpointAdapter<ScriptedConnector>, ScriptedConnector, Arc<Coordinator>) {
    let connector = ScriptedConnector::new(script);
    let coordinator = Arc::new(Coordinator::new());
    let mut db = ClusterpointAdapter::new(
        AdapterConfig::default(),
        connector.clone(),
        Arc::clone(&coordinator),
    );
    db.init().unwrap();
    (db, connector, coordinator)
}

fn script() -> Vec<CallTiming> {
    vec![
        CallTiming {
            total: 0.010,
            request: 0.015,
            network: 0.002,
        },
        CallTiming {
            total: 0.020,
            request: 0.031,
            network: 0.004,
        },
        CallTiming {
            total: 0.005,
            request: 0.006,
            network: 0.001,
        },
    ]
}

#[test]
fn total_time_is_sum_of_reported_times() {
    let script = script();
    let (mut db, _, _) = scripted_adapter(script.clone());

    let n = 10;
    for i in 0..n {
        assert_eq!(
            db.insert(TABLE, &format!("user{}", i), &record("a")),
            Status::Ok
        );
    }

    let expected: f64 = (0..n).map(|i| script[i % script.len()].total).sum();
    let entry = db.timing().unwrap();
    assert_eq!(entry.calls, n as u64);
    assert!((entry.total - expected).abs() < EPS);
}

#[test]
fn components_are_accumulated_separately() {
    let script = script();
    let (mut db, _, _) = scripted_adapter(script.clone());

    for i in 0..3 {
        db.insert(TABLE, &format!("user{}", i), &record("a"));
    }

    let entry = db.timing().unwrap();
    let total: f64 = script.iter().map(|t| t.total).sum();
    let request: f64 = script.iter().map(|t| t.request).sum();
    let network: f64 = script.iter().map(|t| t.network).sum();
    assert!((entry.total - total).abs() < EPS);
    assert!((entry.request - request).abs() < EPS);
    assert!((entry.network - network).abs() < EPS);
}

#[test]
fn every_operation_is_timed() {
    let (mut db, _, _) = scripted_adapter(script());

    db.insert(TABLE, "user1", &record("a"));
    db.update(TABLE, "user1", &field_map([("field0", "b")]));
    let mut out = Default::default();
    db.read(TABLE, "user1", None, &mut out);
    let mut rows = Vec::new();
    db.scan(TABLE, "user1", 1, None, &mut rows);
    db.delete(TABLE, "user1");

    assert_eq!(db.timing().unwrap().calls, 5);
}

#[test]
fn failed_operations_are_timed_too() {
    let (mut db, _, _) = scripted_adapter(script());

    assert_eq!(db.delete(TABLE, "missing"), Status::Error);
    let entry = db.timing().unwrap();
    assert_eq!(entry.calls, 1);
    assert!((entry.total - 0.010).abs() < EPS);
}

#[test]
fn transport_failures_record_zero_store_time() {
    let (mut db, connector, _) = scripted_adapter(script());

    connector.store.set_offline(true);
    assert_eq!(db.insert(TABLE, "user1", &record("a")), Status::Error);
    let entry = db.timing().unwrap();
    assert_eq!(entry.calls, 1);
    assert_eq!(entry.total, 0.0);
    assert!((entry.request - 0.015).abs() < EPS);
}

#[test]
fn cleanup_hands_entry_to_coordinator() {
    let (mut db, _, coordinator) = scripted_adapter(script());
    let id = db.instance_id().unwrap();

    db.insert(TABLE, "user1", &record("a"));
    db.insert(TABLE, "user2", &record("a"));

    let totals = db.cleanup().unwrap().expect("last instance reports totals");
    assert!((totals.total - 0.030).abs() < EPS);
    assert!((totals.request - 0.046).abs() < EPS);
    assert!((totals.network - 0.006).abs() < EPS);
    assert_eq!(totals.calls, 2);

    let entries = coordinator.entries();
    assert_eq!(entries[&id].calls, 2);
}
