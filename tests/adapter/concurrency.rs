//! Many adapter instances driven from concurrent worker threads

use crate::common::*;
use cpbench::{field_map, Coordinator, Db, FieldMap, LoopbackStore, Status, TimingTotals};
use parking_lot::Mutex;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;
const OPS: usize = 50;

/// One worker: init, OPS insert+read pairs on its own keys, cleanup.
fn worker(
    store: LoopbackStore,
    coordinator: Arc<Coordinator>,
    barrier: Arc<Barrier>,
    worker_id: usize,
) -> Option<TimingTotals> {
    let mut db = adapter_for(&store, &coordinator);
    db.init().unwrap();
    barrier.wait();

    for i in 0..OPS {
        let key = format!("w{}-user{:04}", worker_id, i);
        let values = field_map([("owner", format!("w{}", worker_id)), ("seq", i.to_string())]);
        assert_eq!(db.insert(TABLE, &key, &values), Status::Ok);

        let mut out = FieldMap::new();
        assert_eq!(db.read(TABLE, &key, None, &mut out), Status::Ok);
        assert_eq!(out, values);
    }
    assert_eq!(db.timing().unwrap().calls, (OPS * 2) as u64);

    barrier.wait();
    db.cleanup().unwrap()
}

#[test]
fn concurrent_instances_keep_counter_and_entries_consistent() {
    let store = LoopbackStore::new();
    let coordinator = Arc::new(Coordinator::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|w| {
            let store = store.clone();
            let coordinator = Arc::clone(&coordinator);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || worker(store, coordinator, barrier, w))
        })
        .collect();

    let reports: Vec<TimingTotals> = handles
        .into_iter()
        .filter_map(|h| h.join().unwrap())
        .collect();

    assert_eq!(coordinator.live_instances(), 0);
    assert_eq!(reports.len(), 1, "exactly one instance reports totals");
    assert_eq!(reports[0].instances, THREADS);
    assert_eq!(reports[0].calls, (THREADS * OPS * 2) as u64);

    let entries = coordinator.entries();
    assert_eq!(entries.len(), THREADS);
    for entry in entries.values() {
        assert_eq!(entry.calls, (OPS * 2) as u64);
    }
    assert_eq!(store.len(), THREADS * OPS);
    assert_eq!(store.connections_opened(), THREADS);
}

#[test]
fn instance_ids_are_unique_under_contention() {
    let store = LoopbackStore::new();
    let coordinator = Arc::new(Coordinator::new());
    let barrier = Arc::new(Barrier::new(THREADS));
    let ids = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = store.clone();
            let coordinator = Arc::clone(&coordinator);
            let barrier = Arc::clone(&barrier);
            let ids = Arc::clone(&ids);
            thread::spawn(move || {
                barrier.wait();
                let mut db = adapter_for(&store, &coordinator);
                db.init().unwrap();
                ids.lock().push(db.instance_id().unwrap());
                db.cleanup().unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let mut ids = ids.lock().clone();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), THREADS);
    assert_eq!(coordinator.live_instances(), 0);
}

#[test]
fn concurrent_updates_to_shared_record_never_lose_fields() {
    let store = LoopbackStore::new();
    let coordinator = Arc::new(Coordinator::new());
    {
        let mut db = adapter_for(&store, &coordinator);
        db.init().unwrap();
        db.insert(TABLE, "shared", &field_map([("base", "0")]));
        db.cleanup().unwrap();
    }

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|w| {
            let store = store.clone();
            let coordinator = Arc::clone(&coordinator);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut db = adapter_for(&store, &coordinator);
                db.init().unwrap();
                barrier.wait();
                let field = format!("w{}", w);
                assert_eq!(
                    db.update(TABLE, "shared", &field_map([(field.as_str(), "done")])),
                    Status::Ok
                );
                db.cleanup().unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let mut db = adapter_for(&store, &coordinator);
    db.init().unwrap();
    let out = db.try_read("shared", None).unwrap();
    assert_eq!(out.len(), THREADS + 1);
    assert_eq!(text(&out, "base"), "0");
}
