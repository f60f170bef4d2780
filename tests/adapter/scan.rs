//! Range scans

use crate::common::*;
use cpbench::{field_map, Db, FieldMap, Status};

fn populate(db: &mut impl Db) {
    for i in 1..=9 {
        let key = format!("k{}", i);
        assert_eq!(
            db.insert(TABLE, &key, &field_map([("key", key.as_str()), ("payload", "x")])),
            Status::Ok
        );
    }
}

fn keys(records: &[FieldMap]) -> Vec<String> {
    records.iter().map(|r| text(r, "key")).collect()
}

#[test]
fn scan_returns_smallest_keys_at_or_after_start() {
    let (mut db, _, _) = connected();
    populate(&mut db);

    let mut out = Vec::new();
    assert_eq!(db.scan(TABLE, "k5", 3, None, &mut out), Status::Ok);
    assert_eq!(keys(&out), vec!["k5", "k6", "k7"]);
}

#[test]
fn scan_start_between_keys() {
    let (mut db, _, _) = connected();
    populate(&mut db);

    let mut out = Vec::new();
    assert_eq!(db.scan(TABLE, "k45", 2, None, &mut out), Status::Ok);
    assert_eq!(keys(&out), vec!["k5", "k6"]);
}

#[test]
fn scan_is_bounded_by_what_exists() {
    let (mut db, _, _) = connected();
    populate(&mut db);

    let mut out = Vec::new();
    assert_eq!(db.scan(TABLE, "k8", 10, None, &mut out), Status::Ok);
    assert_eq!(keys(&out), vec!["k8", "k9"]);
}

#[test]
fn scan_appends_to_existing_results() {
    let (mut db, _, _) = connected();
    populate(&mut db);

    let mut out = vec![field_map([("key", "earlier")])];
    assert_eq!(db.scan(TABLE, "k1", 2, None, &mut out), Status::Ok);
    assert_eq!(keys(&out), vec!["earlier", "k1", "k2"]);
}

#[test]
fn scan_past_the_end_fails_without_touching_output() {
    let (mut db, _, _) = connected();
    populate(&mut db);

    let mut out = vec![field_map([("key", "earlier")])];
    assert_eq!(db.scan(TABLE, "z", 3, None, &mut out), Status::Error);
    assert_eq!(out.len(), 1);
}

#[test]
fn scan_on_empty_store_fails() {
    let (mut db, _, _) = connected();
    let mut out = Vec::new();
    assert_eq!(db.scan(TABLE, "", 5, None, &mut out), Status::Error);
    assert!(out.is_empty());
}

#[test]
fn scan_applies_field_selection() {
    let (mut db, _, _) = connected();
    for i in 1..=3 {
        db.insert(TABLE, &format!("user{}", i), &record(&format!("r{}", i)));
    }

    let wanted = fields(&["field0", "field9"]);
    let mut out = Vec::new();
    assert_eq!(db.scan(TABLE, "user1", 3, Some(&wanted), &mut out), Status::Ok);
    assert_eq!(out.len(), 3);
    for (i, rec) in out.iter().enumerate() {
        assert_eq!(rec.len(), 2);
        assert_eq!(text(rec, "field0"), format!("r{}-value-0", i + 1));
        assert_eq!(text(rec, "field9"), format!("r{}-value-9", i + 1));
    }
}

#[test]
fn scan_records_match_reads() {
    let (mut db, _, _) = connected();
    db.insert(TABLE, "user1", &record("a"));
    db.insert(TABLE, "user2", &record("b"));

    let scanned = db.try_scan("user1", 2, None).unwrap();
    assert_eq!(scanned[0], db.try_read("user1", None).unwrap());
    assert_eq!(scanned[1], db.try_read("user2", None).unwrap());
}
