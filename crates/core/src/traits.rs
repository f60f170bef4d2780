//! Harness-facing record interface
//!
//! The benchmark harness creates one [`Db`] per worker thread, calls
//! [`Db::init`] once, drives operations sequentially from that thread, and
//! calls [`Db::cleanup`] on shutdown. Operations report a coarse [`Status`].

use crate::error::Result;
use crate::types::{FieldMap, FieldSet, Status};

/// Record store as seen by the benchmark harness.
///
/// The `table` argument exists for harness compatibility; stores with a
/// single implicit table ignore it.
pub trait Db {
    /// Open whatever this instance needs. Called once per instance.
    fn init(&mut self) -> Result<()>;

    /// Release this instance's resources. Called once per instance.
    fn cleanup(&mut self) -> Result<()>;

    /// Insert a record with every field in `values`.
    fn insert(&mut self, table: &str, key: &str, values: &FieldMap) -> Status;

    /// Read a record into `result`, restricted to `fields` when given.
    ///
    /// `result` is untouched unless the read succeeds.
    fn read(
        &mut self,
        table: &str,
        key: &str,
        fields: Option<&FieldSet>,
        result: &mut FieldMap,
    ) -> Status;

    /// Overwrite the fields present in `values`, leaving others untouched.
    fn update(&mut self, table: &str, key: &str, values: &FieldMap) -> Status;

    /// Delete a record.
    fn delete(&mut self, table: &str, key: &str) -> Status;

    /// Read up to `record_count` records with keys `>= start_key`, in key
    /// order, appending each to `result`.
    fn scan(
        &mut self,
        table: &str,
        start_key: &str,
        record_count: usize,
        fields: Option<&FieldSet>,
        result: &mut Vec<FieldMap>,
    ) -> Status;
}
