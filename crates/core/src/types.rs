//! Record model shared by the harness, the adapter, and the wire layer
//!
//! A record is a table name (ignored by the store), a string key, and a
//! flat map of field name to opaque byte value.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Field name to field value. Values are opaque bytes that are logically text.
pub type FieldMap = HashMap<String, Vec<u8>>;

/// Optional restriction of which fields a read or scan returns.
pub type FieldSet = HashSet<String>;

/// Result code handed back to the benchmark harness.
///
/// The harness only distinguishes success from failure, so every error
/// kind collapses to [`Status::Error`] at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Operation succeeded
    Ok,
    /// Operation failed for any reason (transport, store error, not found)
    Error,
}

impl Status {
    /// Numeric code expected by the harness: 0 on success, 1 otherwise.
    pub fn code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Error => 1,
        }
    }

    /// Returns true for [`Status::Ok`].
    pub fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }
}

impl<T, E> From<std::result::Result<T, E>> for Status {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(_) => Status::Error,
        }
    }
}

/// Identifier issued to each registered adapter instance.
///
/// Rendered as `Thread_<n>` where `n` counts registrations from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Wrap a raw sequence number.
    pub fn new(seq: u64) -> Self {
        InstanceId(seq)
    }

    /// The raw sequence number.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Thread_{}", self.0)
    }
}

/// Build a [`FieldMap`] from string pairs.
pub fn field_map<K, V, I>(pairs: I) -> FieldMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.as_ref().as_bytes().to_vec()))
        .collect()
}
