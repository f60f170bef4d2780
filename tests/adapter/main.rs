//! Adapter Integration Tests
//!
//! Drives `ClusterpointAdapter` through the harness-facing `Db` interface
//! against the in-process loopback store:
//! - crud: insert / read / update / delete semantics
//! - scan: range ordering, bounds, field selection
//! - timing: per-call accumulation and final totals
//! - lifecycle: state machine and configuration
//! - concurrency: many instances on many threads


mod concurrency;
mod scan;
mod timing;
