//! Adapter engine for cpbench
//!
//! This crate turns harness calls into store requests:
//! - codec: field map <-> XML document translation
//! - adapter: per-thread lifecycle and request dispatch
//! - timing: per-call and per-instance latency accounting
//! - coordinator: live-instance tracking and final timing aggregation
//! - config: connection settings from the property bag or `cpbench.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod codec;
pub mod config;
pub mod coordinator;
pub mod timing;

pub use adapter::ClusterpointAdapter;
pub use codec::{decode_document, decode_documents, encode_document, selection_list};
pub use config::{AdapterConfig, CONFIG_FILE_NAME};
pub use coordinator::Coordinator;
pub use timing::{CallTiming, TimingEntry, TimingTotals};
