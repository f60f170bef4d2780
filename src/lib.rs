//! cpbench - benchmark-harness adapter for an XML document store
//!
//! Exposes the harness's record interface (insert, read, update, delete,
//! scan over a string key and a flat field map) on top of a document store
//! reached through a wire client.
//!
//! # Quick Start
//!
//! ```ignore
//! use cpbench::{field_map, AdapterConfig, ClusterpointAdapter, Coordinator, Db, LoopbackStore};
//! use std::sync::Arc;
//!
//! let coordinator = Arc::new(Coordinator::new());
//! let mut db = ClusterpointAdapter::new(AdapterConfig::default(), LoopbackStore::new(), coordinator);
//! db.init()?;
//! db.insert("usertable", "user1", &field_map([("field0", "value")]));
//! db.cleanup()?;
//! ```
//!
//! # Architecture
//!
//! - `cpbench-core`: record model, document tree, errors, the [`Db`] trait
//! - `cpbench-wire`: requests, responses, connections, the loopback store
//! - `cpbench-engine`: codec, adapter, timing, coordinator, configuration

pub use cpbench_core::*;
pub use cpbench_engine::*;
pub use cpbench_wire::{
    parse_document, render, ConnectParams, Connector, LoopbackConnection, LoopbackStore,
    ModifyMode, PathFilter, Query, Request, Response, StoreConnection, StoreError, WireError,
};
