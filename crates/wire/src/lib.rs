//! Wire boundary for the document store
//!
//! This crate is everything the adapter knows about the store:
//! - Request / Response: typed request and response objects
//! - StoreConnection / Connector: the RPC boundary
//! - xml: document parsing into `Element` trees and rendering back
//! - LoopbackStore: an in-process store behind the same boundary

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod connection;
pub mod error;
pub mod loopback;
pub mod request;
pub mod response;
pub mod xml;

pub use connection::{ConnectParams, Connector, StoreConnection};
pub use error::{Result, WireError};
pub use loopback::{LoopbackConnection, LoopbackStore};
pub use request::{ModifyMode, PathFilter, Query, Request};
pub use response::{Response, StoreError};
pub use xml::{parse_document, render};
