//! Core types and traits for cpbench
//!
//! This crate defines the foundational types used throughout the system:
//! - FieldMap / FieldSet: the harness's flat record model
//! - Status: the binary result code handed back to the harness
//! - InstanceId: identifier of a registered adapter instance
//! - Element: typed document tree returned by the store
//! - Error: error taxonomy kept internally behind the binary status
//! - Db: the harness-facing record interface

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod traits;
pub mod types;

pub use document::{Element, Leaves, DOCUMENT_TAG, ID_TAG};
pub use error::{Error, ErrorKind, Result};
pub use traits::Db;
pub use types::{field_map, FieldMap, FieldSet, InstanceId, Status};
