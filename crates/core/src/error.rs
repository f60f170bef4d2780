//! Error types for adapter operations
//!
//! Every failure an operation can hit is represented by [`Error`]. The
//! harness contract only sees a binary [`Status`](crate::Status), but the
//! structured error is kept internally so it can be logged and asserted on.
//! We use `thiserror` for the `Display` and `Error` implementations.

use serde::{Deserialize, Serialize};

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Adapter errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Transport | `Transport` | Connection or submit failed |
/// | Store | `Store` | Response carried an error indicator |
/// | Not Found | `NotFound` | Found-count was zero |
/// | Malformed | `MalformedResponse` | Response could not be decoded |
/// | Lifecycle | `NotInitialized`, `AlreadyInitialized`, `AlreadyClosed`, `Connect` | Call made in the wrong state |
/// | Config | `Config` | Bad configuration |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Transport ====================
    /// Submitting the request or reading the reply failed
    #[error("transport failure: {reason}")]
    Transport { reason: String },

    // ==================== Store ====================
    /// Response carried an error indicator
    #[error("store error {code}: {message}")]
    Store { code: i32, message: String },

    // ==================== Not Found ====================
    /// Lookup or search matched no documents
    #[error("not found: {key}")]
    NotFound { key: String },

    // ==================== Malformed ====================
    /// Response document could not be decoded
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    // ==================== Lifecycle ====================
    /// Operation invoked before `init`
    #[error("adapter not initialized")]
    NotInitialized,

    /// `init` invoked twice
    #[error("adapter already initialized")]
    AlreadyInitialized,

    /// Operation invoked after `cleanup`
    #[error("adapter already closed")]
    AlreadyClosed,

    /// Store connection could not be established
    #[error("could not connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    // ==================== Config ====================
    /// Invalid configuration
    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Connection or submit failure
    Transport,
    /// Store reported an error
    Store,
    /// Nothing matched
    NotFound,
    /// Undecodable response
    MalformedResponse,
    /// Wrong lifecycle state or failed connect
    Lifecycle,
    /// Bad configuration
    Config,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Store { .. } => ErrorKind::Store,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Error::NotInitialized
            | Error::AlreadyInitialized
            | Error::AlreadyClosed
            | Error::Connect { .. } => ErrorKind::Lifecycle,
            Error::Config { .. } => ErrorKind::Config,
        }
    }

    /// Shorthand for [`Error::Transport`].
    pub fn transport(reason: impl Into<String>) -> Self {
        Error::Transport {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Error::MalformedResponse`].
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Error::Config`].
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }
}
