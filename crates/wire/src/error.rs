//! Wire-level errors

use thiserror::Error;

/// Result type alias for wire operations
pub type Result<T> = std::result::Result<T, WireError>;

/// Failures raised by a connection before a response is available.
///
/// Errors the store itself reports arrive inside a
/// [`Response`](crate::Response), not as a `WireError`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WireError {
    /// Sending or receiving failed
    #[error("transport failure: {0}")]
    Transport(String),

    /// The connection was already closed
    #[error("connection closed")]
    Closed,

    /// A document could not be parsed
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

impl From<quick_xml::Error> for WireError {
    fn from(e: quick_xml::Error) -> Self {
        WireError::MalformedDocument(e.to_string())
    }
}

impl From<WireError> for cpbench_core::Error {
    fn from(e: WireError) -> Self {
        match e {
            WireError::Transport(reason) => cpbench_core::Error::Transport { reason },
            WireError::Closed => cpbench_core::Error::Transport {
                reason: "connection closed".to_string(),
            },
            WireError::MalformedDocument(reason) => {
                cpbench_core::Error::MalformedResponse { reason }
            }
        }
    }
}
