//! Inbound response objects

use cpbench_core::Element;

/// Error indicator carried by a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    /// Store error code
    pub code: i32,
    /// Human-readable message
    pub message: String,
}

/// Typed response to a [`Request`](crate::Request).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    /// Server-side processing time reported by the store, in seconds
    pub seconds: f64,
    /// Present when the store rejected the request
    pub error: Option<StoreError>,
    /// Number of documents matched (lookup/search)
    pub found: usize,
    /// Returned documents, each an envelope wrapping one `document`
    pub documents: Vec<Element>,
}

impl Response {
    /// Successful response without documents.
    pub fn success() -> Self {
        Response::default()
    }

    /// Failed response
    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Response {
            error: Some(StoreError {
                code,
                message: message.into(),
            }),
            ..Response::default()
        }
    }

    /// Successful response carrying documents.
    pub fn with_documents(found: usize, documents: Vec<Element>) -> Self {
        Response {
            found,
            documents,
            ..Response::default()
        }
    }

    /// Returns true when no error indicator is set.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
