//! Outbound request objects
//!
//! One request is built per harness call, sent once, and dropped after the
//! response has been processed.

use quick_xml::escape::escape;
use std::fmt;

/// How a modify request applies its documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifyMode {
    /// Store the document, replacing any document with the same id
    Insert,
    /// Replace an existing document wholesale
    Replace,
    /// Overwrite only the fields present in the document
    PartialReplace,
}

impl ModifyMode {
    /// Command name on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            ModifyMode::Insert => "insert",
            ModifyMode::Replace => "replace",
            ModifyMode::PartialReplace => "partial-replace",
        }
    }
}

impl fmt::Display for ModifyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a lookup/search selection list.
///
/// `path` is either `document` (the whole document) or `document/<field>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    /// Path into the document
    pub path: String,
    /// `true` renders as `yes`, `false` as `no`
    pub include: bool,
}

impl PathFilter {
    /// Include the given path.
    pub fn include(path: impl Into<String>) -> Self {
        PathFilter {
            path: path.into(),
            include: true,
        }
    }

    /// Wire value of the directive
    pub fn directive(&self) -> &'static str {
        if self.include {
            "yes"
        } else {
            "no"
        }
    }
}

/// Search query understood by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Documents whose id is lexicographically `>=` the given key
    IdAtLeast(String),
}

impl Query {
    /// Render in the store's query syntax, e.g. `<id>&gt;=user5</id>`.
    pub fn render(&self) -> String {
        match self {
            Query::IdAtLeast(start) => format!("<id>&gt;={}</id>", escape(start.as_str())),
        }
    }
}

/// A request to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Write whole XML documents
    Modify {
        /// How the documents are applied
        mode: ModifyMode,
        /// Encoded documents
        documents: Vec<String>,
    },
    /// Delete documents by id
    Delete {
        /// Document ids
        ids: Vec<String>,
    },
    /// Fetch documents by id
    Lookup {
        /// Document ids
        ids: Vec<String>,
        /// Which parts of each document to return
        list: Vec<PathFilter>,
    },
    /// Fetch documents matching a query
    Search {
        /// Match condition
        query: Query,
        /// Number of matches to skip
        offset: usize,
        /// Maximum number of documents returned
        docs: usize,
        /// Which parts of each document to return
        list: Vec<PathFilter>,
    },
}

impl Request {
    /// Command name, used for logging.
    pub fn command(&self) -> &'static str {
        match self {
            Request::Modify { mode, .. } => mode.as_str(),
            Request::Delete { .. } => "delete",
            Request::Lookup { .. } => "lookup",
            Request::Search { .. } => "search",
        }
    }
}
