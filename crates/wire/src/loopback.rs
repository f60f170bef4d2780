//! In-process loopback store
//!
//! Implements the store side of the wire boundary over an ordered in-memory
//! map so the adapter can be exercised without a server. Used by the
//! integration tests and the benchmarks.
//!
//! # Semantics
//!
//! | Request | Behavior |
//! |---------|----------|
//! | `insert` | Upsert every document by its `id` element |
//! | `replace` | Replace an existing document; error if absent |
//! | `partial-replace` | Overwrite the supplied fields of an existing document; error if absent |
//! | `delete` | Remove documents by id; error if any is absent |
//! | `lookup` | Return matching documents filtered by the path list |
//! | `search` | `id >= start` in key order, then `offset`/`docs` paging |
//!
//! Every returned document is wrapped in a `result` envelope element.

use crate::connection::{ConnectParams, Connector, StoreConnection};
use crate::error::{Result, WireError};
use crate::request::{ModifyMode, PathFilter, Query, Request};
use crate::response::Response;
use crate::xml::parse_document;
use cpbench_core::{Element, DOCUMENT_TAG, ID_TAG};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Envelope tag wrapping each returned document.
pub const RESULT_ENVELOPE_TAG: &str = "result";

/// Error code: a document could not be parsed or has no id.
pub const ERR_INVALID_DOCUMENT: i32 = 2800;

/// Error code: the addressed document does not exist.
pub const ERR_DOCUMENT_NOT_FOUND: i32 = 2824;

const PATH_PREFIX: &str = "document/";

#[derive(Default)]
struct Shared {
    docs: RwLock<BTreeMap<String, Element>>,
    offline: AtomicBool,
    connections_opened: AtomicUsize,
}

/// Shared in-memory store. Clones refer to the same data.
#[derive(Clone, Default)]
pub struct LoopbackStore {
    shared: Arc<Shared>,
}

impl LoopbackStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// When offline, connects and sends fail with transport errors.
    pub fn set_offline(&self, offline: bool) {
        self.shared.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.shared.docs.read().len()
    }

    /// Returns true when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.shared.docs.read().is_empty()
    }

    /// Stored document for `id`, if any.
    pub fn get(&self, id: &str) -> Option<Element> {
        self.shared.docs.read().get(id).cloned()
    }

    /// Number of successful `connect` calls so far.
    pub fn connections_opened(&self) -> usize {
        self.shared.connections_opened.load(Ordering::SeqCst)
    }
}

impl Connector for LoopbackStore {
    type Connection = LoopbackConnection;

    fn connect(&self, params: &ConnectParams) -> Result<LoopbackConnection> {
        if self.shared.offline.load(Ordering::SeqCst) {
            return Err(WireError::Transport(format!(
                "connection refused: {}",
                params.url
            )));
        }
        self.shared.connections_opened.fetch_add(1, Ordering::SeqCst);
        info!(target: "cpbench::loopback", url = %params.url, database = %params.database, "Connection opened");
        Ok(LoopbackConnection {
            shared: Arc::clone(&self.shared),
            open: true,
            last_request: 0.0,
            last_network: 0.0,
        })
    }
}

/// Connection to a [`LoopbackStore`].
pub struct LoopbackConnection {
    shared: Arc<Shared>,
    open: bool,
    last_request: f64,
    last_network: f64,
}

impl StoreConnection for LoopbackConnection {
    fn send(&mut self, request: &Request) -> Result<Response> {
        if !self.open {
            return Err(WireError::Closed);
        }
        let started = Instant::now();
        if self.shared.offline.load(Ordering::SeqCst) {
            self.last_request = started.elapsed().as_secs_f64();
            self.last_network = 0.0;
            return Err(WireError::Transport("store offline".to_string()));
        }

        let mut response = self.shared.execute(request);
        response.seconds = started.elapsed().as_secs_f64();
        // No network hop in-process.
        self.last_network = 0.0;
        self.last_request = started.elapsed().as_secs_f64();
        debug!(target: "cpbench::loopback", command = request.command(), ok = response.is_ok(), found = response.found, "Request served");
        Ok(response)
    }

    fn last_request_duration(&self) -> f64 {
        self.last_request
    }

    fn last_network_duration(&self) -> f64 {
        self.last_network
    }

    fn close(&mut self) -> Result<()> {
        if !self.open {
            return Err(WireError::Closed);
        }
        self.open = false;
        Ok(())
    }
}

// =============================================================================
// Request execution
// =============================================================================

impl Shared {
    fn execute(&self, request: &Request) -> Response {
        match request {
            Request::Modify { mode, documents } => self.modify(*mode, documents),
            Request::Delete { ids } => self.delete(ids),
            Request::Lookup { ids, list } => self.lookup(ids, list),
            Request::Search {
                query,
                offset,
                docs,
                list,
            } => self.search(query, *offset, *docs, list),
        }
    }

    fn modify(&self, mode: ModifyMode, documents: &[String]) -> Response {
        // Parse everything first so a bad document leaves the store untouched.
        let mut parsed = Vec::with_capacity(documents.len());
        for raw in documents {
            let doc = match parse_document(raw) {
                Ok(doc) => doc,
                Err(e) => return Response::failure(ERR_INVALID_DOCUMENT, e.to_string()),
            };
            if doc.name() != DOCUMENT_TAG {
                return Response::failure(
                    ERR_INVALID_DOCUMENT,
                    format!("unexpected root element <{}>", doc.name()),
                );
            }
            let id = match doc.child(ID_TAG) {
                Some(id) => id.text().to_string(),
                None => return Response::failure(ERR_INVALID_DOCUMENT, "document has no id"),
            };
            parsed.push((id, doc));
        }

        let mut docs = self.docs.write();
        if mode != ModifyMode::Insert {
            if let Some((id, _)) = parsed.iter().find(|(id, _)| !docs.contains_key(id)) {
                return Response::failure(
                    ERR_DOCUMENT_NOT_FOUND,
                    format!("document not found: {}", id),
                );
            }
        }

        for (id, doc) in parsed {
            match mode {
                ModifyMode::Insert | ModifyMode::Replace => {
                    docs.insert(id, doc);
                }
                ModifyMode::PartialReplace => {
                    if let Some(stored) = docs.get_mut(&id) {
                        merge_fields(stored, doc);
                    }
                }
            }
        }
        Response::success()
    }

    fn delete(&self, ids: &[String]) -> Response {
        let mut docs = self.docs.write();
        if let Some(missing) = ids.iter().find(|id| !docs.contains_key(id.as_str())) {
            return Response::failure(
                ERR_DOCUMENT_NOT_FOUND,
                format!("document not found: {}", missing),
            );
        }
        for id in ids {
            docs.remove(id);
        }
        Response::success()
    }

    fn lookup(&self, ids: &[String], list: &[PathFilter]) -> Response {
        let docs = self.docs.read();
        let hits: Vec<Element> = ids
            .iter()
            .filter_map(|id| docs.get(id))
            .map(|doc| envelope(select(doc, list)))
            .collect();
        Response::with_documents(hits.len(), hits)
    }

    fn search(&self, query: &Query, offset: usize, limit: usize, list: &[PathFilter]) -> Response {
        let docs = self.docs.read();
        let matched: Vec<&Element> = match query {
            Query::IdAtLeast(start) => docs.range(start.clone()..).map(|(_, doc)| doc).collect(),
        };
        let hits: Vec<Element> = matched
            .iter()
            .skip(offset)
            .take(limit)
            .map(|doc| envelope(select(doc, list)))
            .collect();
        Response::with_documents(matched.len(), hits)
    }
}

/// Overwrite or append each non-id field of `update` into `stored`.
fn merge_fields(stored: &mut Element, update: Element) {
    for field in update.children() {
        if field.name() == ID_TAG {
            continue;
        }
        match stored.child_mut(field.name()) {
            Some(existing) => *existing = field.clone(),
            None => stored.push_child(field.clone()),
        }
    }
}

/// Apply a selection list to a stored document. The id is always kept.
fn select(doc: &Element, list: &[PathFilter]) -> Element {
    let whole = list.is_empty()
        || list
            .iter()
            .any(|f| f.include && f.path == DOCUMENT_TAG);
    let included: Vec<&str> = list
        .iter()
        .filter(|f| f.include)
        .filter_map(|f| f.path.strip_prefix(PATH_PREFIX))
        .collect();
    let excluded: Vec<&str> = list
        .iter()
        .filter(|f| !f.include)
        .filter_map(|f| f.path.strip_prefix(PATH_PREFIX))
        .collect();

    let mut out = doc.clone();
    out.retain_children(|c| {
        if c.name() == ID_TAG {
            return true;
        }
        (whole || included.contains(&c.name())) && !excluded.contains(&c.name())
    });
    out
}

fn envelope(doc: Element) -> Element {
    Element::new(RESULT_ENVELOPE_TAG).with_child(doc)
}
