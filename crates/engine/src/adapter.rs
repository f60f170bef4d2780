//! Store adapter: lifecycle and request dispatch
//!
//! One [`ClusterpointAdapter`] serves one harness worker thread. It moves
//! through `Uninitialized -> Connected -> Closed`:
//!
//! - `init` opens the instance's single connection and registers with the
//!   [`Coordinator`]
//! - operations are only valid while connected
//! - `cleanup` closes the connection and hands the instance's timings to
//!   the coordinator; the last live instance gets the process totals
//!
//! Every operation builds one request, submits it, records the call's
//! timings, and maps the response to a structured [`Error`]. The [`Db`]
//! implementation narrows that to a [`Status`] and logs the failure.

use crate::codec::{decode_documents, encode_document, selection_list};
use crate::config::AdapterConfig;
use crate::coordinator::Coordinator;
use crate::timing::{CallTiming, TimingEntry, TimingTotals};
use cpbench_core::{Db, Error, FieldMap, FieldSet, InstanceId, Result, Status};
use cpbench_wire::{Connector, ModifyMode, Query, Request, Response, StoreConnection};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-instance connection state.
enum State<T> {
    Uninitialized,
    Connected(Live<T>),
    Closed,
}

struct Live<T> {
    id: InstanceId,
    conn: T,
    timing: TimingEntry,
}

/// Harness adapter over a document store connection.
pub struct ClusterpointAdapter<C: Connector> {
    config: AdapterConfig,
    connector: C,
    coordinator: Arc<Coordinator>,
    state: State<C::Connection>,
}

impl<C: Connector> ClusterpointAdapter<C> {
    /// Create an uninitialized adapter.
    pub fn new(config: AdapterConfig, connector: C, coordinator: Arc<Coordinator>) -> Self {
        Self {
            config,
            connector,
            coordinator,
            state: State::Uninitialized,
        }
    }

    /// Create an adapter from the harness property bag, registered with
    /// the process-wide coordinator.
    pub fn from_properties(props: &HashMap<String, String>, connector: C) -> Result<Self> {
        let config = AdapterConfig::from_properties(props)?;
        Ok(Self::new(config, connector, Coordinator::global()))
    }

    /// Configuration in use
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Returns true between a successful `init` and `cleanup`.
    pub fn is_connected(&self) -> bool {
        matches!(self.state, State::Connected(_))
    }

    /// Id issued at `init`, while connected.
    pub fn instance_id(&self) -> Option<InstanceId> {
        match &self.state {
            State::Connected(live) => Some(live.id),
            _ => None,
        }
    }

    /// Timings accumulated so far, while connected.
    pub fn timing(&self) -> Option<TimingEntry> {
        match &self.state {
            State::Connected(live) => Some(live.timing),
            _ => None,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Open the store connection and register with the coordinator.
    ///
    /// # Errors
    ///
    /// - [`Error::Connect`] if the connection cannot be opened; the adapter
    ///   stays uninitialized and unregistered
    /// - [`Error::AlreadyInitialized`] / [`Error::AlreadyClosed`] when called
    ///   in the wrong state
    pub fn init(&mut self) -> Result<()> {
        match self.state {
            State::Uninitialized => {}
            State::Connected(_) => return Err(Error::AlreadyInitialized),
            State::Closed => return Err(Error::AlreadyClosed),
        }

        let params = self.config.connect_params();
        info!(target: "cpbench::adapter", url = %params.url, database = %params.database, "Opening store connection");
        let conn = match self.connector.connect(&params) {
            Ok(conn) => conn,
            Err(e) => {
                warn!(target: "cpbench::adapter", url = %params.url, error = %e, "Could not open store connection");
                return Err(Error::Connect {
                    url: params.url,
                    reason: e.to_string(),
                });
            }
        };

        let id = self.coordinator.register();
        info!(target: "cpbench::adapter", instance = %id, url = %params.url, "Store connection created");
        self.state = State::Connected(Live {
            id,
            conn,
            timing: TimingEntry::new(),
        });
        Ok(())
    }

    /// Close the connection and deposit this instance's timings.
    ///
    /// Returns the process totals when this was the last live instance.
    /// A failure to close is returned after the timings were deposited.
    pub fn cleanup(&mut self) -> Result<Option<TimingTotals>> {
        let mut live = match std::mem::replace(&mut self.state, State::Closed) {
            State::Connected(live) => live,
            State::Uninitialized => {
                self.state = State::Uninitialized;
                return Err(Error::NotInitialized);
            }
            State::Closed => return Err(Error::AlreadyClosed),
        };

        let closed = live.conn.close();
        let totals = self.coordinator.deregister(live.id, live.timing);

        if let Err(e) = closed {
            warn!(target: "cpbench::adapter", instance = %live.id, error = %e, "Could not close store connection");
            return Err(e.into());
        }
        info!(target: "cpbench::adapter", instance = %live.id, "Store connection closed");
        Ok(totals)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Insert a record, replacing any record with the same key.
    pub fn try_insert(&mut self, key: &str, values: &FieldMap) -> Result<()> {
        let request = Request::Modify {
            mode: ModifyMode::Insert,
            documents: vec![encode_document(key, values)],
        };
        self.submit(&request).map(|_| ())
    }

    /// Overwrite the fields in `values`; other stored fields are untouched.
    pub fn try_update(&mut self, key: &str, values: &FieldMap) -> Result<()> {
        let request = Request::Modify {
            mode: ModifyMode::PartialReplace,
            documents: vec![encode_document(key, values)],
        };
        self.submit(&request).map(|_| ())
    }

    /// Delete a record by key.
    pub fn try_delete(&mut self, key: &str) -> Result<()> {
        let request = Request::Delete {
            ids: vec![key.to_string()],
        };
        self.submit(&request).map(|_| ())
    }

    /// Read one record, restricted to `fields` when given.
    pub fn try_read(&mut self, key: &str, fields: Option<&FieldSet>) -> Result<FieldMap> {
        let request = Request::Lookup {
            ids: vec![key.to_string()],
            list: selection_list(fields),
        };
        let response = self.submit(&request)?;
        if response.found == 0 {
            return Err(Error::NotFound {
                key: key.to_string(),
            });
        }

        let mut record = FieldMap::new();
        for decoded in decode_documents(&response.documents)? {
            record.extend(decoded);
        }
        Ok(record)
    }

    /// Read up to `record_count` records with keys `>= start_key`, in key order.
    pub fn try_scan(
        &mut self,
        start_key: &str,
        record_count: usize,
        fields: Option<&FieldSet>,
    ) -> Result<Vec<FieldMap>> {
        let request = Request::Search {
            query: Query::IdAtLeast(start_key.to_string()),
            offset: 0,
            docs: record_count,
            list: selection_list(fields),
        };
        let response = self.submit(&request)?;
        if response.found == 0 {
            return Err(Error::NotFound {
                key: start_key.to_string(),
            });
        }
        decode_documents(&response.documents)
    }

    /// Send one request, record its timings, and surface store errors.
    fn submit(&mut self, request: &Request) -> Result<Response> {
        let live = match &mut self.state {
            State::Connected(live) => live,
            State::Uninitialized => return Err(Error::NotInitialized),
            State::Closed => return Err(Error::AlreadyClosed),
        };

        let sent = live.conn.send(request);
        live.timing.record(CallTiming {
            total: sent.as_ref().map(|r| r.seconds).unwrap_or(0.0),
            request: live.conn.last_request_duration(),
            network: live.conn.last_network_duration(),
        });

        let response = sent?;
        if let Some(err) = &response.error {
            return Err(Error::Store {
                code: err.code,
                message: err.message.clone(),
            });
        }
        Ok(response)
    }

    fn report<T>(&self, op: &'static str, key: &str, result: &Result<T>) -> Status {
        match result {
            Ok(_) => {
                debug!(target: "cpbench::adapter", op, key, "Operation succeeded");
                Status::Ok
            }
            Err(Error::NotFound { .. }) => {
                debug!(target: "cpbench::adapter", op, key, "Operation matched nothing");
                Status::Error
            }
            Err(e) => {
                warn!(target: "cpbench::adapter", op, key, error = %e, "Operation failed");
                Status::Error
            }
        }
    }
}

impl<C: Connector> Db for ClusterpointAdapter<C> {
    fn init(&mut self) -> Result<()> {
        ClusterpointAdapter::init(self)
    }

    fn cleanup(&mut self) -> Result<()> {
        ClusterpointAdapter::cleanup(self).map(|_| ())
    }

    fn insert(&mut self, _table: &str, key: &str, values: &FieldMap) -> Status {
        let result = self.try_insert(key, values);
        self.report("insert", key, &result)
    }

    fn read(
        &mut self,
        _table: &str,
        key: &str,
        fields: Option<&FieldSet>,
        result: &mut FieldMap,
    ) -> Status {
        let outcome = self.try_read(key, fields);
        let status = self.report("read", key, &outcome);
        if let Ok(record) = outcome {
            result.extend(record);
        }
        status
    }

    fn update(&mut self, _table: &str, key: &str, values: &FieldMap) -> Status {
        let result = self.try_update(key, values);
        self.report("update", key, &result)
    }

    fn delete(&mut self, _table: &str, key: &str) -> Status {
        let result = self.try_delete(key);
        self.report("delete", key, &result)
    }

    fn scan(
        &mut self,
        _table: &str,
        start_key: &str,
        record_count: usize,
        fields: Option<&FieldSet>,
        result: &mut Vec<FieldMap>,
    ) -> Status {
        let outcome = self.try_scan(start_key, record_count, fields);
        let status = self.report("scan", start_key, &outcome);
        if let Ok(records) = outcome {
            result.extend(records);
        }
        status
    }
}

impl<C: Connector> Drop for ClusterpointAdapter<C> {
    fn drop(&mut self) {
        if self.is_connected() {
            warn!(target: "cpbench::adapter", "Adapter dropped while connected; running cleanup");
            let _ = self.cleanup();
        }
    }
}
