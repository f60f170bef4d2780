//! Instance coordinator
//!
//! One coordinator is shared by every adapter instance of a benchmark run.
//! It issues instance ids, counts live instances, collects each instance's
//! final [`TimingEntry`], and produces the process totals when the last
//! live instance deregisters.
//!
//! Depositing an entry and decrementing the live count happen under one
//! lock, so the instance that reaches zero always sees every entry
//! deposited before it.

use crate::timing::{TimingEntry, TimingTotals};
use cpbench_core::InstanceId;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Process-wide coordinator for integrations that cannot pass one in.
static GLOBAL: Lazy<Arc<Coordinator>> = Lazy::new(|| Arc::new(Coordinator::new()));

#[derive(Debug, Default)]
struct State {
    live: usize,
    issued: u64,
    /// Entries are kept for the life of the coordinator.
    entries: BTreeMap<InstanceId, TimingEntry>,
}

/// Shared registry of adapter instances and their timings.
#[derive(Debug, Default)]
pub struct Coordinator {
    state: Mutex<State>,
}

impl Coordinator {
    /// Create a coordinator with no instances.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lazily created process-wide coordinator.
    pub fn global() -> Arc<Coordinator> {
        Arc::clone(&GLOBAL)
    }

    /// Register a new live instance and return its id.
    pub fn register(&self) -> InstanceId {
        let mut state = self.state.lock();
        state.issued += 1;
        state.live += 1;
        let id = InstanceId::new(state.issued);
        debug!(target: "cpbench::coordinator", instance = %id, live = state.live, "Instance registered");
        id
    }

    /// Deposit an instance's final timings and mark it gone.
    ///
    /// Returns the totals over every deposited entry when this call brought
    /// the live count to zero, `None` otherwise.
    pub fn deregister(&self, id: InstanceId, entry: TimingEntry) -> Option<TimingTotals> {
        let mut state = self.state.lock();
        if state.entries.insert(id, entry).is_some() {
            warn!(target: "cpbench::coordinator", instance = %id, "Instance deregistered twice; entry replaced");
        }
        state.live = state.live.saturating_sub(1);

        info!(
            target: "cpbench::coordinator",
            instance = %id,
            time = entry.total,
            request_time = entry.request,
            network_time = entry.network,
            calls = entry.calls,
            "Instance cleanup"
        );

        if state.live > 0 {
            return None;
        }
        let totals = TimingTotals::aggregate(state.entries.values());
        info!(
            target: "cpbench::coordinator",
            total_time = totals.total,
            total_request_time = totals.request,
            total_network_time = totals.network,
            calls = totals.calls,
            instances = totals.instances,
            "All instances closed"
        );
        Some(totals)
    }

    /// Number of registered instances that have not deregistered.
    pub fn live_instances(&self) -> usize {
        self.state.lock().live
    }

    /// Snapshot of every deposited entry.
    pub fn entries(&self) -> BTreeMap<InstanceId, TimingEntry> {
        self.state.lock().entries.clone()
    }

    /// Totals over the entries deposited so far.
    pub fn totals(&self) -> TimingTotals {
        TimingTotals::aggregate(self.state.lock().entries.values())
    }
}
