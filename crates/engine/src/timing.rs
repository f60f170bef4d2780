//! Call-latency accounting
//!
//! Each adapter instance owns one [`TimingEntry`] and adds a [`CallTiming`]
//! to it after every store call. At cleanup the entry is handed to the
//! [`Coordinator`](crate::Coordinator), which sums all entries into
//! [`TimingTotals`] once the last instance is gone.
//!
//! All values are seconds.

use serde::{Deserialize, Serialize};

/// Timings of a single store call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CallTiming {
    /// Server-side time reported in the response
    pub total: f64,
    /// Client-side wall time of the request
    pub request: f64,
    /// Time spent on the network
    pub network: f64,
}

/// Cumulative timings of one adapter instance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingEntry {
    /// Cumulative store time
    pub total: f64,
    /// Cumulative request time
    pub request: f64,
    /// Cumulative network time
    pub network: f64,
    /// Number of store calls recorded
    pub calls: u64,
}

impl TimingEntry {
    /// Create a zeroed entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one call's timings.
    pub fn record(&mut self, call: CallTiming) {
        self.total += call.total;
        self.request += call.request;
        self.network += call.network;
        self.calls += 1;
    }

    /// Format as human-readable string
    pub fn summary(&self) -> String {
        format!(
            "time: {:.6}s, request time: {:.6}s, network time: {:.6}s ({} calls)",
            self.total, self.request, self.network, self.calls
        )
    }
}

/// Sums over every instance's [`TimingEntry`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingTotals {
    /// Total store time
    pub total: f64,
    /// Total request time
    pub request: f64,
    /// Total network time
    pub network: f64,
    /// Total store calls
    pub calls: u64,
    /// Number of entries summed
    pub instances: usize,
}

impl TimingTotals {
    /// Sum a set of entries.
    pub fn aggregate<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a TimingEntry>,
    {
        entries
            .into_iter()
            .fold(TimingTotals::default(), |mut acc, e| {
                acc.total += e.total;
                acc.request += e.request;
                acc.network += e.network;
                acc.calls += e.calls;
                acc.instances += 1;
                acc
            })
    }

    /// Format as human-readable string
    pub fn summary(&self) -> String {
        format!(
            "total time: {:.6}s, total request time: {:.6}s, total network time: {:.6}s ({} calls over {} instances)",
            self.total, self.request, self.network, self.calls, self.instances
        )
    }
}
