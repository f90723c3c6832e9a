//! Read-only status snapshots.
//!
//! The monitor publishes an immutable snapshot after every cycle; the
//! admin endpoint and anything else that wants to look reads the latest
//! one. Nobody outside the monitor loop ever sees live mutable state.

use arc_swap::ArcSwap;
use serde::Serialize;
use std::net::IpAddr;
use std::sync::Arc;

use crate::config::{FailurePolicy, MonitorConfig};
use crate::health::state::HealthState;

/// Point-in-time view of the monitor, serializable for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub state: HealthState,
    pub down_hosts: Vec<IpAddr>,
    pub hosts: Vec<IpAddr>,
    pub hold_down: u32,
    pub hold_up: u32,
    pub check_interval_secs: u64,
    pub ping_count: u32,
    pub failure_policy: FailurePolicy,
    /// Completed polling cycles since startup.
    pub cycles_completed: u64,
}

impl StatusSnapshot {
    /// The snapshot published before the first cycle has run.
    pub fn startup(config: &MonitorConfig) -> Self {
        Self {
            state: HealthState::Healthy,
            down_hosts: Vec::new(),
            hosts: config.hosts.clone(),
            hold_down: config.hold_down,
            hold_up: config.hold_up,
            check_interval_secs: config.check_interval_secs,
            ping_count: config.ping_count,
            failure_policy: config.failure_policy,
            cycles_completed: 0,
        }
    }
}

/// Lock-free holder of the latest snapshot.
pub struct StatusBoard {
    inner: ArcSwap<StatusSnapshot>,
}

impl StatusBoard {
    pub fn new(initial: StatusSnapshot) -> Arc<Self> {
        Arc::new(Self {
            inner: ArcSwap::from_pointee(initial),
        })
    }

    /// Replace the published snapshot.
    pub fn publish(&self, snapshot: StatusSnapshot) {
        self.inner.store(Arc::new(snapshot));
    }

    /// The latest published snapshot.
    pub fn current(&self) -> Arc<StatusSnapshot> {
        self.inner.load_full()
    }
}
