//! Group health state machine.
//!
//! # States
//! - Healthy: the monitored group is considered reachable
//! - Failed: the monitored group is considered down
//!
//! # State Transitions
//! ```text
//! Healthy → Failed: consecutive down cycles >= hold_down
//! Failed → Healthy: consecutive up cycles >= hold_up
//! ```
//!
//! # Design Decisions
//! - Hysteresis prevents flapping; hold_down = hold_up = 1 degenerates to
//!   immediate transitions
//! - Only the counter for the opposite of the current state is evaluated,
//!   so a sustained condition can never emit twice
//! - The counter that triggered a transition resets, so the next count
//!   starts clean
//! - State lives for the process lifetime only; a restart starts Healthy
//!   with empty counters

use serde::Serialize;

use crate::config::MonitorConfig;
use crate::health::aggregate::CycleVerdict;

/// Durable health of the monitored group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Failed,
}

/// One-shot signal that the durable state changed this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The group just entered the failed state.
    Failed,
    /// The group just recovered.
    Recovered,
}

/// Consecutive-cycle thresholds, snapshotted from the config each cycle
/// so a reload takes effect on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub hold_down: u32,
    pub hold_up: u32,
}

impl From<&MonitorConfig> for Thresholds {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            hold_down: config.hold_down,
            hold_up: config.hold_up,
        }
    }
}

/// The hysteresis engine. Owned and mutated by the monitor loop only;
/// everyone else sees snapshots.
#[derive(Debug)]
pub struct HealthMachine {
    state: HealthState,
    consecutive_up: u32,
    consecutive_down: u32,
}

impl HealthMachine {
    /// Start optimistic: the first cycle's verdict begins accumulating
    /// immediately against a Healthy baseline.
    pub fn new() -> Self {
        Self {
            state: HealthState::Healthy,
            consecutive_up: 0,
            consecutive_down: 0,
        }
    }

    pub fn state(&self) -> HealthState {
        self.state
    }

    /// Feed one cycle verdict; emits at most one transition.
    pub fn observe(&mut self, verdict: CycleVerdict, thresholds: &Thresholds) -> Option<Transition> {
        match verdict {
            CycleVerdict::Up => {
                self.consecutive_up = self.consecutive_up.saturating_add(1);
                self.consecutive_down = 0;
            }
            CycleVerdict::Down => {
                self.consecutive_down = self.consecutive_down.saturating_add(1);
                self.consecutive_up = 0;
            }
        }

        match self.state {
            HealthState::Healthy if self.consecutive_down >= thresholds.hold_down => {
                self.state = HealthState::Failed;
                self.consecutive_down = 0;
                Some(Transition::Failed)
            }
            HealthState::Failed if self.consecutive_up >= thresholds.hold_up => {
                self.state = HealthState::Healthy;
                self.consecutive_up = 0;
                Some(Transition::Recovered)
            }
            _ => None,
        }
    }
}

impl Default for HealthMachine {
    fn default() -> Self {
        Self::new()
    }
}
