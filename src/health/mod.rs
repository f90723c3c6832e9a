//! Reachability monitoring subsystem.
//!
//! # Data Flow
//! ```text
//! monitor.rs (one tick per interval)
//!     → probe.rs (ICMP echo per host, concurrently)
//!     → aggregate.rs (cycle verdict + down-host list)
//!     → state.rs (hysteresis machine, at most one transition per tick)
//!     → commands (one-shot side effect on transition)
//!     → status.rs (published snapshot)
//! ```

pub mod aggregate;
pub mod monitor;
pub mod probe;
pub mod state;
pub mod status;

pub use aggregate::{aggregate, CycleOutcome, CycleVerdict};
pub use monitor::Monitor;
pub use probe::{PingProber, ProbeError, ProbeOptions, ProbeOutcome, Prober};
pub use state::{HealthMachine, HealthState, Thresholds, Transition};
pub use status::{StatusBoard, StatusSnapshot};
