//! ICMP reachability monitor with hysteresis-gated config changes.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌────────────────────────────────────────────────┐
//!                 │                  PING-CHECK                     │
//!                 │                                                 │
//!   config file   │  ┌─────────┐   tick   ┌─────────┐   verdict    │
//!   ──────────────┼─▶│ config  │────────▶│ monitor  │──────┐       │
//!   (+ reload)    │  └─────────┘          └────┬─────┘      ▼       │
//!                 │                            │       ┌─────────┐ │
//!                 │                      probe │       │ state   │ │
//!                 │                            ▼       │ machine │ │
//!   ICMP echo     │                      ┌─────────┐   └────┬────┘ │
//!   ◀─────────────┼──────────────────────│  probe  │        │      │
//!                 │                      └─────────┘        ▼      │
//!                 │                                    ┌─────────┐ │
//!   applied       │                                    │commands │ │
//!   commands  ◀───┼────────────────────────────────────┴─────────┘ │
//!                 │                                                 │
//!                 │  ┌──────────────────────────────────────────┐  │
//!                 │  │          Cross-Cutting Concerns           │  │
//!                 │  │  ┌────────┐ ┌────────┐ ┌──────────────┐  │  │
//!                 │  │  │ admin  │ │ status │ │  lifecycle    │  │  │
//!                 │  │  │ (HTTP) │ │ board  │ │ signals/stop  │  │  │
//!                 │  │  └────────┘ └────────┘ └──────────────┘  │  │
//!                 │  └──────────────────────────────────────────┘  │
//!                 └────────────────────────────────────────────────┘
//! ```
//!
//! The monitor probes every configured host each cycle, reduces the
//! results to a single verdict, and feeds a two-state hysteresis machine.
//! A confirmed transition applies the matching command file exactly once.

pub mod admin;
pub mod commands;
pub mod config;
pub mod health;
pub mod lifecycle;

pub use config::MonitorConfig;
pub use health::Monitor;
pub use lifecycle::Shutdown;
