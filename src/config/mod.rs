//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → shared via Arc with the monitor loop
//!
//! On reload (file change or SIGHUP):
//!     watcher.rs / signal handler loads new config
//!     → validation.rs validates
//!     → snapshot sent over the update channel
//!     → monitor swaps it in between cycles, never mid-cycle
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a full reload
//! - All fields have defaults except hosts and the command files
//! - A failed reload never disturbs the running configuration

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{AdminConfig, FailurePolicy, MonitorConfig, ObservabilityConfig};
pub use watcher::ConfigWatcher;
