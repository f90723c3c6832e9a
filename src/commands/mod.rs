//! Transition side effects: command files and their application.
//!
//! # Data Flow
//! ```text
//! transition event (monitor)
//!     → file.rs (read ordered command list)
//!     → applier.rs (apply each command via the CommandApplier seam)
//!     → outcome logged; health state never depends on it
//! ```
//!
//! # Design Decisions
//! - Commands are opaque strings; nothing here interprets them
//! - Application stops at the first rejected command; the applied prefix
//!   stands and is not rolled back
//! - No automatic retry: the next verdict flip is the only retry path

pub mod applier;
pub mod file;

pub use applier::{apply_command_file, ApplyError, CommandApplier, ShellApplier};
pub use file::read_command_file;
