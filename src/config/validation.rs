//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check value ranges (intervals, counts, thresholds all >= 1)
//! - Check that mandatory command files exist and are non-empty
//! - Check that the source interface, if set, exists on the system
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Runs before a config is accepted, at startup and on every reload

use std::collections::HashSet;
use std::net::IpAddr;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::MonitorConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("host list is empty; at least one address is required")]
    NoHosts,

    #[error("host {0} is listed more than once")]
    DuplicateHost(IpAddr),

    #[error("{name} must be at least 1")]
    ZeroValue { name: &'static str },

    #[error("{name} is not set; this is a mandatory parameter")]
    MissingPath { name: &'static str },

    #[error("{name} {path} does not exist")]
    FileMissing { name: &'static str, path: String },

    #[error("{name} {path} is empty; at least one command is required")]
    FileEmpty { name: &'static str, path: String },

    #[error("source interface {0} does not exist")]
    UnknownInterface(String),

    #[error("admin bind address {0} is not a valid socket address")]
    BadBindAddress(String),
}

/// Validate a loaded configuration, collecting every problem found.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.hosts.is_empty() {
        errors.push(ValidationError::NoHosts);
    }
    let mut seen = HashSet::new();
    for host in &config.hosts {
        if !seen.insert(host) {
            errors.push(ValidationError::DuplicateHost(*host));
        }
    }

    for (name, value) in [
        ("check_interval_secs", config.check_interval_secs),
        ("ping_timeout_secs", config.ping_timeout_secs),
        ("ping_count", u64::from(config.ping_count)),
        ("hold_down", u64::from(config.hold_down)),
        ("hold_up", u64::from(config.hold_up)),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroValue { name });
        }
    }

    check_command_file("conf_fail", &config.conf_fail, &mut errors);
    check_command_file("conf_recover", &config.conf_recover, &mut errors);

    if let Some(source) = &config.source {
        if !interface_exists(source) {
            errors.push(ValidationError::UnknownInterface(source.clone()));
        }
    }

    if config.admin.enabled && config.admin.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BadBindAddress(
            config.admin.bind_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_command_file(name: &'static str, path: &Path, errors: &mut Vec<ValidationError>) {
    if path.as_os_str().is_empty() {
        errors.push(ValidationError::MissingPath { name });
        return;
    }
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() == 0 => errors.push(ValidationError::FileEmpty {
            name,
            path: path.display().to_string(),
        }),
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::FileMissing {
            name,
            path: path.display().to_string(),
        }),
    }
}

/// Kernel interfaces show up under /sys/class/net.
fn interface_exists(name: &str) -> bool {
    Path::new("/sys/class/net").join(name).exists()
}
