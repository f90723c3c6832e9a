//! OS signal handling.
//!
//! # Responsibilities
//! - SIGTERM / SIGINT: trigger graceful shutdown
//! - SIGHUP: reload the configuration file
//!
//! A reload travels down the same update channel the file watcher feeds,
//! so the monitor applies it the same way: between cycles.

use std::path::PathBuf;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

use crate::config::{load_config, MonitorConfig};
use crate::lifecycle::shutdown::Shutdown;

/// Listen for signals until shutdown is triggered.
pub async fn handle_signals(
    config_path: PathBuf,
    updates: mpsc::UnboundedSender<MonitorConfig>,
    shutdown: Shutdown,
) {
    let mut sigterm = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("Failed to install SIGINT handler");
    let mut sighup = signal(SignalKind::hangup()).expect("Failed to install SIGHUP handler");

    loop {
        tokio::select! {
            _ = sigterm.recv() => {
                tracing::info!("SIGTERM received, shutting down");
                shutdown.trigger();
                break;
            }
            _ = sigint.recv() => {
                tracing::info!("SIGINT received, shutting down");
                shutdown.trigger();
                break;
            }
            _ = sighup.recv() => {
                tracing::info!("SIGHUP received, reloading configuration");
                match load_config(&config_path) {
                    Ok(new_config) => {
                        let _ = updates.send(new_config);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Reload failed; keeping current configuration");
                    }
                }
            }
        }
    }
}
