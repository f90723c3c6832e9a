//! Shared fakes and fixtures for integration testing.

use async_trait::async_trait;
use ping_check::commands::{ApplyError, CommandApplier};
use ping_check::config::MonitorConfig;
use ping_check::health::probe::{ProbeError, ProbeOptions, ProbeOutcome, Prober};
use std::net::IpAddr;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A prober whose answer can be flipped from the test while the monitor
/// is running. Clones share the switch.
#[derive(Clone, Default)]
pub struct FlippableProber {
    up: Arc<AtomicBool>,
}

impl FlippableProber {
    pub fn new(up: bool) -> Self {
        Self {
            up: Arc::new(AtomicBool::new(up)),
        }
    }

    pub fn set_up(&self, up: bool) {
        self.up.store(up, Ordering::SeqCst);
    }
}

#[async_trait]
impl Prober for FlippableProber {
    async fn probe(&self, _host: IpAddr, _opts: &ProbeOptions) -> Result<ProbeOutcome, ProbeError> {
        Ok(ProbeOutcome {
            reachable: self.up.load(Ordering::SeqCst),
            rtt: None,
        })
    }
}

/// An applier that records every applied command. Clones share the record.
#[derive(Clone, Default)]
pub struct RecordingApplier {
    applied: Arc<Mutex<Vec<String>>>,
}

impl RecordingApplier {
    pub fn applied(&self) -> Vec<String> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandApplier for RecordingApplier {
    async fn apply(&self, command: &str) -> Result<(), ApplyError> {
        self.applied.lock().unwrap().push(command.to_string());
        Ok(())
    }
}

/// A minimal valid config with real command files on disk.
#[allow(dead_code)]
pub fn test_config(dir: &Path, interval_secs: u64) -> MonitorConfig {
    let fail = dir.join("failed.conf");
    let recover = dir.join("recover.conf");
    std::fs::write(&fail, "fail-command\n").unwrap();
    std::fs::write(&recover, "recover-command\n").unwrap();

    let mut config = MonitorConfig::default();
    config.hosts = vec!["10.0.0.1".parse().unwrap()];
    config.check_interval_secs = interval_secs;
    config.conf_fail = fail;
    config.conf_recover = recover;
    config
}
