//! ICMP reachability probing.
//!
//! # Responsibilities
//! - Send a burst of ICMP echo requests to one host
//! - Classify the host as reachable or unreachable
//!
//! A host that does not answer is a normal unreachable result, never an
//! error. `ProbeError` is reserved for probes that could not even be
//! attempted.

use std::net::IpAddr;
use std::process::Stdio;
use std::time::Duration;
use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tokio::time;

use crate::config::MonitorConfig;

/// Error type for probes that could not run at all.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The ping process could not be spawned.
    #[error("failed to spawn ping for {host}: {source}")]
    Spawn {
        host: IpAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of probing one host in one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeOutcome {
    pub reachable: bool,
    /// Average round trip, when the ping summary reported one.
    pub rtt: Option<Duration>,
}

impl ProbeOutcome {
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            rtt: None,
        }
    }
}

/// Per-probe parameters, snapshotted from the config at cycle start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Echo requests per probe.
    pub count: u32,
    /// Reply timeout per request, in seconds.
    pub timeout_secs: u64,
    /// Optional source interface to bind to.
    pub source: Option<String>,
}

impl From<&MonitorConfig> for ProbeOptions {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            count: config.ping_count,
            timeout_secs: config.ping_timeout_secs,
            source: config.source.clone(),
        }
    }
}

/// A reachability probe for a single host.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, host: IpAddr, opts: &ProbeOptions) -> Result<ProbeOutcome, ProbeError>;
}

/// Prober backed by the system `ping` binary.
///
/// Shelling out keeps the daemon unprivileged: `ping` carries the raw
/// socket capability so we do not have to.
pub struct PingProber;

#[async_trait]
impl Prober for PingProber {
    async fn probe(&self, host: IpAddr, opts: &ProbeOptions) -> Result<ProbeOutcome, ProbeError> {
        let mut cmd = Command::new("ping");
        if host.is_ipv6() {
            cmd.arg("-6");
        }
        cmd.arg("-c").arg(opts.count.to_string());
        cmd.arg("-W").arg(opts.timeout_secs.to_string());
        if let Some(source) = &opts.source {
            cmd.arg("-I").arg(source);
        }
        cmd.arg(host.to_string())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        // Hard upper bound: one timeout per request plus a second of grace.
        // A probe must never outlive its budget into the next cycle.
        let budget =
            Duration::from_secs(opts.timeout_secs.saturating_mul(u64::from(opts.count)) + 1);

        let output = match time::timeout(budget, cmd.output()).await {
            Ok(result) => result.map_err(|source| ProbeError::Spawn { host, source })?,
            Err(_) => {
                tracing::debug!(host = %host, budget_secs = budget.as_secs(), "Probe exceeded its budget");
                return Ok(ProbeOutcome::unreachable());
            }
        };

        if !output.status.success() {
            return Ok(ProbeOutcome::unreachable());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(ProbeOutcome {
            reachable: true,
            rtt: parse_avg_rtt(&stdout),
        })
    }
}

/// Pull the average round trip out of the trailing summary line, e.g.
/// `rtt min/avg/max/mdev = 0.045/0.049/0.053/0.004 ms`.
fn parse_avg_rtt(stdout: &str) -> Option<Duration> {
    let line = stdout.lines().rev().find(|l| l.contains("min/avg/max"))?;
    let values = line.split('=').nth(1)?;
    let avg = values.trim().split('/').nth(1)?;
    let ms: f64 = avg.trim().parse().ok()?;
    Some(Duration::from_secs_f64(ms / 1000.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_avg_rtt() {
        let stdout = "\
PING 10.1.1.1 (10.1.1.1) 56(84) bytes of data.
64 bytes from 10.1.1.1: icmp_seq=1 ttl=64 time=0.049 ms

--- 10.1.1.1 ping statistics ---
2 packets transmitted, 2 received, 0% packet loss, time 1001ms
rtt min/avg/max/mdev = 0.045/0.049/0.053/0.004 ms
";
        let rtt = parse_avg_rtt(stdout).unwrap();
        assert!((rtt.as_secs_f64() - 0.000049).abs() < 1e-9);
    }

    #[test]
    fn test_parse_avg_rtt_missing_summary() {
        assert_eq!(parse_avg_rtt("no summary here"), None);
    }

    #[test]
    fn test_options_from_config() {
        let mut config = MonitorConfig::default();
        config.ping_count = 4;
        config.ping_timeout_secs = 3;
        config.source = Some("eth1".to_string());

        let opts = ProbeOptions::from(&config);
        assert_eq!(opts.count, 4);
        assert_eq!(opts.timeout_secs, 3);
        assert_eq!(opts.source.as_deref(), Some("eth1"));
    }
}
