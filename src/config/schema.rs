//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML config
//! file. The upper-case aliases keep config files written for the classic
//! option names (CHECKINTERVAL, IPv4, CONF_FAIL, ...) loading unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration for the monitor daemon.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Seconds between polling cycles.
    #[serde(alias = "CHECKINTERVAL")]
    pub check_interval_secs: u64,

    /// Number of ICMP echo requests to send per host per cycle.
    #[serde(alias = "PINGCOUNT")]
    pub ping_count: u32,

    /// Per-request reply timeout in seconds.
    #[serde(alias = "PINGTIMEOUT")]
    pub ping_timeout_secs: u64,

    /// Consecutive failed cycles required to declare the group failed.
    #[serde(alias = "HOLDDOWN")]
    pub hold_down: u32,

    /// Consecutive clean cycles required to declare the group recovered.
    #[serde(alias = "HOLDUP")]
    pub hold_up: u32,

    /// Addresses to probe. Accepts a TOML array or a single
    /// comma-separated string. Mandatory.
    #[serde(alias = "IPv4", deserialize_with = "de_host_list")]
    pub hosts: Vec<IpAddr>,

    /// Optional source interface to bind probes to.
    #[serde(alias = "SOURCE")]
    pub source: Option<String>,

    /// Command file applied when the group fails. Mandatory.
    #[serde(alias = "CONF_FAIL")]
    pub conf_fail: PathBuf,

    /// Command file applied when the group recovers. Mandatory.
    #[serde(alias = "CONF_RECOVER")]
    pub conf_recover: PathBuf,

    /// What counts as a failed cycle for a multi-host group.
    pub failure_policy: FailurePolicy,

    /// Status endpoint settings.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 5,
            ping_count: 2,
            ping_timeout_secs: 2,
            hold_down: 1,
            hold_up: 1,
            hosts: Vec::new(),
            source: None,
            conf_fail: PathBuf::new(),
            conf_recover: PathBuf::new(),
            failure_policy: FailurePolicy::default(),
            admin: AdminConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Aggregation policy for a multi-host group.
///
/// `AnyDown` treats a cycle as failed as soon as one host stops answering.
/// `AllDown` waits until every host in the group is unreachable, which
/// tolerates a single rate-limiting or dying neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    #[default]
    AnyDown,
    AllDown,
}

/// Status endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the read-only status endpoint.
    pub enabled: bool,

    /// Status endpoint bind address.
    pub bind_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: "127.0.0.1:8091".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Accept either `hosts = ["10.1.1.1", "10.1.2.1"]` or the classic
/// `IPv4 = "10.1.1.1,10.1.2.1"` form.
fn de_host_list<'de, D>(deserializer: D) -> Result<Vec<IpAddr>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum HostList {
        Entries(Vec<String>),
        Joined(String),
    }

    let raw = match HostList::deserialize(deserializer)? {
        HostList::Entries(entries) => entries,
        HostList::Joined(joined) => joined.split(',').map(str::to_string).collect(),
    };

    raw.iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry.parse().map_err(|_| {
                serde::de::Error::custom(format!("invalid host address `{}`", entry))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.check_interval_secs, 5);
        assert_eq!(config.ping_count, 2);
        assert_eq!(config.ping_timeout_secs, 2);
        assert_eq!(config.hold_down, 1);
        assert_eq!(config.hold_up, 1);
        assert_eq!(config.failure_policy, FailurePolicy::AnyDown);
        assert!(config.admin.enabled);
    }

    #[test]
    fn test_parse_host_array() {
        let config: MonitorConfig = toml::from_str(
            r#"
            hosts = ["10.1.1.1", "10.1.2.1"]
            conf_fail = "/tmp/failed.conf"
            conf_recover = "/tmp/recover.conf"
            "#,
        )
        .unwrap();
        assert_eq!(config.hosts.len(), 2);
        assert_eq!(config.hosts[0], "10.1.1.1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_parse_classic_option_names() {
        let config: MonitorConfig = toml::from_str(
            r#"
            CHECKINTERVAL = 10
            PINGCOUNT = 3
            HOLDDOWN = 4
            HOLDUP = 2
            IPv4 = "10.1.1.1, 10.1.2.1,2001:db8::1"
            SOURCE = "eth1"
            CONF_FAIL = "/mnt/flash/failed.conf"
            CONF_RECOVER = "/mnt/flash/recover.conf"
            "#,
        )
        .unwrap();
        assert_eq!(config.check_interval_secs, 10);
        assert_eq!(config.ping_count, 3);
        assert_eq!(config.hold_down, 4);
        assert_eq!(config.hold_up, 2);
        assert_eq!(config.hosts.len(), 3);
        assert_eq!(config.hosts[2], "2001:db8::1".parse::<IpAddr>().unwrap());
        assert_eq!(config.source.as_deref(), Some("eth1"));
    }

    #[test]
    fn test_invalid_host_rejected() {
        let result: Result<MonitorConfig, _> = toml::from_str(r#"hosts = ["not-an-ip"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_failure_policy_parse() {
        let config: MonitorConfig = toml::from_str(r#"failure_policy = "all-down""#).unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::AllDown);
    }
}
