//! Cycle aggregation.
//!
//! # Responsibilities
//! - Probe every configured host once per cycle, concurrently
//! - Reduce the per-host outcomes to a single cycle verdict
//! - Report the complete list of down hosts for logging and status
//!
//! # Design Decisions
//! - No early exit: the down-host list must be complete, so aggregation
//!   waits for every probe to finish or time out
//! - A probe that cannot run counts as unreachable for that host and
//!   never aborts the cycle

use std::net::IpAddr;
use futures::future::join_all;

use crate::config::FailurePolicy;
use crate::health::probe::{ProbeOptions, Prober};

/// The reduced result of one polling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleVerdict {
    /// The group counts as reachable this cycle.
    Up,
    /// The group counts as failed this cycle.
    Down,
}

/// Verdict plus the hosts that did not answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    pub verdict: CycleVerdict,
    pub down: Vec<IpAddr>,
}

/// Probe all hosts and reduce to a cycle verdict under the given policy.
///
/// An empty host set is `Up` by convention: there is nothing to fail.
pub async fn aggregate<P>(
    hosts: &[IpAddr],
    prober: &P,
    opts: &ProbeOptions,
    policy: FailurePolicy,
) -> CycleOutcome
where
    P: Prober + ?Sized,
{
    let probes = hosts.iter().map(|&host| async move {
        match prober.probe(host, opts).await {
            Ok(outcome) => {
                tracing::trace!(host = %host, reachable = outcome.reachable, rtt = ?outcome.rtt, "Probe finished");
                (host, outcome.reachable)
            }
            Err(e) => {
                tracing::warn!(host = %host, error = %e, "Probe could not run; counting host as unreachable");
                (host, false)
            }
        }
    });

    let results = join_all(probes).await;
    let down: Vec<IpAddr> = results
        .iter()
        .filter(|(_, reachable)| !reachable)
        .map(|(host, _)| *host)
        .collect();

    let verdict = match policy {
        FailurePolicy::AnyDown => {
            if down.is_empty() {
                CycleVerdict::Up
            } else {
                CycleVerdict::Down
            }
        }
        FailurePolicy::AllDown => {
            if !hosts.is_empty() && down.len() == hosts.len() {
                CycleVerdict::Down
            } else {
                CycleVerdict::Up
            }
        }
    };

    CycleOutcome { verdict, down }
}
