//! The monitor control loop.
//!
//! # Responsibilities
//! - Drive one polling cycle per check interval
//! - Feed each cycle's verdict into the hysteresis machine
//! - Run the one-shot command file on every confirmed transition
//! - Publish a status snapshot after every cycle
//! - Pick up config reloads between cycles, never mid-cycle
//!
//! # Design Decisions
//! - The ticker keeps a fixed schedule and skips missed ticks instead of
//!   bursting when a cycle overruns the interval
//! - A failed side effect is logged and never rolls the health state
//!   back; re-applying every cycle would be a retry storm
//! - Per-host edges are announced once per edge, not once per cycle

use std::collections::BTreeSet;
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, MissedTickBehavior};

use crate::commands::{apply_command_file, CommandApplier};
use crate::config::MonitorConfig;
use crate::health::aggregate::aggregate;
use crate::health::probe::{ProbeOptions, Prober};
use crate::health::state::{HealthMachine, Thresholds, Transition};
use crate::health::status::{StatusBoard, StatusSnapshot};

pub struct Monitor<P, A> {
    config: Arc<MonitorConfig>,
    prober: P,
    applier: A,
    machine: HealthMachine,
    board: Arc<StatusBoard>,
    /// Hosts that were down at the end of the previous cycle.
    down: BTreeSet<IpAddr>,
    cycles: u64,
}

impl<P, A> Monitor<P, A>
where
    P: Prober,
    A: CommandApplier,
{
    pub fn new(config: Arc<MonitorConfig>, prober: P, applier: A, board: Arc<StatusBoard>) -> Self {
        Self {
            config,
            prober,
            applier,
            machine: HealthMachine::new(),
            board,
            down: BTreeSet::new(),
            cycles: 0,
        }
    }

    /// Run until the shutdown signal fires.
    ///
    /// Shutdown is cooperative: an in-flight cycle finishes, no new cycle
    /// starts. Config updates are swapped in between cycles.
    pub async fn run(
        mut self,
        mut updates: mpsc::UnboundedReceiver<MonitorConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        tracing::info!(
            interval_secs = self.config.check_interval_secs,
            hosts = self.config.hosts.len(),
            policy = ?self.config.failure_policy,
            "Monitor starting"
        );

        let mut ticker = new_ticker(self.config.check_interval_secs);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                Some(new_config) = updates.recv() => {
                    if new_config.check_interval_secs != self.config.check_interval_secs {
                        // Resume on-period: a fresh interval() would tick at once.
                        let period = Duration::from_secs(new_config.check_interval_secs.max(1));
                        ticker = time::interval_at(time::Instant::now() + period, period);
                        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                    }
                    tracing::info!(
                        hosts = new_config.hosts.len(),
                        interval_secs = new_config.check_interval_secs,
                        "Configuration reloaded"
                    );
                    self.config = Arc::new(new_config);
                    self.publish();
                }
                _ = shutdown.recv() => {
                    tracing::info!("Monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// One polling cycle: probe, aggregate, evaluate, act, publish.
    pub async fn tick(&mut self) {
        // The snapshot taken here is the one the whole cycle runs on; a
        // reload arriving mid-cycle waits for the next tick.
        let config = Arc::clone(&self.config);
        let opts = ProbeOptions::from(config.as_ref());

        let outcome = aggregate(
            &config.hosts,
            &self.prober,
            &opts,
            config.failure_policy,
        )
        .await;

        self.log_host_edges(&outcome.down);

        match self
            .machine
            .observe(outcome.verdict, &Thresholds::from(config.as_ref()))
        {
            Some(Transition::Failed) => {
                tracing::warn!(
                    down_hosts = ?outcome.down,
                    "Reachability failed; applying failed-state configuration"
                );
                self.apply(&config.conf_fail).await;
            }
            Some(Transition::Recovered) => {
                tracing::info!("Reachability recovered; applying recovered-state configuration");
                self.apply(&config.conf_recover).await;
            }
            None => {}
        }

        self.cycles += 1;
        self.publish();
    }

    /// The machine's verdict stands whether or not the side effect lands;
    /// failures are logged and the next flip is the only retry path.
    async fn apply(&self, path: &Path) {
        match apply_command_file(&self.applier, path).await {
            Ok(count) => {
                tracing::info!(file = %path.display(), commands = count, "Applied configuration changes");
            }
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "Unable to apply configuration changes");
            }
        }
    }

    /// Announce each host once when it goes down and once when it returns.
    fn log_host_edges(&mut self, down_now: &[IpAddr]) {
        let down_now: BTreeSet<IpAddr> = down_now.iter().copied().collect();

        for host in down_now.difference(&self.down) {
            tracing::warn!(host = %host, "Host is down");
        }
        for host in self.down.difference(&down_now) {
            tracing::info!(host = %host, "Host is back up");
        }

        self.down = down_now;
    }

    fn publish(&self) {
        self.board.publish(StatusSnapshot {
            state: self.machine.state(),
            down_hosts: self.down.iter().copied().collect(),
            hosts: self.config.hosts.clone(),
            hold_down: self.config.hold_down,
            hold_up: self.config.hold_up,
            check_interval_secs: self.config.check_interval_secs,
            ping_count: self.config.ping_count,
            failure_policy: self.config.failure_policy,
            cycles_completed: self.cycles,
        });
    }
}

fn new_ticker(interval_secs: u64) -> time::Interval {
    let period = Duration::from_secs(interval_secs.max(1));
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}
