//! ping-check daemon entry point.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ping_check::commands::ShellApplier;
use ping_check::config::{load_config, ConfigWatcher};
use ping_check::health::{Monitor, PingProber, StatusBoard, StatusSnapshot};
use ping_check::lifecycle::{handle_signals, Shutdown};
use ping_check::{admin, MonitorConfig};

#[derive(Parser)]
#[command(name = "ping-check")]
#[command(about = "ICMP reachability monitor with hysteresis-gated config changes", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "/etc/ping-check.toml")]
    config: PathBuf,

    /// Validate the configuration and exit.
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Startup errors are fatal: the monitor never runs on a bad config.
    let config = load_config(&cli.config)?;

    if cli.check_config {
        println!("configuration OK: {}", cli.config.display());
        return Ok(());
    }

    init_tracing(&config);

    tracing::info!(
        config = %cli.config.display(),
        hosts = config.hosts.len(),
        interval_secs = config.check_interval_secs,
        hold_down = config.hold_down,
        hold_up = config.hold_up,
        policy = ?config.failure_policy,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let board = StatusBoard::new(StatusSnapshot::startup(&config));
    let (update_tx, update_rx) = mpsc::unbounded_channel();

    // Keep the watcher handle alive for the life of the daemon.
    let _watcher = ConfigWatcher::new(&cli.config, update_tx.clone()).run()?;

    tokio::spawn(handle_signals(
        cli.config.clone(),
        update_tx,
        shutdown.clone(),
    ));

    if config.admin.enabled {
        let bind_address = config.admin.bind_address.clone();
        let admin_board = board.clone();
        let admin_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            if let Err(e) = admin::run(&bind_address, admin_board, admin_shutdown).await {
                tracing::error!(error = %e, "Admin endpoint failed");
            }
        });
    }

    let monitor = Monitor::new(Arc::new(config), PingProber, ShellApplier, board);
    monitor.run(update_rx, shutdown.subscribe()).await;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn init_tracing(config: &MonitorConfig) {
    let default_filter = format!("ping_check={}", config.observability.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
