use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "pingcheck-cli")]
#[command(about = "Query a running ping-check daemon", long_about = None)]
struct Cli {
    /// Base URL of the daemon's admin endpoint.
    #[arg(short, long, default_value = "http://127.0.0.1:8091")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full monitor status: state, down hosts, thresholds.
    Status,
    /// Just the health state.
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let path = match cli.command {
        Commands::Status => "/status",
        Commands::Health => "/health",
    };

    let res = client
        .get(format!("{}{}", cli.url, path))
        .send()
        .await?;

    print_response(res).await?;
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: daemon returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
