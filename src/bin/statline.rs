//! Statline - persistent status-polling client
//!
//! Connects to the two statlined servers (time and system data), keeps
//! the connections open, and prints every report and status change as
//! it arrives. Ctrl+C disconnects both sessions and exits.
//!
//! # Usage
//!
//! ```bash
//! # Connect using defaults (127.0.0.1:8080 and 127.0.0.1:8081)
//! statline
//!
//! # Override one or both servers
//! statline --time-server 10.0.0.5:8080 --system-server 10.0.0.5:8081
//!
//! # Use an explicit config file
//! statline --config /etc/statline.toml
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use statline_client::{ChannelSink, ClientConfig, SessionEvent, SessionRegistry};
use statline_core::Endpoint;

/// Statline - persistent status-polling client
#[derive(Parser, Debug)]
#[command(name = "statline", version, about)]
struct Args {
    /// Path to a TOML config file (defaults to the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Time server address, host:port (overrides config)
    #[arg(long)]
    time_server: Option<String>,

    /// System-data server address, host:port (overrides config)
    #[arg(long)]
    system_server: Option<String>,
}

/// Resolves the two endpoints from config plus CLI overrides.
fn resolve_endpoints(args: &Args) -> Result<(Endpoint, Endpoint)> {
    let config = match &args.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ClientConfig::load_or_default().context("Failed to load config")?,
    };

    let time = match &args.time_server {
        Some(s) => s
            .parse()
            .with_context(|| format!("Invalid --time-server '{s}'"))?,
        None => config.time_endpoint().context("Invalid time server in config")?,
    };

    let system = match &args.system_server {
        Some(s) => s
            .parse()
            .with_context(|| format!("Invalid --system-server '{s}'"))?,
        None => config
            .system_endpoint()
            .context("Invalid system server in config")?,
    };

    Ok((time, system))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("statline=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let (time_endpoint, system_endpoint) = resolve_endpoints(&args)?;

    info!(time = %time_endpoint, system = %system_endpoint, "Starting sessions");

    let (sink, mut events) = ChannelSink::new();
    let mut registry = SessionRegistry::new(time_endpoint, system_endpoint, Arc::new(sink));
    registry.connect_all();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, disconnecting");
                break;
            }

            event = events.recv() => match event {
                Some(SessionEvent::Report { name, report }) => {
                    println!("[{name}] {report}");
                }
                Some(SessionEvent::StatusChanged { name, status }) => {
                    println!("[{name}] {status}");
                }
                None => {
                    warn!("Event channel closed");
                    break;
                }
            },
        }
    }

    registry.disconnect_all();
    Ok(())
}
