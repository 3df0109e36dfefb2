//! TinyKV server entry point.
//!
//! Parses flags, sets up logging, binds the listener and serves until Ctrl+C.

use anyhow::Context;
use std::sync::atomic::Ordering;
use tinykv::config::{self, Action};
use tinykv::Server;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!(
        r#"
TinyKV - A Minimal In-Memory Key-Value Server

USAGE:
    tinykv [OPTIONS]

OPTIONS:
    -h, --host <HOST>    Host to bind to (default: {host})
    -p, --port <PORT>    Port to listen on (default: {port})
    -v, --version        Print version information
        --help           Print this help message

CONNECTING:
    $ redis-cli -p {port}
    127.0.0.1:{port}> SET name "jane" PX 10000
    OK
    127.0.0.1:{port}> GET name
    "jane"
"#,
        host = tinykv::DEFAULT_HOST,
        port = tinykv::DEFAULT_PORT,
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match config::parse_args(std::env::args().skip(1)) {
        Ok(Action::Serve(config)) => config,
        Ok(Action::PrintHelp) => {
            print_help();
            return Ok(());
        }
        Ok(Action::PrintVersion) => {
            println!("TinyKV version {}", tinykv::VERSION);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_help();
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let server = Server::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_address()))?;
    info!(version = tinykv::VERSION, "TinyKV listening on {}", config.bind_address());

    let store = server.store();
    let stats = server.stats();

    let shutdown = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received, stopping server..."),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = server.run() => {}
        _ = shutdown => {}
    }

    let store_stats = store.stats();
    info!(
        keys = store_stats.keys,
        gets = store_stats.gets,
        sets = store_stats.sets,
        expired = store_stats.expired,
        connections = stats.connections_accepted.load(Ordering::Relaxed),
        commands = stats.commands_processed.load(Ordering::Relaxed),
        "Server shutdown complete"
    );
    Ok(())
}
