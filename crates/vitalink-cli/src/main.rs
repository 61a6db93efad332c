//! vitalink - command-line client for the Vitalink health-records service.
//!
//! A thin front end over `vitalink-core`: every command maps onto one or a
//! few API calls made through the authenticated gateway.

mod app;
mod cli;
mod commands;
mod format;
mod output;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use cli::Cli;

/// Initialize the tracing subscriber for logging
fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    info!("vitalink starting");

    let app = App::new(cli.json, cli.file_session)?;
    if let Err(e) = commands::run(&app, cli.command).await {
        output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}
