mod cli;
mod collaborators;
mod config;
mod editor;
mod errors;
mod i18n;
mod models;
mod persistence;
mod render;
mod routes;
mod state;
mod surface;
mod validation;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;

fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;
    let cli = Cli::parse();

    // Initialize structured logging on stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting CV Builder v{}", env!("CARGO_PKG_VERSION"));

    // Single logical thread: events are handled one at a time and the persist
    // timer shares the same runtime.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(cli::run(cli, config))
}
