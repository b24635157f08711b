#![allow(dead_code)]

mod cli;
mod application;
mod domain;
mod data;
mod ml;
mod infra;

use anyhow::Result;
use cli::Cli;
use clap::Parser;

/// Timestamped INFO-level logging, overridable with RUST_LOG.
fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rbert_memkit=info".parse().unwrap()),
        )
        .init();
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();
    cli.run()
}
