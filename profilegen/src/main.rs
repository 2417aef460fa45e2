//! dbt profile generator.
//!
//! Resolves an orchestrator connection, maps it onto a dbt profile target and
//! writes either the `profiles.yml` document or the secret environment
//! variables that document refers to.
//!
//! # Security Guarantees
//! - Passwords never reach the rendered profile
//! - Connection URIs are redacted before logging
//! - Logs go to stderr; stdout carries only command output

use clap::Parser;
use profilegen::{Cli, emit, execute};
use profilegen_core::init_logging;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    let Some(command) = &cli.command else {
        println!("profilegen v{}", env!("CARGO_PKG_VERSION"));
        println!("dbt profile generator for orchestrator connections");
        println!("Use --help for available commands");
        return Ok(());
    };

    let output = execute(command).await.map_err(|e| {
        error!("{:#}", e);
        e
    })?;

    emit(&output).await
}
