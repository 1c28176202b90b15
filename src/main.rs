/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::Context;
use clap::Parser;
use store::init_store;
use store::logging::init_logging;
use store::types::Cli;
use tracing::{info, warn};

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let _guard = if cli.report_errors {
        match &cli.sentry_dsn {
            Some(dsn) => Some(sentry::init(dsn.as_str())),
            None => {
                warn!("Error reporting enabled but no sentry dsn configured");
                None
            }
        }
    } else {
        None
    };

    info!("Starting Dockyard build store");

    let store = init_store(&cli).await?;
    store.ping().await.context("Database is not reachable")?;

    info!(
        deadline = ?store.deadline(),
        "Build store schema is up to date and accepting connections"
    );

    Ok(())
}
