/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::log::LevelFilter;

use super::types::Cli;

pub fn database_url(cli: &Cli) -> Result<String> {
    if let Some(file) = &cli.database_url_file {
        let url = std::fs::read_to_string(file).context("Failed to read database url from file")?;
        Ok(url.trim().to_string())
    } else if let Some(url) = &cli.database_url {
        Ok(url.clone())
    } else {
        anyhow::bail!("No database url provided")
    }
}

pub fn connect_options(cli: &Cli, db_url: String) -> ConnectOptions {
    let mut opt = ConnectOptions::new(db_url);

    // Only enable SQL logging at debug level
    if cli.log_level == "debug" {
        opt.sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Debug);
    } else {
        opt.sqlx_logging(false);
    }

    opt.max_connections(cli.max_connections)
        .min_connections(cli.min_connections.min(cli.max_connections))
        .connect_timeout(Duration::from_secs(cli.connect_timeout))
        .acquire_timeout(Duration::from_secs(cli.connect_timeout));

    opt
}

pub async fn connect_db(cli: &Cli) -> Result<DatabaseConnection> {
    let db_url = database_url(cli)?;

    let db = Database::connect(connect_options(cli, db_url))
        .await
        .context("Failed to connect to database")?;
    migrate(&db)
        .await
        .context("Failed to run database migrations")?;

    Ok(db)
}

pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    let pending = Migrator::get_pending_migrations(db).await?.len();
    if pending > 0 {
        tracing::info!(pending, "Applying database migrations");
    }

    Migrator::up(db, None).await
}
