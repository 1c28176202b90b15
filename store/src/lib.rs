/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod builds;
pub mod consts;
pub mod database;
pub mod error;
pub mod events;
pub mod facade;
pub mod input;
pub mod logging;
pub mod types;

pub use error::{ErrorKind, StoreError, StoreResult};
pub use facade::BuildStore;

use database::connect_db;
use std::time::Duration;
use types::Cli;

/// Connects to the configured database, applies pending migrations and
/// returns a store bounded by the configured operation deadline.
pub async fn init_store(cli: &Cli) -> anyhow::Result<BuildStore> {
    let db = connect_db(cli).await?;

    Ok(BuildStore::new(db).with_deadline(Duration::from_secs(cli.operation_timeout)))
}
