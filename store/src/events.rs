/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Per-build, per-channel append-only event logs.

use chrono::Utc;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::builds::exists_in;
use super::consts::EVENT_APPEND_CHUNK_SIZE;
use super::error::{StoreError, StoreResult};
use super::input::validate_channel_name;
use super::types::*;

#[derive(Debug, Clone)]
pub struct EventLogStore {
    db: Arc<DatabaseConnection>,
}

impl EventLogStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn list(&self, id: Uuid, channel: &str) -> StoreResult<Vec<BuildEvent>> {
        let channel = validate_channel_name(channel)?;

        if !exists_in(self.db.as_ref(), id).await? {
            return Err(StoreError::build_not_found(id));
        }

        let events = EBuildEvent::find()
            .filter(CBuildEvent::Build.eq(id))
            .filter(CBuildEvent::Channel.eq(channel))
            .order_by_asc(CBuildEvent::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(events.into_iter().map(BuildEvent::from).collect())
    }
}

/// Appends `events` to the end of `channel` in the order given, after
/// checking the build exists. Callers run this inside a transaction so the
/// whole batch lands or none of it does.
pub(crate) async fn append_in<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    events: &[BuildEvent],
    channel: OutputChannel,
) -> StoreResult<()> {
    if !exists_in(conn, id).await? {
        return Err(StoreError::build_not_found(id));
    }

    let now = Utc::now().naive_utc();
    for chunk in events.chunks(EVENT_APPEND_CHUNK_SIZE) {
        let rows = chunk
            .iter()
            .map(|event| event.to_active_model(id, channel, now));

        EBuildEvent::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
    }

    debug!(build_id = %id, %channel, count = events.len(), "Appended build events");
    Ok(())
}

/// Removes every channel of a build. Returns the number of events removed.
pub(crate) async fn delete_in<C: ConnectionTrait>(conn: &C, id: Uuid) -> StoreResult<u64> {
    let result = EBuildEvent::delete_many()
        .filter(CBuildEvent::Build.eq(id))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}
