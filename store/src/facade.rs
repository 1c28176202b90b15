/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! The single entry point collaborators use. Composes the build record store
//! and the event log store and bounds every operation by a deadline.

use sea_orm::{DatabaseConnection, TransactionTrait};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::builds::{self, BuildRecordStore};
use super::consts::DEFAULT_OPERATION_TIMEOUT;
use super::error::{StoreError, StoreResult};
use super::events::{self, EventLogStore};
use super::input::validate_channel_name;
use super::types::*;

#[derive(Debug, Clone)]
pub struct BuildStore {
    db: Arc<DatabaseConnection>,
    builds: BuildRecordStore,
    events: EventLogStore,
    deadline: Duration,
}

impl BuildStore {
    pub fn new(db: DatabaseConnection) -> Self {
        let db = Arc::new(db);

        BuildStore {
            builds: BuildRecordStore::new(Arc::clone(&db)),
            events: EventLogStore::new(Arc::clone(&db)),
            db,
            deadline: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Returns a handle sharing the same pool whose operations give up after
    /// `deadline`.
    ///
    /// Deletes and event appends stop counting once their commit is sent, so
    /// a `Timeout` from them means nothing was written. A `Timeout` from a
    /// single-field update leaves the outcome unknown; read the record back
    /// before retrying.
    pub fn with_deadline(&self, deadline: Duration) -> Self {
        BuildStore {
            deadline,
            ..self.clone()
        }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn connection(&self) -> &DatabaseConnection {
        self.db.as_ref()
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.bounded(async { self.db.ping().await.map_err(StoreError::from) })
            .await
    }

    #[instrument(skip(self, request), fields(github_repo = %request.build.github_repo))]
    pub async fn create_build(&self, request: &BuildRequest) -> StoreResult<Uuid> {
        let id = self.bounded(self.builds.create(request)).await?;
        info!(build_id = %id, "Created build");
        Ok(id)
    }

    pub async fn get_build_by_id(&self, id: Uuid) -> StoreResult<BuildRecord> {
        self.bounded(self.builds.get(id)).await
    }

    /// Removes the record and its events in every channel. Nothing is removed
    /// when the build does not exist.
    #[instrument(skip(self), fields(build_id = %id))]
    pub async fn delete_build(&self, id: Uuid) -> StoreResult<()> {
        let (txn, removed_events) = self
            .bounded(async {
                let txn = self.db.begin().await?;

                let removed_events = events::delete_in(&txn, id).await?;
                if let Err(err) = builds::delete_in(&txn, id).await {
                    txn.rollback().await?;
                    return Err(err);
                }

                Ok::<_, StoreError>((txn, removed_events))
            })
            .await?;

        txn.commit().await?;
        info!(removed_events, "Deleted build");
        Ok(())
    }

    #[instrument(skip(self), fields(build_id = %id))]
    pub async fn set_build_flags(&self, id: Uuid, flags: &BuildFlagsUpdate) -> StoreResult<()> {
        self.bounded(self.builds.set_flags(id, flags)).await
    }

    #[instrument(skip(self), fields(build_id = %id))]
    pub async fn set_build_completed_timestamp(&self, id: Uuid) -> StoreResult<()> {
        self.bounded(self.builds.set_completed_timestamp(id)).await
    }

    #[instrument(skip(self, status), fields(build_id = %id, %status))]
    pub async fn set_build_state(&self, id: Uuid, status: BuildStatus) -> StoreResult<()> {
        self.bounded(self.builds.set_state(id, status)).await
    }

    #[instrument(skip(self), fields(build_id = %id))]
    pub async fn set_build_time_metric(&self, id: Uuid, metric: &str) -> StoreResult<()> {
        self.bounded(self.builds.set_time_metric(id, metric)).await
    }

    #[instrument(skip(self), fields(build_id = %id))]
    pub async fn set_docker_image_sizes_metric(
        &self,
        id: Uuid,
        compressed: u64,
        uncompressed: u64,
    ) -> StoreResult<()> {
        self.bounded(self.builds.set_docker_image_sizes(id, compressed, uncompressed))
            .await
    }

    #[instrument(skip(self, events), fields(build_id = %id, count = events.len()))]
    pub async fn save_build_output(
        &self,
        id: Uuid,
        events: &[BuildEvent],
        channel: &str,
    ) -> StoreResult<()> {
        let channel = validate_channel_name(channel)?;

        let txn = self
            .bounded(async {
                let txn = self.db.begin().await?;

                if let Err(err) = events::append_in(&txn, id, events, channel).await {
                    txn.rollback().await?;
                    return Err(err);
                }

                Ok::<_, StoreError>(txn)
            })
            .await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn get_build_output(&self, id: Uuid, channel: &str) -> StoreResult<Vec<BuildEvent>> {
        self.bounded(self.events.list(id, channel)).await
    }

    async fn bounded<T, F>(&self, operation: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        match tokio::time::timeout(self.deadline, operation).await {
            Ok(result) => result,
            Err(_) => {
                warn!(deadline = ?self.deadline, "Store operation exceeded deadline");
                Err(StoreError::Timeout(self.deadline))
            }
        }
    }
}
