/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Build record persistence.
//!
//! Every mutation is a single `UPDATE` that names only the columns it
//! changes, so concurrent writers touching different fields of the same
//! build never overwrite each other and no read-modify-write cycle is needed.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QuerySelect,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::error::{StoreError, StoreResult};
use super::input::{new_id, validate_metric_name};
use super::types::*;

#[derive(Debug, Clone)]
pub struct BuildRecordStore {
    db: Arc<DatabaseConnection>,
}

impl BuildRecordStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create(&self, request: &BuildRequest) -> StoreResult<Uuid> {
        let id = new_id();
        let now = Utc::now().naive_utc();

        let abuild = ABuild {
            id: Set(id),
            definition: Set(request.build.clone()),
            push: Set(request.push.clone()),
            status: Set(BuildStatus::Queued),
            finished: Set(false),
            failed: Set(false),
            cancelled: Set(false),
            created_at: Set(now),
            completed_at: Set(None),
            docker_build_completed_at: Set(None),
            push_completed_at: Set(None),
            clean_completed_at: Set(None),
            docker_image_size_compressed: Set(None),
            docker_image_size_uncompressed: Set(None),
        };

        abuild.insert(self.db.as_ref()).await?;

        Ok(id)
    }

    pub async fn get(&self, id: Uuid) -> StoreResult<BuildRecord> {
        EBuild::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(BuildRecord::from)
            .ok_or_else(|| StoreError::build_not_found(id))
    }

    pub async fn set_flags(&self, id: Uuid, flags: &BuildFlagsUpdate) -> StoreResult<()> {
        let columns = flags
            .entries()
            .into_iter()
            .map(|(flag, value)| (flag.column(), Expr::value(value)))
            .collect();

        self.update_columns(id, columns).await
    }

    pub async fn set_completed_timestamp(&self, id: Uuid) -> StoreResult<()> {
        let now = Utc::now().naive_utc();
        self.update_columns(id, vec![(CBuild::CompletedAt, Expr::value(now))])
            .await
    }

    pub async fn set_state(&self, id: Uuid, status: BuildStatus) -> StoreResult<()> {
        self.update_columns(id, vec![(CBuild::Status, Expr::value(status))])
            .await
    }

    /// Records "now" as the completion time of `metric`. The elapsed value is
    /// derived from the build's creation time when the record is read.
    pub async fn set_time_metric(&self, id: Uuid, metric: &str) -> StoreResult<()> {
        let metric = validate_metric_name(metric)?;
        let now = Utc::now().naive_utc();

        self.update_columns(id, vec![(metric.column(), Expr::value(now))])
            .await
    }

    pub async fn set_docker_image_sizes(
        &self,
        id: Uuid,
        compressed: u64,
        uncompressed: u64,
    ) -> StoreResult<()> {
        let compressed = size_to_column(compressed)?;
        let uncompressed = size_to_column(uncompressed)?;

        self.update_columns(
            id,
            vec![
                (CBuild::DockerImageSizeCompressed, Expr::value(compressed)),
                (CBuild::DockerImageSizeUncompressed, Expr::value(uncompressed)),
            ],
        )
        .await
    }

    async fn update_columns(&self, id: Uuid, columns: Vec<(CBuild, SimpleExpr)>) -> StoreResult<()> {
        if columns.is_empty() {
            return if exists_in(self.db.as_ref(), id).await? {
                Ok(())
            } else {
                Err(StoreError::build_not_found(id))
            };
        }

        let mut update = EBuild::update_many().filter(CBuild::Id.eq(id));
        for (column, value) in columns {
            update = update.col_expr(column, value);
        }

        let result = update.exec(self.db.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::build_not_found(id));
        }

        debug!(build_id = %id, "Updated build record");
        Ok(())
    }
}

fn size_to_column(size: u64) -> StoreResult<i64> {
    i64::try_from(size).map_err(|_| {
        StoreError::InvalidArgument(format!("image size {} exceeds the storable range", size))
    })
}

pub(crate) async fn exists_in<C: ConnectionTrait>(conn: &C, id: Uuid) -> StoreResult<bool> {
    let found = EBuild::find_by_id(id)
        .select_only()
        .column(CBuild::Id)
        .into_tuple::<Uuid>()
        .one(conn)
        .await?;

    Ok(found.is_some())
}

pub(crate) async fn delete_in<C: ConnectionTrait>(conn: &C, id: Uuid) -> StoreResult<()> {
    let result = EBuild::delete_by_id(id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::build_not_found(id));
    }

    Ok(())
}
