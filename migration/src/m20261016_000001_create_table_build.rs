/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Build::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Build::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Build::Definition).json().not_null())
                    .col(ColumnDef::new(Build::Push).json().not_null())
                    .col(ColumnDef::new(Build::Status).integer().not_null())
                    .col(
                        ColumnDef::new(Build::Finished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Build::Failed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Build::Cancelled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Build::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Build::CompletedAt).date_time())
                    .col(ColumnDef::new(Build::DockerBuildCompletedAt).date_time())
                    .col(ColumnDef::new(Build::PushCompletedAt).date_time())
                    .col(ColumnDef::new(Build::CleanCompletedAt).date_time())
                    .col(ColumnDef::new(Build::DockerImageSizeCompressed).big_integer())
                    .col(ColumnDef::new(Build::DockerImageSizeUncompressed).big_integer())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Build::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Build {
    Table,
    Id,
    Definition,
    Push,
    Status,
    Finished,
    Failed,
    Cancelled,
    CreatedAt,
    CompletedAt,
    DockerBuildCompletedAt,
    PushCompletedAt,
    CleanCompletedAt,
    DockerImageSizeCompressed,
    DockerImageSizeUncompressed,
}
