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
                    .table(BuildEvent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BuildEvent::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BuildEvent::Build).uuid().not_null())
                    .col(ColumnDef::new(BuildEvent::Channel).string_len(32).not_null())
                    .col(ColumnDef::new(BuildEvent::BuildId).string().not_null())
                    .col(ColumnDef::new(BuildEvent::EventType).integer().not_null())
                    .col(ColumnDef::new(BuildEvent::ErrorType).integer().not_null())
                    .col(ColumnDef::new(BuildEvent::Message).text().not_null())
                    .col(
                        ColumnDef::new(BuildEvent::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-build_event-build")
                            .from(BuildEvent::Table, BuildEvent::Build)
                            .to(Build::Table, Build::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-build_event-build-channel")
                    .table(BuildEvent::Table)
                    .col(BuildEvent::Build)
                    .col(BuildEvent::Channel)
                    .col(BuildEvent::Id)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BuildEvent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BuildEvent {
    Table,
    Id,
    Build,
    Channel,
    BuildId,
    EventType,
    ErrorType,
    Message,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Build {
    Table,
    Id,
}
