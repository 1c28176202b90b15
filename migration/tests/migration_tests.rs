/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for the schema migrations against an in-memory SQLite database

use migration::{Migrator, MigratorTrait, SchemaManager};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

async fn memory_db() -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    Database::connect(opt).await
}

#[tokio::test]
async fn test_migrations_create_tables() -> Result<(), DbErr> {
    let db = memory_db().await?;
    Migrator::up(&db, None).await?;

    let manager = SchemaManager::new(&db);
    assert!(manager.has_table("build").await?);
    assert!(manager.has_table("build_event").await?);
    assert!(manager.has_column("build", "docker_image_size_compressed").await?);
    assert!(manager.has_column("build_event", "channel").await?);
    assert!(
        manager
            .has_index("build_event", "idx-build_event-build-channel")
            .await?
    );

    Ok(())
}

#[tokio::test]
async fn test_migrations_are_reversible() -> Result<(), DbErr> {
    let db = memory_db().await?;
    Migrator::up(&db, None).await?;
    Migrator::down(&db, None).await?;

    let manager = SchemaManager::new(&db);
    assert!(!manager.has_table("build").await?);
    assert!(!manager.has_table("build_event").await?);

    Migrator::up(&db, None).await?;
    assert!(manager.has_table("build_event").await?);

    Ok(())
}
