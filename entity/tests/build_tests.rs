/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for build and build event entities

use chrono::{NaiveDate, TimeDelta};
use entity::*;
use sea_orm::{DatabaseBackend, MockDatabase, entity::prelude::*};
use uuid::Uuid;

fn test_build(id: Uuid) -> build::Model {
    let naive_date = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    build::Model {
        id,
        definition: build::BuildDefinition {
            github_repo: "foobar/baz".to_owned(),
            git_ref: "master".to_owned(),
            tags: vec!["master".to_owned()],
            tag_with_commit_sha: true,
        },
        push: build::PushDefinition {
            registry: Some(build::PushRegistryDefinition::default()),
            s3: Some(build::PushS3Definition {
                bucket: "asdf".to_owned(),
                region: "us-east-1".to_owned(),
                key_prefix: "qwerty".to_owned(),
            }),
        },
        status: build::BuildStatus::Pushing,
        finished: false,
        failed: false,
        cancelled: false,
        created_at: naive_date,
        completed_at: None,
        docker_build_completed_at: Some(naive_date + TimeDelta::seconds(90)),
        push_completed_at: None,
        clean_completed_at: None,
        docker_image_size_compressed: Some(10000),
        docker_image_size_uncompressed: Some(999999),
    }
}

#[tokio::test]
async fn test_build_entity_with_definitions() -> Result<(), DbErr> {
    let build_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![test_build(build_id)]])
        .into_connection();

    let result = build::Entity::find_by_id(build_id).one(&db).await?;

    assert!(result.is_some());
    let build = result.unwrap();
    assert_eq!(build.id, build_id);
    assert_eq!(build.status, build::BuildStatus::Pushing);
    assert_eq!(build.definition.github_repo, "foobar/baz");
    assert_eq!(build.definition.tags, vec!["master".to_owned()]);
    assert!(build.definition.tag_with_commit_sha);
    assert_eq!(build.push.s3.as_ref().unwrap().bucket, "asdf");
    assert!(!build.push.is_empty());

    Ok(())
}

#[test]
fn test_metric_columns() {
    let build = test_build(Uuid::new_v4());

    assert_eq!(
        build::MetricName::DockerBuildCompleted.recorded_at(&build),
        Some(build.created_at + TimeDelta::seconds(90))
    );
    assert_eq!(build::MetricName::PushCompleted.recorded_at(&build), None);
    assert!(matches!(
        build::MetricName::CleanCompleted.column(),
        build::Column::CleanCompletedAt
    ));
    assert!(matches!(
        build::BuildFlag::Cancelled.column(),
        build::Column::Cancelled
    ));
}

#[test]
fn test_push_definition_shapes() {
    let registry_only = build::PushDefinition {
        registry: Some(build::PushRegistryDefinition {
            repo: "acme/app".to_owned(),
        }),
        s3: None,
    };
    assert!(!registry_only.is_empty());
    assert!(build::PushDefinition::default().is_empty());

    let json = serde_json::json!({
        "s3": { "bucket": "asdf", "region": "us-east-1" }
    });
    let s3_only: build::PushDefinition = serde_json::from_value(json).unwrap();
    assert!(s3_only.registry.is_none());
    assert_eq!(s3_only.s3.unwrap().key_prefix, "");
}

#[tokio::test]
async fn test_build_event_entity() -> Result<(), DbErr> {
    let build_id = Uuid::new_v4();
    let naive_date = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![build_event::Model {
            id: 1,
            build: build_id,
            channel: build_event::OutputChannel::BuildOutput,
            build_id: build_id.to_string(),
            event_type: build_event::EventType::DockerBuildStream,
            error_type: build_event::EventErrorType::NoError,
            message: "something happened".to_owned(),
            created_at: naive_date,
        }]])
        .into_connection();

    let events = build_event::Entity::find()
        .filter(build_event::Column::Build.eq(build_id))
        .all(&db)
        .await?;

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].channel, build_event::OutputChannel::BuildOutput);
    assert_eq!(events[0].build_id, build_id.to_string());
    assert_eq!(events[0].message, "something happened");

    Ok(())
}

#[test]
fn test_primary_key_generation() {
    // build ids are assigned by the store, event ids by the database
    assert!(!<build::PrimaryKey as PrimaryKeyTrait>::auto_increment());
    assert!(<build_event::PrimaryKey as PrimaryKeyTrait>::auto_increment());
}
