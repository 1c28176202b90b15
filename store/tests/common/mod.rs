/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#![allow(dead_code)]

use store::BuildStore;
use store::database::connect_db;
use store::types::*;
use uuid::Uuid;

/// Every connection to `sqlite::memory:` opens its own database, so the pool
/// is pinned to a single connection to keep one database per test.
pub fn create_test_cli() -> Cli {
    Cli {
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        database_url: Some("sqlite::memory:".to_string()),
        database_url_file: None,
        max_connections: 1,
        min_connections: 1,
        connect_timeout: 8,
        operation_timeout: 30,
        report_errors: false,
        sentry_dsn: None,
    }
}

pub async fn test_store() -> BuildStore {
    let db = connect_db(&create_test_cli())
        .await
        .expect("in-memory database");

    BuildStore::new(db)
}

pub fn test_request() -> BuildRequest {
    BuildRequest {
        build: BuildDefinition {
            github_repo: "foobar/baz".to_string(),
            git_ref: "master".to_string(),
            tags: vec!["master".to_string(), "latest".to_string()],
            tag_with_commit_sha: true,
        },
        push: PushDefinition {
            registry: Some(PushRegistryDefinition {
                repo: "acme/baz".to_string(),
            }),
            s3: Some(PushS3Definition {
                bucket: "asdf".to_string(),
                region: "us-east-1".to_string(),
                key_prefix: "qwerty".to_string(),
            }),
        },
    }
}

pub fn build_event(id: Uuid, message: &str) -> BuildEvent {
    BuildEvent::new(id, EventType::DockerBuildStream, message)
}

pub fn messages(events: &[BuildEvent]) -> Vec<&str> {
    events.iter().map(|event| event.message.as_str()).collect()
}
