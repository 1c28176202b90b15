/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for configuration parsing and database bootstrap

mod common;

use clap::Parser;
use common::*;
use std::time::Duration;
use store::consts::*;
use store::database::{connect_options, database_url};
use store::input::*;
use store::init_store;
use store::logging::env_filter;
use store::types::{BuildFlag, Cli, MetricName, OutputChannel};
use tracing_subscriber::filter::LevelFilter;

#[test]
fn test_cli_defaults() {
    let cli = Cli::try_parse_from(["dockyard-store", "--database-url", "sqlite::memory:"]).unwrap();

    assert_eq!(cli.log_format, "text");
    assert_eq!(cli.max_connections, DEFAULT_MAX_CONNECTIONS);
    assert_eq!(cli.min_connections, DEFAULT_MIN_CONNECTIONS);
    assert_eq!(cli.operation_timeout, DEFAULT_OPERATION_TIMEOUT_SECS);
    assert!(!cli.report_errors);
}

#[test]
fn test_cli_rejects_invalid_values() {
    assert!(Cli::try_parse_from(["dockyard-store", "--max-connections", "0"]).is_err());
    assert!(Cli::try_parse_from(["dockyard-store", "--log-format", "xml"]).is_err());
    assert!(Cli::try_parse_from(["dockyard-store", "--operation-timeout", "-1"]).is_err());
}

#[test]
fn test_database_url_sources() {
    let mut cli = create_test_cli();
    assert_eq!(database_url(&cli).unwrap(), "sqlite::memory:");

    let path = std::env::temp_dir().join(format!("dockyard-db-url-{}", new_id()));
    std::fs::write(&path, "postgres://localhost/dockyard\n").unwrap();
    cli.database_url_file = Some(path.to_string_lossy().to_string());
    assert_eq!(database_url(&cli).unwrap(), "postgres://localhost/dockyard");
    std::fs::remove_file(&path).unwrap();

    cli.database_url = None;
    cli.database_url_file = None;
    assert!(database_url(&cli).is_err());
}

#[test]
fn test_connect_options_clamp_min_connections() {
    let mut cli = create_test_cli();
    cli.max_connections = 2;
    cli.min_connections = 10;

    let options = connect_options(&cli, "sqlite::memory:".to_string());
    assert_eq!(options.get_max_connections(), Some(2));
    assert_eq!(options.get_min_connections(), Some(2));
    assert_eq!(options.get_connect_timeout(), Some(Duration::from_secs(8)));
}

#[test]
fn test_greater_than_zero() {
    assert_eq!(greater_than_zero::<u32>("1").unwrap(), 1);
    assert_eq!(
        greater_than_zero::<u64>("0").unwrap_err(),
        "`0` is not larger than 0"
    );
    assert_eq!(
        greater_than_zero::<u32>("abc").unwrap_err(),
        "`abc` is not a valid number"
    );
}

#[test]
fn test_name_validation() {
    assert_eq!(
        validate_metric_name("clean_completed").unwrap(),
        MetricName::CleanCompleted
    );
    assert_eq!(
        validate_channel_name("clean_output").unwrap(),
        OutputChannel::CleanOutput
    );
    assert_eq!(validate_flag_name("failed").unwrap(), BuildFlag::Failed);

    let err = validate_metric_name("invalid_metric_name").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid Argument: invalid metric name `invalid_metric_name` (expected one of: docker_build_completed, push_completed, clean_completed)"
    );
    assert!(validate_channel_name("Build_Output").is_err());
    assert!(validate_flag_name("").is_err());
}

#[test]
fn test_env_filter_uses_configured_level() {
    let mut cli = create_test_cli();
    cli.log_level = "warn".to_string();

    if std::env::var("RUST_LOG").is_err() {
        assert_eq!(env_filter(&cli).max_level_hint(), Some(LevelFilter::WARN));
    }
}

#[tokio::test]
async fn test_init_store_applies_migrations_and_deadline() {
    let mut cli = create_test_cli();
    cli.operation_timeout = 3;

    let store = init_store(&cli).await.unwrap();
    store.ping().await.unwrap();
    assert_eq!(store.deadline(), Duration::from_secs(3));

    let id = store.create_build(&test_request()).await.unwrap();
    assert_eq!(store.get_build_by_id(id).await.unwrap().id, id);
}
