/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::consts::*;
use super::error::StoreResult;
use super::input::{greater_than_zero, validate_flag_name};
use chrono::NaiveDateTime;
use clap::Parser;
use entity::*;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

pub use entity::build::{
    BuildDefinition, BuildFlag, BuildStatus, MetricName, PushDefinition, PushRegistryDefinition,
    PushS3Definition,
};
pub use entity::build_event::{EventErrorType, EventType, OutputChannel};

#[derive(Parser, Debug, Clone)]
#[command(name = "Dockyard Store", display_name = "Dockyard Store", bin_name = "dockyard-store", author = "Wavelens", version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "DOCKYARD_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    #[arg(long, env = "DOCKYARD_LOG_FORMAT", value_parser = LOG_FORMATS, default_value = "text")]
    pub log_format: String,
    #[arg(long, env = "DOCKYARD_DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "DOCKYARD_DATABASE_URL_FILE")]
    pub database_url_file: Option<String>,
    #[arg(long, env = "DOCKYARD_MAX_CONNECTIONS", value_parser = greater_than_zero::<u32>, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
    #[arg(long, env = "DOCKYARD_MIN_CONNECTIONS", default_value_t = DEFAULT_MIN_CONNECTIONS)]
    pub min_connections: u32,
    #[arg(long, env = "DOCKYARD_CONNECT_TIMEOUT", value_parser = greater_than_zero::<u64>, default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout: u64,
    #[arg(long, env = "DOCKYARD_OPERATION_TIMEOUT", value_parser = greater_than_zero::<u64>, default_value_t = DEFAULT_OPERATION_TIMEOUT_SECS)]
    pub operation_timeout: u64,
    #[arg(long, env = "DOCKYARD_REPORT_ERRORS", default_value = "false")]
    pub report_errors: bool,
    #[arg(long, env = "DOCKYARD_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
}

/// What a collaborator submits to start tracking a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
    pub build: BuildDefinition,
    pub push: PushDefinition,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFlags {
    pub finished: bool,
    pub failed: bool,
    pub cancelled: bool,
}

/// Partial flag update. Only flags that are `Some` are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFlagsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled: Option<bool>,
}

impl BuildFlagsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an update from string-keyed flags, rejecting unknown names.
    pub fn from_names<I, K>(flags: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = (K, bool)>,
        K: AsRef<str>,
    {
        let mut update = Self::new();
        for (name, value) in flags {
            update.set(validate_flag_name(name.as_ref())?, value);
        }

        Ok(update)
    }

    pub fn with(mut self, flag: BuildFlag, value: bool) -> Self {
        self.set(flag, value);
        self
    }

    pub fn set(&mut self, flag: BuildFlag, value: bool) {
        match flag {
            BuildFlag::Finished => self.finished = Some(value),
            BuildFlag::Failed => self.failed = Some(value),
            BuildFlag::Cancelled => self.cancelled = Some(value),
        }
    }

    pub fn get(&self, flag: BuildFlag) -> Option<bool> {
        match flag {
            BuildFlag::Finished => self.finished,
            BuildFlag::Failed => self.failed,
            BuildFlag::Cancelled => self.cancelled,
        }
    }

    pub fn entries(&self) -> Vec<(BuildFlag, bool)> {
        BuildFlag::iter()
            .filter_map(|flag| self.get(flag).map(|value| (flag, value)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl FromIterator<(BuildFlag, bool)> for BuildFlagsUpdate {
    fn from_iter<I: IntoIterator<Item = (BuildFlag, bool)>>(iter: I) -> Self {
        let mut update = Self::new();
        for (flag, value) in iter {
            update.set(flag, value);
        }

        update
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMetrics {
    /// Time from build creation until each recorded milestone.
    pub elapsed: BTreeMap<MetricName, Duration>,
    pub docker_image_size_compressed: Option<u64>,
    pub docker_image_size_uncompressed: Option<u64>,
}

impl BuildMetrics {
    pub fn elapsed(&self, metric: MetricName) -> Option<Duration> {
        self.elapsed.get(&metric).copied()
    }

    fn from_model(build: &MBuild) -> Self {
        let elapsed = MetricName::iter()
            .filter_map(|metric| {
                metric.recorded_at(build).map(|recorded_at| {
                    // clock skew between writers must not produce a negative duration
                    let elapsed = (recorded_at - build.created_at)
                        .to_std()
                        .unwrap_or_default();
                    (metric, elapsed)
                })
            })
            .collect();

        BuildMetrics {
            elapsed,
            docker_image_size_compressed: build
                .docker_image_size_compressed
                .and_then(|size| u64::try_from(size).ok()),
            docker_image_size_uncompressed: build
                .docker_image_size_uncompressed
                .and_then(|size| u64::try_from(size).ok()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub id: Uuid,
    pub definition: BuildDefinition,
    pub push: PushDefinition,
    pub status: BuildStatus,
    pub flags: BuildFlags,
    pub created_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
    pub metrics: BuildMetrics,
}

impl From<MBuild> for BuildRecord {
    fn from(build: MBuild) -> Self {
        let metrics = BuildMetrics::from_model(&build);

        BuildRecord {
            id: build.id,
            definition: build.definition,
            push: build.push,
            status: build.status,
            flags: BuildFlags {
                finished: build.finished,
                failed: build.failed,
                cancelled: build.cancelled,
            },
            created_at: build.created_at,
            completed_at: build.completed_at,
            metrics,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEventError {
    pub error_type: EventErrorType,
}

impl Default for BuildEventError {
    fn default() -> Self {
        BuildEventError {
            error_type: EventErrorType::NoError,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEvent {
    pub build_id: String,
    pub event_type: EventType,
    #[serde(default)]
    pub event_error: BuildEventError,
    pub message: String,
}

impl BuildEvent {
    pub fn new(build_id: Uuid, event_type: EventType, message: impl Into<String>) -> Self {
        BuildEvent {
            build_id: build_id.to_string(),
            event_type,
            event_error: BuildEventError::default(),
            message: message.into(),
        }
    }

    pub fn with_error(mut self, error_type: EventErrorType) -> Self {
        self.event_error = BuildEventError { error_type };
        self
    }

    pub fn is_error(&self) -> bool {
        self.event_error.error_type.is_error()
    }

    pub(crate) fn to_active_model(
        &self,
        build: Uuid,
        channel: OutputChannel,
        created_at: NaiveDateTime,
    ) -> ABuildEvent {
        ABuildEvent {
            id: NotSet,
            build: Set(build),
            channel: Set(channel),
            build_id: Set(self.build_id.clone()),
            event_type: Set(self.event_type),
            error_type: Set(self.event_error.error_type),
            message: Set(self.message.clone()),
            created_at: Set(created_at),
        }
    }
}

impl From<MBuildEvent> for BuildEvent {
    fn from(event: MBuildEvent) -> Self {
        BuildEvent {
            build_id: event.build_id,
            event_type: event.event_type,
            event_error: BuildEventError {
                error_type: event.error_type,
            },
            message: event.message,
        }
    }
}

pub type EBuild = build::Entity;
pub type EBuildEvent = build_event::Entity;

pub type MBuild = build::Model;
pub type MBuildEvent = build_event::Model;

pub type ABuild = build::ActiveModel;
pub type ABuildEvent = build_event::ActiveModel;

pub type CBuild = build::Column;
pub type CBuildEvent = build_event::Column;
