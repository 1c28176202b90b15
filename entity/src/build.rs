/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum BuildStatus {
    #[sea_orm(num_value = 0)]
    Queued,
    #[sea_orm(num_value = 1)]
    Building,
    #[sea_orm(num_value = 2)]
    Pushing,
    #[sea_orm(num_value = 3)]
    Cleaning,
    #[sea_orm(num_value = 4)]
    Finished,
    #[sea_orm(num_value = 5)]
    Failed,
    #[sea_orm(num_value = 6)]
    Cancelled,
}

impl BuildStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::Queued => "QUEUED",
            BuildStatus::Building => "BUILDING",
            BuildStatus::Pushing => "PUSHING",
            BuildStatus::Cleaning => "CLEANING",
            BuildStatus::Finished => "FINISHED",
            BuildStatus::Failed => "FAILED",
            BuildStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BuildStatus::Finished | BuildStatus::Failed | BuildStatus::Cancelled
        )
    }

    /// Whether `next` follows this status in the pipeline state machine.
    ///
    /// Phases advance `Queued -> Building -> Pushing -> Cleaning -> Finished`; a
    /// phase may be skipped (a build without push destinations goes straight
    /// from `Building` to `Cleaning` or `Finished`). `Failed` and `Cancelled`
    /// are reachable from every non-terminal status. Nothing leaves a terminal
    /// status.
    pub fn can_transition_to(&self, next: BuildStatus) -> bool {
        if self.is_terminal() {
            return false;
        }

        match next {
            BuildStatus::Failed | BuildStatus::Cancelled => true,
            BuildStatus::Queued => false,
            _ => next.phase_rank() > self.phase_rank(),
        }
    }

    fn phase_rank(&self) -> u8 {
        match self {
            BuildStatus::Queued => 0,
            BuildStatus::Building => 1,
            BuildStatus::Pushing => 2,
            BuildStatus::Cleaning => 3,
            BuildStatus::Finished | BuildStatus::Failed | BuildStatus::Cancelled => 4,
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BuildStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUEUED" => Ok(BuildStatus::Queued),
            "BUILDING" => Ok(BuildStatus::Building),
            "PUSHING" => Ok(BuildStatus::Pushing),
            "CLEANING" => Ok(BuildStatus::Cleaning),
            "FINISHED" => Ok(BuildStatus::Finished),
            "FAILED" => Ok(BuildStatus::Failed),
            "CANCELLED" => Ok(BuildStatus::Cancelled),
            _ => Err(format!("Unknown build status: {}", s)),
        }
    }
}

/// Elapsed-time metrics recorded against a build, one column each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    DockerBuildCompleted,
    PushCompleted,
    CleanCompleted,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::DockerBuildCompleted => "docker_build_completed",
            MetricName::PushCompleted => "push_completed",
            MetricName::CleanCompleted => "clean_completed",
        }
    }

    pub fn column(&self) -> Column {
        match self {
            MetricName::DockerBuildCompleted => Column::DockerBuildCompletedAt,
            MetricName::PushCompleted => Column::PushCompletedAt,
            MetricName::CleanCompleted => Column::CleanCompletedAt,
        }
    }

    pub fn recorded_at(&self, build: &Model) -> Option<NaiveDateTime> {
        match self {
            MetricName::DockerBuildCompleted => build.docker_build_completed_at,
            MetricName::PushCompleted => build.push_completed_at,
            MetricName::CleanCompleted => build.clean_completed_at,
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MetricName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docker_build_completed" => Ok(MetricName::DockerBuildCompleted),
            "push_completed" => Ok(MetricName::PushCompleted),
            "clean_completed" => Ok(MetricName::CleanCompleted),
            _ => Err(format!("Unknown metric name: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildFlag {
    Finished,
    Failed,
    Cancelled,
}

impl BuildFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildFlag::Finished => "finished",
            BuildFlag::Failed => "failed",
            BuildFlag::Cancelled => "cancelled",
        }
    }

    pub fn column(&self) -> Column {
        match self {
            BuildFlag::Finished => Column::Finished,
            BuildFlag::Failed => Column::Failed,
            BuildFlag::Cancelled => Column::Cancelled,
        }
    }
}

impl fmt::Display for BuildFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BuildFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "finished" => Ok(BuildFlag::Finished),
            "failed" => Ok(BuildFlag::Failed),
            "cancelled" => Ok(BuildFlag::Cancelled),
            _ => Err(format!("Unknown build flag: {}", s)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, FromJsonQueryResult)]
pub struct BuildDefinition {
    pub github_repo: String,
    pub git_ref: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tag_with_commit_sha: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PushRegistryDefinition {
    #[serde(default)]
    pub repo: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PushS3Definition {
    pub bucket: String,
    pub region: String,
    #[serde(default)]
    pub key_prefix: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, FromJsonQueryResult)]
pub struct PushDefinition {
    #[serde(default)]
    pub registry: Option<PushRegistryDefinition>,
    #[serde(default)]
    pub s3: Option<PushS3Definition>,
}

impl PushDefinition {
    pub fn is_empty(&self) -> bool {
        self.registry.is_none() && self.s3.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "build")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Json")]
    pub definition: BuildDefinition,
    #[sea_orm(column_type = "Json")]
    pub push: PushDefinition,
    pub status: BuildStatus,
    pub finished: bool,
    pub failed: bool,
    pub cancelled: bool,
    pub created_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
    pub docker_build_completed_at: Option<NaiveDateTime>,
    pub push_completed_at: Option<NaiveDateTime>,
    pub clean_completed_at: Option<NaiveDateTime>,
    pub docker_image_size_compressed: Option<i64>,
    pub docker_image_size_uncompressed: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::build_event::Entity")]
    BuildEvent,
}

impl Related<super::build_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BuildEvent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
