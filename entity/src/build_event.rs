/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Named output log of a build. Each channel is an independent append-only
/// sequence of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum OutputChannel {
    #[sea_orm(string_value = "build_output")]
    BuildOutput,
    #[sea_orm(string_value = "push_output")]
    PushOutput,
    #[sea_orm(string_value = "clean_output")]
    CleanOutput,
}

impl OutputChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputChannel::BuildOutput => "build_output",
            OutputChannel::PushOutput => "push_output",
            OutputChannel::CleanOutput => "clean_output",
        }
    }
}

impl fmt::Display for OutputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build_output" => Ok(OutputChannel::BuildOutput),
            "push_output" => Ok(OutputChannel::PushOutput),
            "clean_output" => Ok(OutputChannel::CleanOutput),
            _ => Err(format!("Unknown output channel: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum EventType {
    #[sea_orm(num_value = 0)]
    DockerBuildStream,
    #[sea_orm(num_value = 1)]
    DockerPushStream,
    #[sea_orm(num_value = 2)]
    CleanStream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum EventErrorType {
    #[sea_orm(num_value = 0)]
    NoError,
    #[sea_orm(num_value = 1)]
    InternalError,
    #[sea_orm(num_value = 2)]
    FatalError,
}

impl EventErrorType {
    pub fn is_error(&self) -> bool {
        !matches!(self, EventErrorType::NoError)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "build_event")]
pub struct Model {
    /// Append position; strictly increasing across all channels.
    #[sea_orm(primary_key)]
    pub id: i64,
    pub build: Uuid,
    pub channel: OutputChannel,
    /// Build id as reported by the event producer, kept verbatim.
    pub build_id: String,
    pub event_type: EventType,
    pub error_type: EventErrorType,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::build::Entity",
        from = "Column::Build",
        to = "super::build::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Build,
}

impl Related<super::build::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Build.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
