/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use entity::build::{BuildFlag, MetricName};
use entity::build_event::OutputChannel;
use sea_orm::Iterable;
use std::str::FromStr;
use uuid::Uuid;

use super::error::{StoreError, StoreResult};

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

pub fn validate_metric_name(name: &str) -> StoreResult<MetricName> {
    MetricName::from_str(name).map_err(|_| {
        let allowed = MetricName::iter().map(|m| m.as_str()).collect::<Vec<_>>();
        StoreError::invalid_argument("metric name", name, &allowed)
    })
}

pub fn validate_channel_name(name: &str) -> StoreResult<OutputChannel> {
    OutputChannel::from_str(name).map_err(|_| {
        let allowed = OutputChannel::iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>();
        StoreError::invalid_argument("output channel", name, &allowed)
    })
}

pub fn validate_flag_name(name: &str) -> StoreResult<BuildFlag> {
    BuildFlag::from_str(name).map_err(|_| {
        let allowed = BuildFlag::iter().map(|f| f.as_str()).collect::<Vec<_>>();
        StoreError::invalid_argument("build flag", name, &allowed)
    })
}

pub fn greater_than_zero<
    T: std::str::FromStr + std::cmp::PartialOrd + std::fmt::Display + Default,
>(
    s: &str,
) -> Result<T, String> {
    let num: T = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number", s))?;

    if num > T::default() {
        Ok(num)
    } else {
        Err(format!("`{}` is not larger than 0", s))
    }
}
