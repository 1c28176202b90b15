/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::time::Duration;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 100;
pub const DEFAULT_MIN_CONNECTIONS: u32 = 5;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(DEFAULT_OPERATION_TIMEOUT_SECS);

/// Rows per INSERT when appending events. Keeps a statement well below the
/// bind-parameter limit of every supported backend.
pub const EVENT_APPEND_CHUNK_SIZE: usize = 500;

pub const LOG_FORMATS: [&str; 2] = ["text", "json"];
