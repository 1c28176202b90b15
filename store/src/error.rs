/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm::DbErr;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    Storage,
}

#[derive(Debug)]
pub enum StoreError {
    NotFound(String),
    InvalidArgument(String),
    Storage(DbErr),
    Timeout(Duration),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            StoreError::InvalidArgument(msg) => write!(f, "Invalid Argument: {}", msg),
            StoreError::Storage(err) => write!(f, "Storage error: {}", err),
            StoreError::Timeout(deadline) => {
                write!(f, "Storage error: operation exceeded deadline of {:?}", deadline)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        StoreError::Storage(err)
    }
}

impl StoreError {
    pub fn build_not_found(id: Uuid) -> Self {
        StoreError::NotFound(format!("build {} not found", id))
    }

    pub fn invalid_argument(what: &str, value: &str, allowed: &[&str]) -> Self {
        StoreError::InvalidArgument(format!(
            "invalid {} `{}` (expected one of: {})",
            what,
            value,
            allowed.join(", ")
        ))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            StoreError::Storage(_) | StoreError::Timeout(_) => ErrorKind::Storage,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }

    /// Backend failures are safe for the caller to retry; the store never
    /// retries on its own.
    pub fn is_storage_failure(&self) -> bool {
        self.kind() == ErrorKind::Storage
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
