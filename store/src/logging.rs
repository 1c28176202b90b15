/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use super::types::Cli;

/// `RUST_LOG` wins over the configured level when it is set.
pub fn env_filter(cli: &Cli) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level))
}

pub fn init_logging(cli: &Cli) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(cli));

    let result = if cli.log_format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
