//! Structured logging setup.

use anyhow::{anyhow, Result};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::ConfigTrait;

/// Level used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LEVEL: &str = "info";

/// Resolves the filter directive from the config.
pub fn level(cfg: &impl ConfigTrait) -> &str {
    cfg.logs()
        .and_then(|logs| logs.level.as_deref())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Installs the global subscriber: JSON in prod, pretty console otherwise.
/// `RUST_LOG` overrides the configured level.
pub fn init(cfg: &impl ConfigTrait) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level(cfg)));

    let installed = if cfg.is_prod() {
        // Production: JSON format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        // Development: Pretty console format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .try_init()
    };
    installed.map_err(|e| anyhow!("install tracing subscriber: {e}"))
}
