// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const PROD: &str = "prod";
#[allow(dead_code)]
pub const DEV: &str = "dev";
#[allow(dead_code)]
pub const TEST: &str = "test";

/// Cache bound used when the config has no `cache` section.
pub const DEFAULT_CACHE_MAX_SIZE: usize = 1024;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(rename = "openhash")]
    pub openhash: ConfigBox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfigBox {
    pub env: String,
    pub logs: Option<Logs>,
    pub table: Option<Table>,
    pub cache: Option<Cache>,
    pub workload: Option<Workload>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Table {
    /// Entries a fresh map holds before its first resize.
    #[serde(rename = "initial_capacity")]
    pub initial_capacity: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Cache {
    #[serde(rename = "max_size")]
    pub max_size: usize,
}

impl Default for Cache {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_CACHE_MAX_SIZE,
        }
    }
}

/// Synthetic workload driven by the binary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Workload {
    pub operations: usize,
    #[serde(rename = "key_space")]
    pub key_space: u64,
    pub seed: u64,
    pub threads: usize,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            operations: 100_000,
            key_space: 10_000,
            seed: 42,
            threads: 4,
        }
    }
}

// Config trait
pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    #[allow(dead_code)]
    fn is_dev(&self) -> bool;
    #[allow(dead_code)]
    fn is_test(&self) -> bool;
    fn table(&self) -> Table;
    fn cache(&self) -> Cache;
    fn workload(&self) -> Workload;
}

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.openhash.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.openhash.env == PROD
    }

    fn is_dev(&self) -> bool {
        self.openhash.env == DEV
    }

    fn is_test(&self) -> bool {
        self.openhash.env == TEST
    }

    fn table(&self) -> Table {
        self.openhash.table.clone().unwrap_or_default()
    }

    fn cache(&self) -> Cache {
        self.openhash.cache.clone().unwrap_or_default()
    }

    fn workload(&self) -> Workload {
        self.openhash.workload.clone().unwrap_or_default()
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        let cfg = Self::parse(&data).with_context(|| format!("load config from {:?}", abs_path))?;
        Ok(cfg)
    }

    /// Parses and validates configuration from YAML text.
    pub fn parse(data: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(data).context("unmarshal yaml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if let Some(cache) = &self.openhash.cache {
            if cache.max_size == 0 {
                anyhow::bail!("cache.max_size must be positive");
            }
        }
        if let Some(workload) = &self.openhash.workload {
            if workload.key_space == 0 {
                anyhow::bail!("workload.key_space must be positive");
            }
            if workload.threads == 0 {
                anyhow::bail!("workload.threads must be positive");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub mod test_config;
