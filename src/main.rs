// Main entrypoint: runs the configured synthetic workloads and logs a report.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use openhash::config::{Config, ConfigTrait};
use openhash::{logs, workload};

const CONFIG_PATH: &str = "cfg/openhash.cfg.yaml";
const CONFIG_PATH_LOCAL: &str = "cfg/openhash.cfg.local.yaml";

/// openhash - open-addressing maps, bimap and LRU cache workload runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, value_name = "FILE")]
    cfg: Option<PathBuf>,

    /// Overrides workload.operations
    #[arg(long)]
    operations: Option<usize>,
}

/// Loads the configuration struct from YAML file.
/// Tries local config first, then falls back to default config.
fn load_cfg(path: Option<PathBuf>) -> Result<Config> {
    if let Some(custom_path) = path {
        return Config::load(&custom_path)
            .with_context(|| format!("failed to load custom config from {:?}", custom_path));
    }

    match Config::load(PathBuf::from(CONFIG_PATH_LOCAL)) {
        Ok(cfg) => Ok(cfg),
        Err(_) => Config::load(PathBuf::from(CONFIG_PATH))
            .with_context(|| format!("failed to load config from {}", CONFIG_PATH)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut cfg = load_cfg(args.cfg)?;
    if let Some(operations) = args.operations {
        let mut workload = cfg.workload();
        workload.operations = operations;
        cfg.openhash.workload = Some(workload);
    }

    // Configure logger (must be done after config is loaded)
    logs::init(&cfg)?;
    info!(
        component = "main",
        event = "config_loaded",
        env = %cfg.openhash.env,
        "config loaded"
    );

    if let Err(e) = workload::run_all(&cfg) {
        error!(
            component = "main",
            event = "workload_failed",
            error = %e,
            "workload run failed"
        );
        return Err(e);
    }

    Ok(())
}
