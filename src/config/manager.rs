use super::Config;
use anyhow::{anyhow, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

use crate::errors::ConfigError;

/// Loads the service configuration once at startup: `main.toml` from the
/// config directory when present, then environment overrides on top.
/// The configuration is not reloadable.
#[derive(Debug)]
pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_dir: &str) -> Result<Self> {
        let mut config = Self::load_configuration(config_dir).await?;
        apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<Config> {
        let main_config_path = format!("{}/main.toml", config_dir);

        if !Path::new(&main_config_path).exists() {
            debug!(
                "No config file at {}, starting from defaults and environment",
                main_config_path
            );
            return Ok(Config::default());
        }

        let content =
            fs::read_to_string(&main_config_path)
                .await
                .map_err(|e| ConfigError::LoadFailed {
                    path: main_config_path.clone(),
                    reason: e.to_string(),
                })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            reason: format!("{}: {}", main_config_path, e),
        })?;

        info!("Configuration loaded from {}", main_config_path);
        Ok(config)
    }
}

/// Environment overrides, matching the variable names the deployment
/// tooling exports: `RPC` (comma-separated endpoint list),
/// `VALIDATOR_SET_ADDRESS`, `MINING_ADDRESS`, plus the numeric tunables.
fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Ok(rpc) = std::env::var("RPC") {
        config.rpc_urls = rpc
            .split(',')
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();
    }
    if let Ok(address) = std::env::var("VALIDATOR_SET_ADDRESS") {
        config.validator_set_address = address.trim().to_string();
    }
    if let Ok(address) = std::env::var("MINING_ADDRESS") {
        config.mining_address = address.trim().to_string();
    }
    if let Ok(host) = std::env::var("LISTEN_HOST") {
        config.host = host;
    }
    if let Ok(port) = std::env::var("LISTEN_PORT") {
        config.port = parse_env("LISTEN_PORT", &port)?;
    }
    if let Ok(period) = std::env::var("BLOCKS_SCAN_PERIOD") {
        config.scan_period_seconds = parse_env("BLOCKS_SCAN_PERIOD", &period)?;
    }
    if let Ok(range) = std::env::var("BLOCKS_SCAN_RANGE") {
        config.scan_range_blocks = parse_env("BLOCKS_SCAN_RANGE", &range)?;
    }
    if let Ok(timeout) = std::env::var("RPC_REQUEST_TIMEOUT") {
        config.rpc_timeout_seconds = parse_env("RPC_REQUEST_TIMEOUT", &timeout)?;
    }
    if let Ok(threshold) = std::env::var("RPC_HANG_AVG_BLOCKTIME") {
        config.hang_avg_block_time_seconds = parse_env("RPC_HANG_AVG_BLOCKTIME", &threshold)?;
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| anyhow!("Invalid value '{}' for {}: {}", value, name, e))
}
