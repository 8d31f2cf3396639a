pub mod manager;

pub use manager::ConfigManager;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::defaults;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Listen address for the health endpoint
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    /// Ordered list of redundant JSON-RPC endpoint URLs
    #[serde(default)]
    pub rpc_urls: Vec<String>,

    /// Address of the validator-set contract
    #[serde(default)]
    pub validator_set_address: String,

    /// Mining address of the monitored validator
    #[serde(default)]
    pub mining_address: String,

    /// Delay between polling cycles, in seconds
    #[serde(default = "default_scan_period")]
    pub scan_period_seconds: u64,

    /// Scan window, in blocks
    #[serde(default = "default_scan_range")]
    pub scan_range_blocks: u64,

    /// Soft deadline for one quorum call, in seconds
    #[serde(default = "default_rpc_timeout")]
    pub rpc_timeout_seconds: u64,

    /// Hang-detection threshold on the observed average block time, in seconds
    #[serde(default = "default_hang_avg_block_time")]
    pub hang_avg_block_time_seconds: f64,
}

fn default_host() -> String {
    defaults::LISTEN_HOST.to_string()
}

fn default_port() -> u16 {
    defaults::LISTEN_PORT
}

fn default_scan_period() -> u64 {
    defaults::SCAN_PERIOD_SECONDS
}

fn default_scan_range() -> u64 {
    defaults::SCAN_RANGE_BLOCKS
}

fn default_rpc_timeout() -> u64 {
    defaults::RPC_TIMEOUT_SECONDS
}

fn default_hang_avg_block_time() -> f64 {
    defaults::HANG_AVG_BLOCK_TIME_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            rpc_urls: Vec::new(),
            validator_set_address: String::new(),
            mining_address: String::new(),
            scan_period_seconds: default_scan_period(),
            scan_range_blocks: default_scan_range(),
            rpc_timeout_seconds: default_rpc_timeout(),
            hang_avg_block_time_seconds: default_hang_avg_block_time(),
        }
    }
}

impl Config {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_seconds)
    }

    pub fn scan_period(&self) -> Duration {
        Duration::from_secs(self.scan_period_seconds)
    }

    /// Validate the fully-assembled configuration. Malformed static
    /// configuration is the only fatal error path in the service.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc_urls.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "rpc_urls".to_string(),
            });
        }
        for url in &self.rpc_urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    field: "rpc_urls".to_string(),
                    reason: format!("'{}' is not an http(s) URL", url),
                });
            }
        }
        validate_address("validator_set_address", &self.validator_set_address)?;
        validate_address("mining_address", &self.mining_address)?;
        if self.scan_period_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scan_period_seconds".to_string(),
                reason: "must be nonzero".to_string(),
            });
        }
        if self.scan_range_blocks == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scan_range_blocks".to_string(),
                reason: "must be nonzero".to_string(),
            });
        }
        if self.rpc_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rpc_timeout_seconds".to_string(),
                reason: "must be nonzero".to_string(),
            });
        }
        Ok(())
    }
}

fn validate_address(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::MissingRequired {
            field: field.to_string(),
        });
    }
    let hex = value.strip_prefix("0x").unwrap_or(value);
    if value.len() != 42 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("'{}' is not a 0x-prefixed 20-byte hex address", value),
        });
    }
    Ok(())
}
