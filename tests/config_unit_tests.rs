//! Configuration parsing, environment overrides, and validation.
//!
//! Environment variables are process-global, so every test touching them
//! runs serially.

use serial_test::serial;
use std::fs;
use tempfile::TempDir;

use validator_liveness::config::{Config, ConfigManager};

const ENV_VARS: &[&str] = &[
    "RPC",
    "VALIDATOR_SET_ADDRESS",
    "MINING_ADDRESS",
    "LISTEN_HOST",
    "LISTEN_PORT",
    "BLOCKS_SCAN_PERIOD",
    "BLOCKS_SCAN_RANGE",
    "RPC_REQUEST_TIMEOUT",
    "RPC_HANG_AVG_BLOCKTIME",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

fn write_config(dir: &TempDir, content: &str) -> String {
    let config_dir = dir.path().join("config");
    fs::create_dir(&config_dir).unwrap();
    fs::write(config_dir.join("main.toml"), content).unwrap();
    config_dir.to_str().unwrap().to_string()
}

#[test]
fn parse_full_config_file() {
    let main_toml = r#"
host = "127.0.0.1"
port = 9090
rpc_urls = ["https://rpc.example.org/", "https://rpc-backup.example.org/"]
validator_set_address = "0xB87BE9f7196F2AE084Ca1DE6af5264292976e013"
mining_address = "0x1a740616e96E07d86203707C1619d9871614922A"
scan_period_seconds = 60
scan_range_blocks = 50
rpc_timeout_seconds = 5
hang_avg_block_time_seconds = 6.5
    "#;

    let config: Config = toml::from_str(main_toml).unwrap();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9090);
    assert_eq!(config.rpc_urls.len(), 2);
    assert_eq!(config.scan_period_seconds, 60);
    assert_eq!(config.scan_range_blocks, 50);
    assert_eq!(config.rpc_timeout_seconds, 5);
    assert_eq!(config.hang_avg_block_time_seconds, 6.5);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_config_file_falls_back_to_defaults() {
    let config: Config = toml::from_str(
        r#"
rpc_urls = ["https://rpc.example.org/"]
validator_set_address = "0xB87BE9f7196F2AE084Ca1DE6af5264292976e013"
mining_address = "0x1a740616e96E07d86203707C1619d9871614922A"
    "#,
    )
    .unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);
    assert_eq!(config.scan_period_seconds, 100);
    assert_eq!(config.scan_range_blocks, 100);
    assert_eq!(config.rpc_timeout_seconds, 10);
    assert_eq!(config.hang_avg_block_time_seconds, 8.0);
}

#[tokio::test]
#[serial]
async fn env_variables_override_the_file() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let config_dir = write_config(
        &dir,
        r#"
rpc_urls = ["https://stale.example.org/"]
validator_set_address = "0xB87BE9f7196F2AE084Ca1DE6af5264292976e013"
mining_address = "0x1a740616e96E07d86203707C1619d9871614922A"
scan_period_seconds = 60
    "#,
    );

    std::env::set_var("RPC", " https://one.example.org/ , https://two.example.org/ ");
    std::env::set_var("BLOCKS_SCAN_PERIOD", "30");

    let manager = ConfigManager::new(&config_dir).await.unwrap();
    let config = manager.get_current_config();

    assert_eq!(
        config.rpc_urls,
        vec![
            "https://one.example.org/".to_string(),
            "https://two.example.org/".to_string()
        ]
    );
    assert_eq!(config.scan_period_seconds, 30);
    clear_env();
}

#[tokio::test]
#[serial]
async fn env_only_configuration_works_without_a_file() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let empty_dir = dir.path().to_str().unwrap().to_string();

    std::env::set_var("RPC", "https://rpc.example.org/");
    std::env::set_var(
        "VALIDATOR_SET_ADDRESS",
        "0xB87BE9f7196F2AE084Ca1DE6af5264292976e013",
    );
    std::env::set_var(
        "MINING_ADDRESS",
        "0x1a740616e96E07d86203707C1619d9871614922A",
    );

    let manager = ConfigManager::new(&empty_dir).await.unwrap();
    let config = manager.get_current_config();

    assert_eq!(config.rpc_urls.len(), 1);
    assert_eq!(config.scan_range_blocks, 100);
    clear_env();
}

#[tokio::test]
#[serial]
async fn missing_endpoints_fail_validation() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let config_dir = write_config(
        &dir,
        r#"
validator_set_address = "0xB87BE9f7196F2AE084Ca1DE6af5264292976e013"
mining_address = "0x1a740616e96E07d86203707C1619d9871614922A"
    "#,
    );

    let result = ConfigManager::new(&config_dir).await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("rpc_urls"));
}

#[rstest::rstest]
#[case("not-an-address")]
#[case("0x123")]
#[case("B87BE9f7196F2AE084Ca1DE6af5264292976e013")]
#[case("0xZZ7BE9f7196F2AE084Ca1DE6af5264292976e013")]
fn malformed_addresses_fail_validation(#[case] address: &str) {
    let config = Config {
        rpc_urls: vec!["https://rpc.example.org/".to_string()],
        validator_set_address: address.to_string(),
        mining_address: "0x1a740616e96E07d86203707C1619d9871614922A".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn zero_tunables_fail_validation() {
    let config = Config {
        rpc_urls: vec!["https://rpc.example.org/".to_string()],
        validator_set_address: "0xB87BE9f7196F2AE084Ca1DE6af5264292976e013".to_string(),
        mining_address: "0x1a740616e96E07d86203707C1619d9871614922A".to_string(),
        scan_range_blocks: 0,
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn non_http_endpoint_fails_validation() {
    let config = Config {
        rpc_urls: vec!["ws://rpc.example.org/".to_string()],
        validator_set_address: "0xB87BE9f7196F2AE084Ca1DE6af5264292976e013".to_string(),
        mining_address: "0x1a740616e96E07d86203707C1619d9871614922A".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}
