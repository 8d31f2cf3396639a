use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use validator_liveness::config::ConfigManager;
use validator_liveness::health::HealthState;
use validator_liveness::monitor::LivenessMonitor;
use validator_liveness::web::start_web_server;

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("validator_liveness=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting validator liveness monitor");

    let config_manager = ConfigManager::new("config").await?;
    let config = config_manager.get_current_config();
    info!(
        "Configuration loaded: {} RPC endpoints, validator set {}, mining address {}",
        config.rpc_urls.len(),
        config.validator_set_address,
        config.mining_address
    );

    let health = Arc::new(HealthState::new());

    let monitor = LivenessMonitor::new(config.clone(), health.clone())?;
    tokio::spawn(monitor.run());

    start_web_server(config, health).await?;

    Ok(())
}
