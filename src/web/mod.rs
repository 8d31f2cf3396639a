pub mod handlers;
pub mod server;

pub use server::start_web_server;

use std::sync::Arc;

use crate::config::Config;
use crate::health::HealthState;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub health: Arc<HealthState>,
}

impl AppState {
    pub fn new(config: Arc<Config>, health: Arc<HealthState>) -> Self {
        Self { config, health }
    }
}
