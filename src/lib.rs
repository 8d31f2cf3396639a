pub mod config;
pub mod constants;
pub mod errors;
pub mod health;
pub mod monitor;
pub mod quorum;
pub mod rpc;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigManager};
pub use health::HealthState;
pub use monitor::{CycleState, LivenessMonitor};
pub use rpc::{BlockHeader, RpcClient};
