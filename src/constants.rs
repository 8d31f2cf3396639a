//! Default tunables for the liveness monitor.
//!
//! Every value here can be overridden through the configuration file or
//! the corresponding environment variable (see `config`).

/// Defaults for the polling engine
pub mod defaults {
    /// Address the health endpoint binds to
    pub const LISTEN_HOST: &str = "0.0.0.0";

    /// Port the health endpoint binds to
    pub const LISTEN_PORT: u16 = 8080;

    /// Delay between polling cycles, in seconds
    pub const SCAN_PERIOD_SECONDS: u64 = 100;

    /// How many recent blocks the first cycle scans, and the staleness
    /// window for the verdict condition, in blocks
    pub const SCAN_RANGE_BLOCKS: u64 = 100;

    /// Soft deadline for one quorum call across all endpoints, in seconds
    pub const RPC_TIMEOUT_SECONDS: u64 = 10;

    /// Average block time above which the RPC backends are suspected of
    /// serving stale data, in seconds
    pub const HANG_AVG_BLOCK_TIME_SECONDS: f64 = 8.0;
}

/// Contract ABI constants
pub mod abi {
    /// 4-byte selector of `isValidator(address)` on the validator-set contract
    pub const IS_VALIDATOR_SELECTOR: &str = "facd743b";
}
