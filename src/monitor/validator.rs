//! Validator Check
//!
//! Asks whether the configured mining address currently holds
//! active-validator status, racing all endpoints in first-answer mode:
//! the first non-error response wins, including `false` (one endpoint
//! saying "not a validator" needs no confirmation). `None` means the
//! deadline elapsed with no successful response and is distinct from
//! `false`.

use tracing::debug;

use crate::config::Config;
use crate::quorum::{self, QuorumMode};
use crate::rpc::RpcClient;

pub async fn check_validator(client: &RpcClient, config: &Config) -> Option<bool> {
    let requests = config.rpc_urls.iter().map(|endpoint| {
        let client = client.clone();
        let validator_set = &config.validator_set_address;
        let mining = &config.mining_address;
        async move {
            match client.is_validator(endpoint, validator_set, mining).await {
                Ok(flag) => Some(flag),
                Err(e) => {
                    debug!("Validator check on {} failed: {}", endpoint, e);
                    None
                }
            }
        }
    });

    // Keep-first reducer: the race stops on the first answer anyway.
    quorum::race(
        requests,
        config.rpc_timeout(),
        QuorumMode::FirstAnswer,
        |_new, _current| false,
    )
    .await
}
