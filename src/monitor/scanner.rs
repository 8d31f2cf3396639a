//! Block Range Scanner
//!
//! Fetches a contiguous block range from every endpoint in one batched
//! quorum call. The primary result is the header at the low end of the
//! range, chosen as the max-timestamp response across endpoints (a
//! lagging endpoint can report a stale timestamp for that position).
//! Independently of the primary result, every header seen from any
//! endpoint before the deadline feeds the validator-block tracker, so
//! partial data from a scan that ends in "no answer" is still counted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::quorum::{self, QuorumMode};
use crate::rpc::{BlockHeader, RpcClient};

/// Highest block number observed, across all history, that was mined by
/// the monitored identity. Monotonically non-decreasing; safe against
/// concurrent endpoint completions.
#[derive(Debug, Default)]
pub struct ValidatorBlockTracker {
    latest: AtomicU64,
}

impl ValidatorBlockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a block mined by the monitored identity. Lower numbers than
    /// the current maximum are ignored.
    pub fn record(&self, number: u64) {
        self.latest.fetch_max(number, Ordering::Relaxed);
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::Relaxed)
    }
}

/// Scan the inclusive range `[first, last]` across all endpoints.
/// Returns the header numbered `first`, or `None` if no endpoint
/// supplied it before the deadline.
pub async fn scan_range(
    client: &RpcClient,
    config: &Config,
    tracker: &Arc<ValidatorBlockTracker>,
    first: u64,
    last: u64,
) -> Option<BlockHeader> {
    let requests = config.rpc_urls.iter().map(|endpoint| {
        let client = client.clone();
        let tracker = tracker.clone();
        let mining_address = &config.mining_address;
        async move {
            match client.headers_in_range(endpoint, first, last).await {
                Ok(headers) => {
                    let mut range_first = None;
                    for header in headers {
                        if header.mined_by(mining_address) {
                            tracker.record(header.number);
                        }
                        if header.number == first {
                            range_first = Some(header);
                        }
                    }
                    range_first
                }
                Err(e) => {
                    debug!("Range scan on {} failed: {}", endpoint, e);
                    None
                }
            }
        }
    });

    // The deadline covers the whole batch on every endpoint, not one block.
    quorum::race(
        requests,
        config.rpc_timeout(),
        QuorumMode::AllEndpoints,
        |new, current| new.timestamp > current.timestamp,
    )
    .await
}
