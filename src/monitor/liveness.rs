//! Liveness State Machine
//!
//! Orchestrates one polling cycle: fetch the latest header, decide
//! whether to scan, compute the average block time, check validator
//! status, and publish the next verdict. Every failure mode inside a
//! cycle degrades to an unhealthy verdict and "try again next cycle";
//! the timer loop is the sole recovery mechanism.

use anyhow::Result;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::scanner::{self, ValidatorBlockTracker};
use super::validator;
use crate::config::Config;
use crate::health::HealthState;
use crate::quorum::{self, QuorumMode};
use crate::rpc::{BlockHeader, RpcClient};

/// Mutable cycle state, owned exclusively by the monitor task and alive
/// for the process lifetime. Never persisted.
#[derive(Debug, Default)]
pub struct CycleState {
    /// Anchor of the very first successful cycle; set once, never overwritten
    pub very_first_known_block: Option<BlockHeader>,
    /// The two headers bounding the last accepted rate computation;
    /// whenever both are set, `latest` is strictly ahead of `prev`
    pub prev_known_block: Option<BlockHeader>,
    pub latest_known_block: Option<BlockHeader>,
}

pub struct LivenessMonitor {
    config: Arc<Config>,
    client: RpcClient,
    health: Arc<HealthState>,
    validator_blocks: Arc<ValidatorBlockTracker>,
    state: CycleState,
}

impl LivenessMonitor {
    pub fn new(config: Arc<Config>, health: Arc<HealthState>) -> Result<Self> {
        let client = RpcClient::new(config.rpc_timeout())?;
        Ok(Self {
            config,
            client,
            health,
            validator_blocks: Arc::new(ValidatorBlockTracker::new()),
            state: CycleState::default(),
        })
    }

    /// Timer loop: one cycle, then a fixed delay, forever. Cycles never
    /// overlap.
    pub async fn run(mut self) {
        info!(
            "Liveness monitor started: {} endpoints, {}s cycle period, {}-block scan range",
            self.config.rpc_urls.len(),
            self.config.scan_period_seconds,
            self.config.scan_range_blocks
        );
        loop {
            self.run_cycle().await;
            sleep(self.config.scan_period()).await;
        }
    }

    /// Execute one full cycle and publish the verdict. The publish is the
    /// last action of the cycle; until it happens, external readers keep
    /// seeing the previous verdict.
    pub async fn run_cycle(&mut self) {
        let verdict = self.evaluate().await;
        if verdict != self.health.is_healthy() {
            info!(
                "Verdict changed: {} -> {}",
                label(self.health.is_healthy()),
                label(verdict)
            );
        }
        self.health.publish(verdict).await;
    }

    async fn evaluate(&mut self) -> bool {
        // Fail-safe default: no observable latest block means unhealthy.
        let Some(latest) = self.fetch_latest_header().await else {
            warn!("No endpoint supplied a latest block before the deadline");
            return false;
        };
        debug!(
            "Latest block {} at timestamp {} from quorum",
            latest.number, latest.timestamp
        );

        // Too early in the chain to judge, or growth implausibly slow.
        if latest.number <= self.config.scan_range_blocks {
            warn!(
                "Chain height {} is within the scan range, skipping analysis",
                latest.number
            );
            return false;
        }
        if let Some(known) = &self.state.latest_known_block {
            if latest.number < known.number + 2 {
                warn!(
                    "Chain advanced from {} to only {} since last cycle",
                    known.number, latest.number
                );
                return false;
            }
        }

        let Some(is_validator) = validator::check_validator(&self.client, &self.config).await
        else {
            warn!("No endpoint answered the validator check before the deadline");
            return false;
        };
        debug!("Validator check answered: {}", is_validator);

        // Continue from where the previous successful cycle stopped, or
        // scan the most recent window on the first successful cycle.
        let first_number = match (&self.state.prev_known_block, &self.state.latest_known_block) {
            (Some(_), Some(known)) => known.number + 1,
            _ => latest.number - self.config.scan_range_blocks,
        };
        let last_number = latest.number - 1;

        let Some(first_block) = scanner::scan_range(
            &self.client,
            &self.config,
            &self.validator_blocks,
            first_number,
            last_number,
        )
        .await
        else {
            warn!(
                "Scan of blocks [{}, {}] produced no answer before the deadline",
                first_number, last_number
            );
            return false;
        };

        let prev = match (&self.state.prev_known_block, &self.state.latest_known_block) {
            (Some(_), Some(known)) => known.clone(),
            _ => first_block,
        };

        let avg_block_time = (latest.timestamp as f64 - prev.timestamp as f64)
            / (latest.number as f64 - prev.number as f64);
        debug!(
            "Average block time {:.2}s over blocks {}..{}",
            avg_block_time, prev.number, latest.number
        );

        if avg_block_time > self.config.hang_avg_block_time_seconds {
            // Suspected stale/delayed data from the backends. Do not
            // advance the anchors: the next cycle recomputes from the
            // same baseline and recovers automatically once data is fresh.
            warn!(
                "Average block time {:.2}s exceeds hang threshold {:.2}s",
                avg_block_time, self.config.hang_avg_block_time_seconds
            );
            return false;
        }

        self.state.prev_known_block = Some(prev.clone());
        self.state.latest_known_block = Some(latest.clone());
        if self.state.very_first_known_block.is_none() {
            self.state.very_first_known_block = Some(prev);
        }

        // Healthy only when no self-mined block was observed within the
        // scan window: this judges whether the RPC view of recent
        // validator-authored blocks is stale, not whether the validator
        // produces blocks.
        let gap = latest.number.saturating_sub(self.validator_blocks.latest());
        let healthy = gap > self.config.scan_range_blocks
            && self.state.very_first_known_block.is_some()
            && is_validator;
        debug!(
            "Verdict inputs: gap={}, validator={}, anchored={}",
            gap,
            is_validator,
            self.state.very_first_known_block.is_some()
        );
        healthy
    }

    async fn fetch_latest_header(&self) -> Option<BlockHeader> {
        let requests = self.config.rpc_urls.iter().map(|endpoint| {
            let client = self.client.clone();
            async move {
                match client.latest_header(endpoint).await {
                    Ok(header) => Some(header),
                    Err(e) => {
                        debug!("Latest-block fetch on {} failed: {}", endpoint, e);
                        None
                    }
                }
            }
        });

        quorum::race(
            requests,
            self.config.rpc_timeout(),
            QuorumMode::AllEndpoints,
            |new, current| new.number > current.number,
        )
        .await
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    /// Highest self-mined block number observed so far
    pub fn last_validator_block_number(&self) -> u64 {
        self.validator_blocks.latest()
    }
}

fn label(healthy: bool) -> &'static str {
    if healthy {
        "healthy"
    } else {
        "unhealthy"
    }
}
