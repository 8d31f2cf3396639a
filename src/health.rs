//! Health Publisher
//!
//! Holds the current verdict for external status queries. The monitor
//! task is the only writer; the web handlers only read. The verdict is
//! published once per cycle, so readers never observe a mid-cycle
//! "unknown" state.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

pub struct HealthState {
    healthy: AtomicBool,
    last_check: RwLock<Option<DateTime<Utc>>>,
}

/// Point-in-time view of the published verdict
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthSnapshot {
    pub healthy: bool,
    pub last_check: Option<DateTime<Utc>>,
}

impl HealthState {
    /// Optimistic initial verdict: healthy until first negative evidence
    pub fn new() -> Self {
        Self {
            healthy: AtomicBool::new(true),
            last_check: RwLock::new(None),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Relaxed)
    }

    pub async fn publish(&self, verdict: bool) {
        self.healthy.store(verdict, Ordering::Relaxed);
        *self.last_check.write().await = Some(Utc::now());
    }

    pub async fn snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            healthy: self.is_healthy(),
            last_check: *self.last_check.read().await,
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}
