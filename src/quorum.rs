//! Quorum Call: racing one request across every configured endpoint
//! under a single soft deadline.
//!
//! Each endpoint's request runs concurrently; completions are folded into
//! a best-so-far answer with a request-specific reducer as they arrive.
//! The reducer must be order-independent (max-by-number, max-by-timestamp,
//! keep-first), so the result does not depend on which endpoint answers
//! first. When the deadline fires, every still-pending request is dropped,
//! which is what guarantees a late response can never mutate an answer
//! that has already been returned.
//!
//! Endpoint failures are an expected condition here: they surface as
//! `None` completions and are excluded from consideration. Only the case
//! where no endpoint produced a value before the deadline yields the
//! overall "no answer" (`None`) result.

use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// When a quorum call considers itself complete (short of the deadline)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuorumMode {
    /// Wait for every endpoint, keep the best answer seen
    AllEndpoints,
    /// Return as soon as any endpoint produces an answer
    FirstAnswer,
}

/// Race `requests` under `deadline`. `better(new, current)` decides
/// whether a newly arrived answer replaces the current best; the first
/// answer is always kept.
pub async fn race<T, F, Fut, I>(
    requests: I,
    deadline: Duration,
    mode: QuorumMode,
    better: F,
) -> Option<T>
where
    I: IntoIterator<Item = Fut>,
    Fut: Future<Output = Option<T>>,
    F: Fn(&T, &T) -> bool,
{
    let mut pending: FuturesUnordered<Fut> = requests.into_iter().collect();
    let total = pending.len();
    let mut completed = 0usize;
    let mut best: Option<T> = None;

    let collect = async {
        while let Some(outcome) = pending.next().await {
            completed += 1;
            let Some(value) = outcome else {
                continue;
            };
            match best.as_ref() {
                Some(current) if !better(&value, current) => {}
                _ => best = Some(value),
            }
            if mode == QuorumMode::FirstAnswer {
                break;
            }
        }
    };

    let finished = timeout(deadline, collect).await;
    if finished.is_err() {
        debug!(
            "Quorum deadline elapsed after {}/{} endpoint completions",
            completed, total
        );
    }

    best
}
