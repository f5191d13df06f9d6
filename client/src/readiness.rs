use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapUnavailable {
    #[error("map library did not load after {attempts} attempts")]
    TimedOut { attempts: u32 },
    #[error("map startup was cancelled")]
    Cancelled,
    #[error("map container element is not mounted")]
    MissingContainer,
}

/// Bounded polling schedule: `attempts` re-checks, `interval_ms` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub interval_ms: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Resolve once `probe` yields a value, re-checking after each `sleep`.
///
/// The probe runs once up front, then at most `policy.attempts` more times.
pub async fn wait_until_ready<T, P, S, F>(
    policy: RetryPolicy,
    cancel: &CancelToken,
    mut probe: P,
    mut sleep: S,
) -> Result<T, MapUnavailable>
where
    P: FnMut() -> Option<T>,
    S: FnMut(u32) -> F,
    F: Future<Output = ()>,
{
    if cancel.is_cancelled() {
        return Err(MapUnavailable::Cancelled);
    }
    if let Some(ready) = probe() {
        return Ok(ready);
    }
    for _ in 0..policy.attempts {
        sleep(policy.interval_ms).await;
        if cancel.is_cancelled() {
            return Err(MapUnavailable::Cancelled);
        }
        if let Some(ready) = probe() {
            return Ok(ready);
        }
    }
    Err(MapUnavailable::TimedOut {
        attempts: policy.attempts,
    })
}
