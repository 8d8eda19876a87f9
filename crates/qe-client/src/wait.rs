//! Polling until a condition holds.
//!
//! A supplier produces a fresh value on every attempt (usually a network
//! read) and a predicate decides whether the awaited state was reached.
//! Between attempts the task sleeps for the configured interval.
//!
//! The check sequence is: supply, test, give up once the timeout has elapsed,
//! sleep. The last check is the answer, so a wait that never succeeds makes
//! `ceil(timeout / interval) + 1` supplier calls and a zero timeout makes one.
//!
//! Supplier errors end the wait immediately and are returned to the caller.
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use syndesis_qe_client::wait::{wait_for_event, WaitConfig};
//!
//! let active = wait_for_event(
//!     |status: &String| status == "Activated",
//!     || api.integration_status(&id),
//!     WaitConfig::new(Duration::from_secs(600), Duration::from_secs(10)),
//! )
//! .await?;
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

/// Timeout and interval of a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Total time budget, measured from the first attempt.
    pub timeout: Duration,
    /// Sleep between attempts.
    pub interval: Duration,
}

impl WaitConfig {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            interval: Duration::from_secs(5),
        }
    }
}

/// Poll `supplier` until `predicate` holds or the timeout elapses.
///
/// Returns the first value satisfying the predicate, or `None` on timeout.
pub async fn wait_for_value<T, E, S, Fut, P>(
    mut predicate: P,
    mut supplier: S,
    config: WaitConfig,
) -> Result<Option<T>, E>
where
    S: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: FnMut(&T) -> bool,
{
    let start = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        let value = supplier().await?;
        attempts += 1;
        let elapsed = start.elapsed();

        if predicate(&value) {
            info!(attempts, elapsed_ms = elapsed.as_millis() as u64, "Condition met");
            return Ok(Some(value));
        }

        if elapsed >= config.timeout {
            info!(
                attempts,
                elapsed_ms = elapsed.as_millis() as u64,
                timeout_ms = config.timeout.as_millis() as u64,
                "Condition not met before timeout"
            );
            return Ok(None);
        }

        debug!(
            attempts,
            elapsed_ms = elapsed.as_millis() as u64,
            "Condition not met yet, sleeping"
        );
        tokio::time::sleep(config.interval).await;
    }
}

/// Poll `supplier` until `predicate` holds or the timeout elapses.
///
/// Returns `true` if the predicate was satisfied in time.
pub async fn wait_for_event<T, E, S, Fut, P>(
    predicate: P,
    supplier: S,
    config: WaitConfig,
) -> Result<bool, E>
where
    S: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: FnMut(&T) -> bool,
{
    wait_for_value(predicate, supplier, config)
        .await
        .map(|value| value.is_some())
}
