//! Waiting for an integration to be deployed.

use std::future::Future;
use std::time::Duration;

use tracing::info;

use syndesis_qe_client::wait::{wait_for_event, WaitConfig};

use crate::error::{Error, ErrorKind};
use crate::model::Integration;

/// Interval between status checks while waiting for activation.
pub const ACTIVATION_INTERVAL: Duration = Duration::from_secs(10);

/// Poll an integration until its current status is `Activated`.
///
/// `fetch` receives the integration id and returns the server's current view
/// of it. A missing current status counts as `Pending`. Returns `Ok(false)`
/// when `timeout` elapses first.
///
/// Generic over the error type so callers that fetch through their own
/// abstraction can reuse it.
pub async fn wait_for_activation<F, Fut, E>(
    integration: &Integration,
    mut fetch: F,
    timeout: Duration,
) -> Result<bool, E>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Integration, E>>,
    E: From<Error>,
{
    let id = integration.id.clone().ok_or_else(|| {
        Error::new(ErrorKind::Config(format!(
            "integration '{}' has no id",
            integration.name
        )))
    })?;

    info!(
        integration = %id,
        timeout_secs = timeout.as_secs(),
        "Waiting until integration becomes active"
    );

    wait_for_event(
        |current: &Integration| current.is_activated(),
        || fetch(id.clone()),
        WaitConfig::new(timeout, ACTIVATION_INTERVAL),
    )
    .await
}
