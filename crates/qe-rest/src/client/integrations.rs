use std::time::Duration;

use tracing::{info, instrument};

use syndesis_qe_client::security::url::encode_param;

use crate::activation::wait_for_activation;
use crate::error::Result;
use crate::model::Integration;

impl super::SyndesisRestClient {
    /// Create an integration. The returned integration carries its id.
    #[instrument(skip(self, integration), fields(name = %integration.name))]
    pub async fn create_integration(&self, integration: &Integration) -> Result<Integration> {
        info!(name = %integration.name, steps = integration.steps.len(), "Creating integration");
        self.client
            .post_json("integrations", integration)
            .await
            .map_err(Into::into)
    }

    /// Get an integration by id.
    #[instrument(skip(self))]
    pub async fn get_integration(&self, id: &str) -> Result<Integration> {
        let path = format!("integrations/{}", encode_param(id));
        self.client.get_json(&path).await.map_err(Into::into)
    }

    /// Poll the integration until it is activated or `timeout` elapses.
    pub async fn wait_for_activation(
        &self,
        integration: &Integration,
        timeout: Duration,
    ) -> Result<bool> {
        wait_for_activation(
            integration,
            |id| async move { self.get_integration(&id).await },
            timeout,
        )
        .await
    }
}
