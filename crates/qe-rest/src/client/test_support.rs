use tracing::{info, instrument};

use crate::error::Result;

impl super::SyndesisRestClient {
    /// Drop all connections and integrations and restore the default data.
    ///
    /// Test-support endpoint; only enabled on test deployments.
    #[instrument(skip(self))]
    pub async fn reset_database(&self) -> Result<()> {
        info!("Resetting Syndesis database");
        let request = self.client.get("test-support/reset-db");
        self.client.execute(request).await?;
        Ok(())
    }
}
