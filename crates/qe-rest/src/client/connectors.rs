use tracing::instrument;

use syndesis_qe_client::security::url::encode_param;

use crate::error::Result;
use crate::model::{Connector, ListResult};

impl super::SyndesisRestClient {
    /// List all connectors.
    #[instrument(skip(self))]
    pub async fn list_connectors(&self) -> Result<Vec<Connector>> {
        let list: ListResult<Connector> = self.client.get_json("connectors").await?;
        Ok(list.items)
    }

    /// Get a connector by id.
    #[instrument(skip(self))]
    pub async fn get_connector(&self, id: &str) -> Result<Connector> {
        let path = format!("connectors/{}", encode_param(id));
        self.client.get_json(&path).await.map_err(Into::into)
    }
}
