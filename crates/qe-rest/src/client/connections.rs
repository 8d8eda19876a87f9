use tracing::{info, instrument};

use syndesis_qe_client::security::url::encode_param;

use crate::error::Result;
use crate::model::Connection;

impl super::SyndesisRestClient {
    /// Create a connection. Returns the connection as stored by the server.
    #[instrument(skip(self, connection), fields(name = %connection.name))]
    pub async fn create_connection(&self, connection: &Connection) -> Result<Connection> {
        info!(name = %connection.name, "Creating connection");
        self.client
            .post_json("connections", connection)
            .await
            .map_err(Into::into)
    }

    /// Get a connection by id.
    #[instrument(skip(self))]
    pub async fn get_connection(&self, id: &str) -> Result<Connection> {
        let path = format!("connections/{}", encode_param(id));
        self.client.get_json(&path).await.map_err(Into::into)
    }
}
