//! Services the scenario talks to.
//!
//! The orchestrator only sees these traits. They are implemented for the
//! real clients here and for in-memory fakes in tests.

use std::future::Future;

use syndesis_qe_github::GitHubClient;
use syndesis_qe_rest::{Connection, Connector, Integration, SyndesisRestClient};
use syndesis_qe_salesforce::{Contact, SalesforceClient};
use syndesis_qe_twitter::{Status, TwitterClient};

use crate::error::Result;

/// The platform's management API.
pub trait ManagementApi: Send + Sync {
    fn list_connectors(&self) -> impl Future<Output = Result<Vec<Connector>>> + Send;

    fn get_connector(&self, id: &str) -> impl Future<Output = Result<Connector>> + Send;

    fn create_connection(
        &self,
        connection: &Connection,
    ) -> impl Future<Output = Result<Connection>> + Send;

    fn get_connection(&self, id: &str) -> impl Future<Output = Result<Connection>> + Send;

    fn create_integration(
        &self,
        integration: &Integration,
    ) -> impl Future<Output = Result<Integration>> + Send;

    fn get_integration(&self, id: &str) -> impl Future<Output = Result<Integration>> + Send;

    /// Drop every connection and integration the platform knows.
    fn reset_database(&self) -> impl Future<Output = Result<()>> + Send;
}

/// A social network account that posts the triggering message.
pub trait SocialProvider: Send + Sync {
    /// Handle of the account this provider acts as.
    fn screen_name(&self) -> &str;

    fn post_message(&self, text: &str) -> impl Future<Output = Result<Status>> + Send;

    fn list_recent_messages(
        &self,
        screen_name: &str,
    ) -> impl Future<Output = Result<Vec<Status>>> + Send;

    fn delete_message(&self, id: u64) -> impl Future<Output = Result<()>> + Send;
}

/// The CRM the integration writes contacts into.
pub trait CrmProvider: Send + Sync {
    fn query_contacts(&self, soql: &str) -> impl Future<Output = Result<Vec<Contact>>> + Send;

    fn delete_record(&self, sobject: &str, id: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Hosting of the repositories the platform creates for integrations.
pub trait SourceControl: Send + Sync {
    /// Delete `owner/name`. Returns `false` when it did not exist.
    fn delete_repository(&self, full_name: &str) -> impl Future<Output = Result<bool>> + Send;
}

/// The contact created for a Twitter screen name, if any.
pub async fn find_contact<C: CrmProvider>(crm: &C, screen_name: &str) -> Result<Option<Contact>> {
    let soql = Contact::by_twitter_screen_name(screen_name);
    Ok(crm.query_contacts(&soql).await?.into_iter().next())
}

impl ManagementApi for SyndesisRestClient {
    async fn list_connectors(&self) -> Result<Vec<Connector>> {
        Ok(SyndesisRestClient::list_connectors(self).await?)
    }

    async fn get_connector(&self, id: &str) -> Result<Connector> {
        Ok(SyndesisRestClient::get_connector(self, id).await?)
    }

    async fn create_connection(&self, connection: &Connection) -> Result<Connection> {
        Ok(SyndesisRestClient::create_connection(self, connection).await?)
    }

    async fn get_connection(&self, id: &str) -> Result<Connection> {
        Ok(SyndesisRestClient::get_connection(self, id).await?)
    }

    async fn create_integration(&self, integration: &Integration) -> Result<Integration> {
        Ok(SyndesisRestClient::create_integration(self, integration).await?)
    }

    async fn get_integration(&self, id: &str) -> Result<Integration> {
        Ok(SyndesisRestClient::get_integration(self, id).await?)
    }

    async fn reset_database(&self) -> Result<()> {
        Ok(SyndesisRestClient::reset_database(self).await?)
    }
}

impl SocialProvider for TwitterClient {
    fn screen_name(&self) -> &str {
        TwitterClient::screen_name(self)
    }

    async fn post_message(&self, text: &str) -> Result<Status> {
        Ok(self.update_status(text).await?)
    }

    async fn list_recent_messages(&self, screen_name: &str) -> Result<Vec<Status>> {
        Ok(self.user_timeline(screen_name).await?)
    }

    async fn delete_message(&self, id: u64) -> Result<()> {
        self.destroy_status(id).await?;
        Ok(())
    }
}

impl CrmProvider for SalesforceClient {
    async fn query_contacts(&self, soql: &str) -> Result<Vec<Contact>> {
        Ok(self.query_all(soql).await?)
    }

    async fn delete_record(&self, sobject: &str, id: &str) -> Result<()> {
        Ok(self.delete(sobject, id).await?)
    }
}

impl SourceControl for GitHubClient {
    async fn delete_repository(&self, full_name: &str) -> Result<bool> {
        Ok(GitHubClient::delete_repository(self, full_name).await?)
    }
}
