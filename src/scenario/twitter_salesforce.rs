//! Twitter mention to Salesforce contact.
//!
//! Creates a Twitter and a Salesforce connection, deploys an integration
//! that maps mentions of the listening account onto contacts, tweets from
//! a second account and waits for the contact to appear. External state
//! owned by the test is reset before and after.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, instrument, warn};

use syndesis_qe_accounts::{GITHUB, SALESFORCE, TWITTER_LISTEN};
use syndesis_qe_client::wait::{wait_for_value, WaitConfig};
use syndesis_qe_rest::{
    wait_for_activation, Connection, Connector, Integration, IntegrationStatus, Names, Step,
};
use syndesis_qe_salesforce::Contact;

use crate::collaborators::{find_contact, CrmProvider, ManagementApi, SocialProvider, SourceControl};
use crate::context::QeContext;
use crate::error::{Error, ErrorKind, Result};

const TWITTER_PROPERTIES: &[&str] = &["accessToken", "accessTokenSecret", "consumerKey", "consumerSecret"];

const SALESFORCE_PROPERTIES: &[&str] = &[
    "clientId",
    "clientSecret",
    "instanceUrl",
    "loginUrl",
    "userName",
    "password",
];

/// Scenario parameters.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub twitter_connector_id: String,
    pub salesforce_connector_id: String,
    pub twitter_connection_id: String,
    pub twitter_connection_name: String,
    pub salesforce_connection_id: String,
    pub salesforce_connection_name: String,
    /// Camel connector prefix of the Twitter action.
    pub mention_action: String,
    /// Camel connector prefix of the Salesforce action.
    pub upsert_action: String,
    pub integration_name: String,
    /// Text of the tweet, followed by ` @<listening screen name>`.
    pub message_prefix: String,
    pub activation_timeout: Duration,
    pub effect_timeout: Duration,
    pub effect_interval: Duration,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            twitter_connector_id: "twitter".to_string(),
            salesforce_connector_id: "salesforce".to_string(),
            twitter_connection_id: "fuseqe-twitter".to_string(),
            twitter_connection_name: "Fuse QE twitter listen".to_string(),
            salesforce_connection_id: "fuseqe-salesforce".to_string(),
            salesforce_connection_name: "Fuse QE salesforce".to_string(),
            mention_action: "twitter-mention".to_string(),
            upsert_action: "salesforce-upsert-contact".to_string(),
            integration_name: "Twitter to salesforce contact rest test".to_string(),
            message_prefix: "Have you heard about Syndesis project? It is pretty amazing...".to_string(),
            activation_timeout: Duration::from_secs(10 * 60),
            effect_timeout: Duration::from_secs(2 * 60),
            effect_interval: Duration::from_secs(5),
        }
    }
}

impl ScenarioConfig {
    pub fn builder() -> ScenarioConfigBuilder {
        ScenarioConfigBuilder::default()
    }
}

/// Builder for [`ScenarioConfig`].
#[derive(Debug, Default)]
pub struct ScenarioConfigBuilder {
    config: ScenarioConfig,
}

impl ScenarioConfigBuilder {
    pub fn with_integration_name(mut self, name: impl Into<String>) -> Self {
        self.config.integration_name = name.into();
        self
    }

    pub fn with_message_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.message_prefix = prefix.into();
        self
    }

    pub fn with_activation_timeout(mut self, timeout: Duration) -> Self {
        self.config.activation_timeout = timeout;
        self
    }

    pub fn with_effect_timeout(mut self, timeout: Duration) -> Self {
        self.config.effect_timeout = timeout;
        self
    }

    pub fn with_effect_interval(mut self, interval: Duration) -> Self {
        self.config.effect_interval = interval;
        self
    }

    pub fn with_connector_ids(mut self, twitter: impl Into<String>, salesforce: impl Into<String>) -> Self {
        self.config.twitter_connector_id = twitter.into();
        self.config.salesforce_connector_id = salesforce.into();
        self
    }

    pub fn with_actions(mut self, mention: impl Into<String>, upsert: impl Into<String>) -> Self {
        self.config.mention_action = mention.into();
        self.config.upsert_action = upsert.into();
        self
    }

    pub fn build(self) -> ScenarioConfig {
        self.config
    }
}

/// Progress of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioState {
    Init,
    ConnectionsCreated,
    IntegrationSubmitted,
    IntegrationActive,
    ActionTriggered,
    EffectVerified,
    CleanedUp,
}

impl std::fmt::Display for ScenarioState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Init => "INIT",
            Self::ConnectionsCreated => "CONNECTIONS_CREATED",
            Self::IntegrationSubmitted => "INTEGRATION_SUBMITTED",
            Self::IntegrationActive => "INTEGRATION_ACTIVE",
            Self::ActionTriggered => "ACTION_TRIGGERED",
            Self::EffectVerified => "EFFECT_VERIFIED",
            Self::CleanedUp => "CLEANED_UP",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub integration_id: String,
    /// Text of the triggering tweet.
    pub message: String,
    pub contact: Contact,
    /// Time from submission until the integration was active.
    pub activation_time: Duration,
    /// Time from the tweet until the contact was found.
    pub effect_time: Duration,
    pub final_state: ScenarioState,
}

/// The Twitter to Salesforce scenario over a [`QeContext`].
pub struct TwitterSalesforceScenario<'a, M, S, C, G> {
    ctx: &'a QeContext<M, S, C, G>,
    config: ScenarioConfig,
    state: ScenarioState,
}

impl<'a, M, S, C, G> TwitterSalesforceScenario<'a, M, S, C, G>
where
    M: ManagementApi,
    S: SocialProvider,
    C: CrmProvider,
    G: SourceControl,
{
    pub fn new(ctx: &'a QeContext<M, S, C, G>, config: ScenarioConfig) -> Self {
        Self {
            ctx,
            config,
            state: ScenarioState::Init,
        }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn state(&self) -> ScenarioState {
        self.state
    }

    fn advance(&mut self, next: ScenarioState) {
        info!(from = %self.state, to = %next, "Scenario state change");
        self.state = next;
    }

    /// Run the scenario with cleanup before and after.
    ///
    /// Cleanup after the body always runs. A failing body wins over a
    /// failing cleanup, which is then only logged.
    #[instrument(skip(self), fields(integration = %self.config.integration_name))]
    pub async fn run(&mut self) -> Result<ScenarioReport> {
        self.cleanup().await?;

        let outcome = self.execute().await;
        let cleanup = self.cleanup().await;

        match (outcome, cleanup) {
            (Ok(mut report), Ok(())) => {
                self.advance(ScenarioState::CleanedUp);
                report.final_state = self.state;
                Ok(report)
            }
            (Ok(_), Err(err)) => Err(err),
            (Err(err), Ok(())) => {
                self.advance(ScenarioState::CleanedUp);
                Err(err)
            }
            (Err(err), Err(cleanup_err)) => {
                warn!(error = %cleanup_err, "Cleanup after failed run failed too");
                Err(err)
            }
        }
    }

    async fn execute(&mut self) -> Result<ScenarioReport> {
        let ctx = self.ctx;

        let connectors = ctx.management.list_connectors().await?;
        let twitter = self.connector(&connectors, &self.config.twitter_connector_id)?;
        let salesforce = self.connector(&connectors, &self.config.salesforce_connector_id)?;

        self.create_connection(
            twitter,
            &self.config.twitter_connection_id,
            &self.config.twitter_connection_name,
            TWITTER_LISTEN,
            TWITTER_PROPERTIES,
        )
        .await?;
        self.create_connection(
            salesforce,
            &self.config.salesforce_connection_id,
            &self.config.salesforce_connection_name,
            SALESFORCE,
            SALESFORCE_PROPERTIES,
        )
        .await?;
        self.advance(ScenarioState::ConnectionsCreated);

        let integration = self.submit_integration(twitter, salesforce).await?;
        let integration_id = integration.id.clone().unwrap_or_default();
        self.advance(ScenarioState::IntegrationSubmitted);

        let activation_time = self.await_activation(&integration).await?;
        self.advance(ScenarioState::IntegrationActive);

        let talky = ctx.social.screen_name();
        if let Some(contact) = find_contact(&ctx.crm, talky).await? {
            return Err(Error::new(ErrorKind::PreconditionFailed(format!(
                "contact {} for '{talky}' exists before the tweet",
                contact.id
            ))));
        }

        let listen = ctx.accounts.account(TWITTER_LISTEN)?.property("screenName")?;
        let message = format!("{} @{listen}", self.config.message_prefix);
        let status = ctx.social.post_message(&message).await?;
        info!(status = status.id, "Tweet sent");
        self.advance(ScenarioState::ActionTriggered);

        let (contact, effect_time) = self.await_contact(talky).await?;
        verify_contact(&contact, &message)?;
        self.advance(ScenarioState::EffectVerified);

        Ok(ScenarioReport {
            integration_id,
            message,
            contact,
            activation_time,
            effect_time,
            final_state: self.state,
        })
    }

    fn connector<'c>(&self, connectors: &'c [Connector], id: &str) -> Result<&'c Connector> {
        connectors
            .iter()
            .find(|connector| connector.id == id)
            .ok_or_else(|| Error::new(ErrorKind::ConnectorNotFound(id.to_string())))
    }

    async fn create_connection(
        &self,
        connector: &Connector,
        id: &str,
        name: &str,
        account: &str,
        keys: &[&str],
    ) -> Result<Connection> {
        let properties = self.ctx.accounts.account(account)?.select(keys)?;
        let connection = Connection::builder()
            .id(id)
            .name(name)
            .connector(connector)
            .configured_properties(properties)
            .build();
        let created = self.ctx.management.create_connection(&connection).await?;
        info!(connection = id, connector = %connector.id, "Connection created");
        Ok(created)
    }

    async fn submit_integration(&self, twitter: &Connector, salesforce: &Connector) -> Result<Integration> {
        let management = &self.ctx.management;
        let twitter_connection = management.get_connection(&self.config.twitter_connection_id).await?;
        let salesforce_connection = management
            .get_connection(&self.config.salesforce_connection_id)
            .await?;

        let mention = twitter.find_action(&self.config.mention_action)?.clone();
        let upsert = salesforce.find_action(&self.config.upsert_action)?.clone();

        let integration = Integration::builder()
            .name(&self.config.integration_name)
            .steps([
                Step::endpoint(twitter_connection, mention),
                Step::mapper(&self.ctx.mapping),
                Step::endpoint(salesforce_connection, upsert),
            ])
            .desired_status(IntegrationStatus::Activated)
            .build();

        let created = management.create_integration(&integration).await?;
        info!(id = ?created.id, "Integration submitted");
        Ok(created)
    }

    async fn await_activation(&self, integration: &Integration) -> Result<Duration> {
        let management = &self.ctx.management;
        let start = Instant::now();
        let active = wait_for_activation(
            integration,
            move |id: String| async move { management.get_integration(&id).await },
            self.config.activation_timeout,
        )
        .await?;
        let elapsed = start.elapsed();
        info!(elapsed_secs = elapsed.as_secs(), "Integration build time");

        if active {
            Ok(elapsed)
        } else {
            Err(Error::new(ErrorKind::ActivationTimeout { elapsed }))
        }
    }

    async fn await_contact(&self, screen_name: &str) -> Result<(Contact, Duration)> {
        let crm = &self.ctx.crm;
        let start = Instant::now();
        let found = wait_for_value(
            |contact: &Option<Contact>| contact.is_some(),
            move || find_contact(crm, screen_name),
            WaitConfig::new(self.config.effect_timeout, self.config.effect_interval),
        )
        .await?;
        let elapsed = start.elapsed();

        match found.flatten() {
            Some(contact) => {
                info!(contact = %contact.id, elapsed_secs = elapsed.as_secs(), "Contact created");
                Ok((contact, elapsed))
            }
            None => {
                warn!(elapsed_secs = elapsed.as_secs(), "Contact did not appear");
                Err(Error::new(ErrorKind::EffectTimeout { elapsed }))
            }
        }
    }

    /// Remove everything a run may have left behind.
    ///
    /// Safe to call any number of times. Tweets that cannot be deleted are
    /// logged and skipped; any other failure is returned.
    #[instrument(skip(self))]
    pub async fn cleanup(&self) -> Result<()> {
        let ctx = self.ctx;

        ctx.management.reset_database().await?;

        let owner = ctx.accounts.account(GITHUB)?.property("login")?;
        let repository = format!("{owner}/{}", Names::sanitize(&self.config.integration_name));
        if ctx.source_control.delete_repository(&repository).await? {
            info!(%repository, "Repository deleted");
        }

        let talky = ctx.social.screen_name();
        let soql = Contact::by_twitter_screen_name(talky);
        for contact in ctx.crm.query_contacts(&soql).await? {
            ctx.crm.delete_record(Contact::SOBJECT, &contact.id).await?;
            info!(contact = %contact.id, "Contact deleted");
        }

        let statuses = ctx.social.list_recent_messages(talky).await?;
        for status in &statuses {
            if let Err(err) = ctx.social.delete_message(status.id).await {
                warn!(status = status.id, error = %err, "Could not delete tweet");
            }
        }

        info!(tweets = statuses.len(), "Cleanup finished");
        Ok(())
    }
}

fn verify_contact(contact: &Contact, message: &str) -> Result<()> {
    let description = contact.description.as_deref().unwrap_or_default();
    if description != message {
        return Err(Error::new(ErrorKind::DescriptionMismatch {
            expected: message.to_string(),
            actual: description.to_string(),
        }));
    }

    for (field, value) in [
        ("FirstName", &contact.first_name),
        ("LastName", &contact.last_name),
    ] {
        if value.as_deref().is_none_or(str::is_empty) {
            return Err(Error::new(ErrorKind::EmptyField {
                field: field.to_string(),
            }));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(first: Option<&str>, last: Option<&str>, description: &str) -> Contact {
        Contact {
            id: "0031r00002ABCDeAAH".into(),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            description: Some(description.into()),
            twitter_screen_name: Some("fuseqe_talky".into()),
        }
    }

    #[test]
    fn test_verify_contact() {
        assert!(verify_contact(&contact(Some("Fuse"), Some("Talky"), "hi @x"), "hi @x").is_ok());

        let err = verify_contact(&contact(Some("Fuse"), Some("Talky"), "other"), "hi @x").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::DescriptionMismatch { ref actual, .. } if actual == "other"
        ));

        let err = verify_contact(&contact(Some(""), Some("Talky"), "hi @x"), "hi @x").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::EmptyField { ref field } if field == "FirstName"));

        let err = verify_contact(&contact(Some("Fuse"), None, "hi @x"), "hi @x").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::EmptyField { ref field } if field == "LastName"));
    }

    #[test]
    fn test_default_config() {
        let config = ScenarioConfig::default();
        assert_eq!(config.activation_timeout, Duration::from_secs(600));
        assert_eq!(config.effect_timeout, Duration::from_secs(120));
        assert_eq!(config.effect_interval, Duration::from_secs(5));
        assert_eq!(
            Names::sanitize(&config.integration_name),
            "twitter-to-salesforce-contact-rest-test"
        );
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ScenarioState::IntegrationActive.to_string(), "INTEGRATION_ACTIVE");
        assert_eq!(ScenarioState::CleanedUp.to_string(), "CLEANED_UP");
    }
}
