//! Everything a scenario needs, built once per run.

use tracing::{info, instrument};

use syndesis_qe_accounts::{AccountsDirectory, GITHUB, SALESFORCE, TWITTER_TALKY};
use syndesis_qe_github::GitHubClient;
use syndesis_qe_rest::SyndesisRestClient;
use syndesis_qe_salesforce::{PasswordCredentials, SalesforceClient};
use syndesis_qe_twitter::{OAuth1Credentials, TwitterClient};

use crate::config::QeConfig;
use crate::error::Result;

/// Accounts, service clients and the mapping document of one run.
///
/// Generic over the collaborators so tests can substitute fakes.
#[derive(Debug)]
pub struct QeContext<M, S, C, G> {
    pub accounts: AccountsDirectory,
    pub management: M,
    /// Acts as the `twitter_talky` account.
    pub social: S,
    pub crm: C,
    pub source_control: G,
    /// AtlasMap document for the mapper step.
    pub mapping: String,
}

/// Context backed by the real services.
pub type LiveContext = QeContext<SyndesisRestClient, TwitterClient, SalesforceClient, GitHubClient>;

impl<M, S, C, G> QeContext<M, S, C, G> {
    pub fn new(
        accounts: AccountsDirectory,
        management: M,
        social: S,
        crm: C,
        source_control: G,
        mapping: impl Into<String>,
    ) -> Self {
        Self {
            accounts,
            management,
            social,
            crm,
            source_control,
            mapping: mapping.into(),
        }
    }
}

impl LiveContext {
    /// Load accounts and the mapping, then connect to every service.
    ///
    /// Salesforce is logged into with the password grant here, so a bad
    /// Salesforce account fails before any platform state is touched.
    #[instrument(skip(config), fields(syndesis_url = %config.syndesis_url))]
    pub async fn connect(config: &QeConfig) -> Result<Self> {
        let accounts = AccountsDirectory::load(&config.credentials_path)?;
        let mapping = tokio::fs::read_to_string(&config.mapping_path).await?;

        let management = SyndesisRestClient::with_config(
            &config.syndesis_url,
            config.syndesis_token(),
            config.http.clone(),
        )?;

        let talky = accounts.account(TWITTER_TALKY)?;
        let social = TwitterClient::with_config(
            syndesis_qe_twitter::DEFAULT_BASE_URL,
            OAuth1Credentials::new(
                talky.property("consumerKey")?,
                talky.property("consumerSecret")?,
                talky.property("accessToken")?,
                talky.property("accessTokenSecret")?,
            ),
            talky.property("screenName")?,
            config.http.clone(),
        )?;

        let salesforce = accounts.account(SALESFORCE)?;
        let mut credentials = PasswordCredentials::new(
            salesforce.property("clientId")?,
            salesforce.property("clientSecret")?,
            salesforce.property("userName")?,
            salesforce.property("password")?,
        );
        if let Ok(login_url) = salesforce.property("loginUrl") {
            credentials = credentials.with_login_url(login_url);
        }
        let crm = SalesforceClient::connect(&credentials, config.http.clone()).await?;

        let github = accounts.account(GITHUB)?;
        let source_control = GitHubClient::with_config(
            syndesis_qe_github::DEFAULT_BASE_URL,
            github.property("token")?,
            config.http.clone(),
        )?;

        info!(accounts = accounts.len(), "Connected to all services");
        Ok(Self::new(accounts, management, social, crm, source_control, mapping))
    }
}
