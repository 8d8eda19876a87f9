//! Scenario runs against in-memory services.
//!
//! Time is paused, so activation and effect timeouts of minutes complete
//! instantly and elapsed durations are exact.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;

use syndesis_qe::accounts::AccountsDirectory;
use syndesis_qe::rest::{Connection, Connector, Integration, IntegrationStatus, StepKind};
use syndesis_qe::salesforce::Contact;
use syndesis_qe::twitter::Status;
use syndesis_qe::{
    CrmProvider, Error, ErrorKind, ManagementApi, QeContext, Result, ScenarioConfig, ScenarioState,
    SocialProvider, SourceControl, TwitterSalesforceScenario,
};

const TALKY: &str = "fuseqe_talky";
const LISTEN: &str = "fuseqe_listen";
const REPOSITORY: &str = "fuseqe/twitter-to-salesforce-contact-rest-test";
const MAPPING: &str = r#"{"AtlasMapping":{"name":"twitter-salesforce"}}"#;

#[derive(Debug, Default, Clone)]
struct Behaviour {
    /// Integration polls until `Activated`; `None` never activates.
    activate_after_polls: Option<u32>,
    /// Contact queries after the tweet until the contact exists.
    contact_after_queries: Option<u32>,
    /// Description written instead of the tweet text.
    contact_description: Option<String>,
    /// A foreign contact shows up once the integration is active.
    stray_contact_on_activation: bool,
    /// Deleting this tweet fails.
    failing_tweet_delete: Option<u64>,
    /// The n-th database reset fails.
    failing_reset: Option<u32>,
}

#[derive(Debug, Default)]
struct World {
    resets: u32,
    connections: BTreeMap<String, Connection>,
    integrations: Vec<Integration>,
    integration_polls: u32,
    timeline: Vec<Status>,
    next_status_id: u64,
    pending_message: Option<String>,
    queries_since_tweet: u32,
    contacts: Vec<Contact>,
    deleted_contacts: Vec<String>,
    deleted_tweets: Vec<u64>,
    repositories: BTreeSet<String>,
    deleted_repositories: Vec<String>,
}

/// One handle standing in for every service.
#[derive(Debug, Clone)]
struct Fake {
    behaviour: Behaviour,
    world: Arc<Mutex<World>>,
    talky: String,
}

impl Fake {
    fn new(behaviour: Behaviour) -> Self {
        let world = World {
            next_status_id: 100,
            repositories: BTreeSet::from([REPOSITORY.to_string()]),
            ..Default::default()
        };
        Self {
            behaviour,
            world: Arc::new(Mutex::new(world)),
            talky: TALKY.to_string(),
        }
    }

    fn with_tweets(self, ids: &[u64]) -> Self {
        self.world.lock().unwrap().timeline.extend(ids.iter().map(|&id| status(id, "old tweet")));
        self
    }

    fn world(&self) -> std::sync::MutexGuard<'_, World> {
        self.world.lock().unwrap()
    }
}

fn status(id: u64, text: &str) -> Status {
    serde_json::from_value(json!({
        "id": id,
        "id_str": id.to_string(),
        "text": text,
        "user": { "screen_name": TALKY }
    }))
    .unwrap()
}

fn contact(id: &str, description: &str) -> Contact {
    Contact {
        id: id.to_string(),
        first_name: Some("Fuse".into()),
        last_name: Some("Talky".into()),
        description: Some(description.into()),
        twitter_screen_name: Some(TALKY.into()),
    }
}

fn not_found(what: &str) -> Error {
    Error::new(ErrorKind::Management(format!("{what} not found")))
}

impl ManagementApi for Fake {
    async fn list_connectors(&self) -> Result<Vec<Connector>> {
        Ok(connectors())
    }

    async fn get_connector(&self, id: &str) -> Result<Connector> {
        connectors()
            .into_iter()
            .find(|connector| connector.id == id)
            .ok_or_else(|| not_found(id))
    }

    async fn create_connection(&self, connection: &Connection) -> Result<Connection> {
        let id = connection.id.clone().unwrap_or_default();
        self.world().connections.insert(id, connection.clone());
        Ok(connection.clone())
    }

    async fn get_connection(&self, id: &str) -> Result<Connection> {
        self.world().connections.get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn create_integration(&self, integration: &Integration) -> Result<Integration> {
        let mut world = self.world();
        let mut created = integration.clone();
        created.id = Some(format!("i-{}", world.integrations.len() + 1));
        world.integrations.push(created.clone());
        Ok(created)
    }

    async fn get_integration(&self, id: &str) -> Result<Integration> {
        let mut world = self.world();
        world.integration_polls += 1;
        let active = self
            .behaviour
            .activate_after_polls
            .is_some_and(|after| world.integration_polls >= after);
        if active && self.behaviour.stray_contact_on_activation && world.contacts.is_empty() {
            world.contacts.push(contact("003STRAY", "created by hand"));
        }

        let mut integration = world
            .integrations
            .iter()
            .find(|integration| integration.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| not_found(id))?;
        integration.current_status = active.then_some(IntegrationStatus::Activated);
        Ok(integration)
    }

    async fn reset_database(&self) -> Result<()> {
        let mut world = self.world();
        world.resets += 1;
        if self.behaviour.failing_reset == Some(world.resets) {
            return Err(Error::new(ErrorKind::Management("reset-db returned 500".into())));
        }
        world.connections.clear();
        world.integrations.clear();
        Ok(())
    }
}

impl SocialProvider for Fake {
    fn screen_name(&self) -> &str {
        &self.talky
    }

    async fn post_message(&self, text: &str) -> Result<Status> {
        let mut world = self.world();
        world.next_status_id += 1;
        let posted = status(world.next_status_id, text);
        world.timeline.push(posted.clone());
        world.pending_message = Some(text.to_string());
        world.queries_since_tweet = 0;
        Ok(posted)
    }

    async fn list_recent_messages(&self, screen_name: &str) -> Result<Vec<Status>> {
        assert_eq!(screen_name, TALKY);
        Ok(self.world().timeline.clone())
    }

    async fn delete_message(&self, id: u64) -> Result<()> {
        if self.behaviour.failing_tweet_delete == Some(id) {
            return Err(Error::new(ErrorKind::Twitter(format!("status {id} cannot be deleted"))));
        }
        let mut world = self.world();
        world.timeline.retain(|status| status.id != id);
        world.deleted_tweets.push(id);
        Ok(())
    }
}

impl CrmProvider for Fake {
    async fn query_contacts(&self, soql: &str) -> Result<Vec<Contact>> {
        assert!(soql.ends_with(&format!("TwitterScreenName__c = '{TALKY}'")), "{soql}");
        let mut world = self.world();
        if let Some(message) = world.pending_message.clone() {
            world.queries_since_tweet += 1;
            let due = self
                .behaviour
                .contact_after_queries
                .is_some_and(|after| world.queries_since_tweet >= after);
            if due {
                let description = self.behaviour.contact_description.clone().unwrap_or(message);
                world.contacts.push(contact("0031r00002ABCDeAAH", &description));
                world.pending_message = None;
            }
        }
        Ok(world.contacts.clone())
    }

    async fn delete_record(&self, sobject: &str, id: &str) -> Result<()> {
        assert_eq!(sobject, Contact::SOBJECT);
        let mut world = self.world();
        world.contacts.retain(|contact| contact.id != id);
        world.deleted_contacts.push(id.to_string());
        Ok(())
    }
}

impl SourceControl for Fake {
    async fn delete_repository(&self, full_name: &str) -> Result<bool> {
        let mut world = self.world();
        world.deleted_repositories.push(full_name.to_string());
        Ok(world.repositories.remove(full_name))
    }
}

fn connectors() -> Vec<Connector> {
    serde_json::from_value(json!([
        {
            "id": "twitter",
            "name": "Twitter",
            "icon": "fa-twitter",
            "actions": [
                { "id": "io.syndesis:twitter-mention-connector", "name": "Mention", "camelConnectorPrefix": "twitter-mention" },
                { "id": "io.syndesis:twitter-search-connector", "name": "Search", "camelConnectorPrefix": "twitter-search" }
            ]
        },
        {
            "id": "salesforce",
            "name": "Salesforce",
            "actions": [
                { "id": "io.syndesis:salesforce-upsert-contact-connector", "name": "Upsert contact", "camelConnectorPrefix": "salesforce-upsert-contact" }
            ]
        },
        { "id": "ftp", "name": "FTP", "actions": [] }
    ]))
    .unwrap()
}

fn accounts() -> AccountsDirectory {
    AccountsDirectory::from_json(
        &json!({
            "twitter_listen": {
                "service": "twitter",
                "properties": {
                    "screenName": LISTEN,
                    "accessToken": "listen-at",
                    "accessTokenSecret": "listen-ats",
                    "consumerKey": "listen-ck",
                    "consumerSecret": "listen-cs"
                }
            },
            "twitter_talky": {
                "service": "twitter",
                "properties": {
                    "screenName": TALKY,
                    "accessToken": "talky-at",
                    "accessTokenSecret": "talky-ats",
                    "consumerKey": "talky-ck",
                    "consumerSecret": "talky-cs"
                }
            },
            "salesforce": {
                "service": "salesforce",
                "properties": {
                    "clientId": "sf-id",
                    "clientSecret": "sf-secret",
                    "instanceUrl": "https://na50.salesforce.com",
                    "loginUrl": "https://login.salesforce.com",
                    "userName": "qe@example.com",
                    "password": "pw"
                }
            },
            "github": {
                "service": "github",
                "properties": { "login": "fuseqe", "token": "ghp_x" }
            }
        })
        .to_string(),
    )
    .unwrap()
}

type FakeContext = QeContext<Fake, Fake, Fake, Fake>;

fn context(fake: &Fake) -> FakeContext {
    QeContext::new(accounts(), fake.clone(), fake.clone(), fake.clone(), fake.clone(), MAPPING)
}

fn happy() -> Behaviour {
    Behaviour {
        activate_after_polls: Some(3),
        contact_after_queries: Some(2),
        ..Default::default()
    }
}

fn expected_message() -> String {
    format!("Have you heard about Syndesis project? It is pretty amazing... @{LISTEN}")
}

#[tokio::test(start_paused = true)]
async fn test_happy_path() {
    let fake = Fake::new(happy());
    let ctx = context(&fake);
    let mut scenario = TwitterSalesforceScenario::new(&ctx, ScenarioConfig::default());

    let report = scenario.run().await.unwrap();

    assert_eq!(report.integration_id, "i-1");
    assert_eq!(report.message, expected_message());
    assert_eq!(report.contact.description.as_deref(), Some(expected_message().as_str()));
    assert_eq!(report.activation_time, Duration::from_secs(20));
    assert_eq!(report.effect_time, Duration::from_secs(5));
    assert_eq!(report.final_state, ScenarioState::CleanedUp);
    assert_eq!(scenario.state(), ScenarioState::CleanedUp);

    let world = fake.world();
    assert_eq!(world.resets, 2);
    assert_eq!(world.integration_polls, 3);
    assert_eq!(world.deleted_contacts, vec!["0031r00002ABCDeAAH"]);
    assert_eq!(world.deleted_tweets, vec![101]);
    assert!(world.timeline.is_empty());
    assert_eq!(world.deleted_repositories, vec![REPOSITORY, REPOSITORY]);
}

#[tokio::test(start_paused = true)]
async fn test_integration_shape() {
    let fake = Fake::new(Behaviour {
        failing_reset: Some(2),
        ..happy()
    });
    let ctx = context(&fake);

    let err = TwitterSalesforceScenario::new(&ctx, ScenarioConfig::default())
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Management(_)));

    // The failing post-run reset leaves the submitted objects in place.
    let world = fake.world();
    let twitter = &world.connections["fuseqe-twitter"];
    assert_eq!(twitter.name, "Fuse QE twitter listen");
    assert_eq!(twitter.connector_id.as_deref(), Some("twitter"));
    assert_eq!(
        twitter.configured_properties.keys().collect::<Vec<_>>(),
        vec!["accessToken", "accessTokenSecret", "consumerKey", "consumerSecret"]
    );
    assert_eq!(twitter.configured_properties["consumerKey"], "listen-ck");

    let salesforce = &world.connections["fuseqe-salesforce"];
    assert_eq!(salesforce.name, "Fuse QE salesforce");
    assert_eq!(salesforce.configured_properties["userName"], "qe@example.com");
    assert_eq!(salesforce.configured_properties.len(), 6);

    let integration = &world.integrations[0];
    assert_eq!(integration.name, "Twitter to salesforce contact rest test");
    assert_eq!(integration.desired_status, Some(IntegrationStatus::Activated));
    let kinds: Vec<StepKind> = integration.steps.iter().map(|step| step.step_kind).collect();
    assert_eq!(kinds, vec![StepKind::Endpoint, StepKind::Mapper, StepKind::Endpoint]);
    assert_eq!(
        integration.steps[0].action.as_ref().unwrap().camel_connector_prefix.as_deref(),
        Some("twitter-mention")
    );
    assert_eq!(integration.steps[1].mapping(), Some(MAPPING));
    assert_eq!(
        integration.steps[2].connection.as_ref().unwrap().id.as_deref(),
        Some("fuseqe-salesforce")
    );
}

#[tokio::test(start_paused = true)]
async fn test_activation_timeout() {
    let fake = Fake::new(Behaviour {
        activate_after_polls: None,
        ..happy()
    });
    let ctx = context(&fake);
    let config = ScenarioConfig::builder()
        .with_activation_timeout(Duration::from_secs(60))
        .build();
    let mut scenario = TwitterSalesforceScenario::new(&ctx, config);

    let err = scenario.run().await.unwrap_err();

    assert!(matches!(
        err.kind,
        ErrorKind::ActivationTimeout { elapsed } if elapsed == Duration::from_secs(60)
    ));
    assert_eq!(scenario.state(), ScenarioState::CleanedUp);
    let world = fake.world();
    assert_eq!(world.integration_polls, 7);
    assert_eq!(world.resets, 2);
    assert!(world.deleted_tweets.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_effect_timeout_still_cleans_up() {
    let fake = Fake::new(Behaviour {
        contact_after_queries: None,
        ..happy()
    });
    let ctx = context(&fake);

    let err = TwitterSalesforceScenario::new(&ctx, ScenarioConfig::default())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        ErrorKind::EffectTimeout { elapsed } if elapsed == Duration::from_secs(120)
    ));
    assert!(err.is_timeout());
    let world = fake.world();
    assert_eq!(world.resets, 2);
    assert_eq!(world.deleted_tweets, vec![101]);
    assert!(world.deleted_contacts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_description_mismatch() {
    let fake = Fake::new(Behaviour {
        contact_description: Some("something else".into()),
        ..happy()
    });
    let ctx = context(&fake);

    let err = TwitterSalesforceScenario::new(&ctx, ScenarioConfig::default())
        .run()
        .await
        .unwrap_err();

    match err.kind {
        ErrorKind::DescriptionMismatch { expected, actual } => {
            assert_eq!(expected, expected_message());
            assert_eq!(actual, "something else");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(fake.world().contacts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_existing_contact_fails_precondition() {
    let fake = Fake::new(Behaviour {
        stray_contact_on_activation: true,
        ..happy()
    });
    let ctx = context(&fake);

    let err = TwitterSalesforceScenario::new(&ctx, ScenarioConfig::default())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::PreconditionFailed(_)));
    let world = fake.world();
    assert!(world.timeline.is_empty(), "no tweet may be sent");
    assert_eq!(world.deleted_contacts, vec!["003STRAY"]);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_action() {
    let fake = Fake::new(happy());
    let ctx = context(&fake);
    let config = ScenarioConfig::builder()
        .with_actions("twitter-timeline", "salesforce-upsert-contact")
        .build();

    let err = TwitterSalesforceScenario::new(&ctx, config).run().await.unwrap_err();

    assert!(matches!(
        err.kind,
        ErrorKind::ActionNotFound { ref connector, ref prefix }
            if connector == "twitter" && prefix == "twitter-timeline"
    ));
    assert_eq!(fake.world().integration_polls, 0);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_connector() {
    let fake = Fake::new(happy());
    let ctx = context(&fake);
    let config = ScenarioConfig::builder()
        .with_connector_ids("twitter", "dynamics")
        .build();

    let err = TwitterSalesforceScenario::new(&ctx, config).run().await.unwrap_err();

    assert!(matches!(err.kind, ErrorKind::ConnectorNotFound(ref id) if id == "dynamics"));
    assert!(fake.world().connections.is_empty());
}

#[tokio::test]
async fn test_cleanup_skips_failing_tweet_delete() {
    let fake = Fake::new(Behaviour {
        failing_tweet_delete: Some(2),
        ..happy()
    })
    .with_tweets(&[1, 2, 3]);
    let ctx = context(&fake);

    TwitterSalesforceScenario::new(&ctx, ScenarioConfig::default())
        .cleanup()
        .await
        .unwrap();

    let world = fake.world();
    assert_eq!(world.deleted_tweets, vec![1, 3]);
    assert_eq!(world.timeline.len(), 1);
    assert_eq!(world.timeline[0].id, 2);
}

#[tokio::test]
async fn test_cleanup_is_idempotent() {
    let fake = Fake::new(happy()).with_tweets(&[7]);
    fake.world().contacts.push(contact("003OLD", "left over"));
    let ctx = context(&fake);
    let scenario = TwitterSalesforceScenario::new(&ctx, ScenarioConfig::default());

    scenario.cleanup().await.unwrap();
    scenario.cleanup().await.unwrap();

    let world = fake.world();
    assert_eq!(world.resets, 2);
    assert_eq!(world.deleted_contacts, vec!["003OLD"]);
    assert_eq!(world.deleted_tweets, vec![7]);
    assert!(world.repositories.is_empty());
    assert_eq!(world.deleted_repositories.len(), 2);
}

#[tokio::test]
async fn test_failing_pre_run_cleanup_aborts() {
    let fake = Fake::new(Behaviour {
        failing_reset: Some(1),
        ..happy()
    });
    let ctx = context(&fake);

    let err = TwitterSalesforceScenario::new(&ctx, ScenarioConfig::default())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::Management(_)));
    let world = fake.world();
    assert_eq!(world.resets, 1);
    assert!(world.connections.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_body_error_wins_over_cleanup_error() {
    let fake = Fake::new(Behaviour {
        activate_after_polls: None,
        failing_reset: Some(2),
        ..happy()
    });
    let ctx = context(&fake);
    let config = ScenarioConfig::builder()
        .with_activation_timeout(Duration::from_secs(30))
        .build();
    let mut scenario = TwitterSalesforceScenario::new(&ctx, config);

    let err = scenario.run().await.unwrap_err();

    assert!(matches!(err.kind, ErrorKind::ActivationTimeout { .. }));
    assert_eq!(scenario.state(), ScenarioState::IntegrationSubmitted);
}
