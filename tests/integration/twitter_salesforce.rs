use syndesis_qe::{ScenarioConfig, ScenarioState, TwitterSalesforceScenario};

use super::common::live_context;

#[tokio::test]
#[ignore = "requires SYNDESIS_URL and credentials"]
async fn test_twitter_mention_creates_salesforce_contact() {
    let ctx = live_context().await;
    let mut scenario = TwitterSalesforceScenario::new(&ctx, ScenarioConfig::default());

    let report = scenario.run().await.expect("scenario should succeed");

    assert_eq!(report.final_state, ScenarioState::CleanedUp);
    assert_eq!(report.contact.description.as_deref(), Some(report.message.as_str()));
    println!(
        "integration {} active after {:?}, contact {} after {:?}",
        report.integration_id, report.activation_time, report.contact.id, report.effect_time
    );
}

#[tokio::test]
#[ignore = "requires SYNDESIS_URL and credentials"]
async fn test_cleanup_on_clean_state() {
    let ctx = live_context().await;
    let scenario = TwitterSalesforceScenario::new(&ctx, ScenarioConfig::default());

    scenario.cleanup().await.expect("first cleanup");
    scenario.cleanup().await.expect("cleanup is repeatable");
}
