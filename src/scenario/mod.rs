//! End-to-end scenarios.

mod twitter_salesforce;

pub use twitter_salesforce::{
    ScenarioConfig, ScenarioConfigBuilder, ScenarioReport, ScenarioState, TwitterSalesforceScenario,
};
