//! Management API data model.
//!
//! Only the fields the QE suite reads or writes are typed. Everything else
//! the server sends is kept in `extra` maps so a connector fetched from the
//! server can be embedded into a connection unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, ErrorKind, Result};

/// Paged list envelope returned by collection endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: u64,
}

/// A connector type offered by the platform (twitter, salesforce, ...).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Connector {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Connector {
    /// Find the action whose Camel connector prefix matches.
    pub fn find_action(&self, prefix: &str) -> Result<&Action> {
        self.actions
            .iter()
            .find(|action| action.camel_connector_prefix.as_deref() == Some(prefix))
            .ok_or_else(|| {
                Error::new(ErrorKind::ActionNotFound {
                    connector: self.id.clone(),
                    prefix: prefix.to_string(),
                })
            })
    }
}

/// An operation a connector can perform.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camel_connector_prefix: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A configured instance of a connector.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector: Option<Connector>,
    #[serde(default)]
    pub configured_properties: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Connection {
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::default()
    }
}

/// Builder for [`Connection`].
#[derive(Debug, Default)]
pub struct ConnectionBuilder {
    connection: Connection,
}

impl ConnectionBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.connection.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.connection.name = name.into();
        self
    }

    /// Embed the connector and set `connectorId` from it.
    pub fn connector(mut self, connector: &Connector) -> Self {
        self.connection.connector_id = Some(connector.id.clone());
        self.connection.connector = Some(connector.clone());
        self
    }

    pub fn configured_properties(mut self, properties: BTreeMap<String, String>) -> Self {
        self.connection.configured_properties = properties;
        self
    }

    pub fn build(self) -> Connection {
        self.connection
    }
}

/// Kind of an integration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Endpoint,
    Mapper,
}

/// One step of an integration flow.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub step_kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<Connection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub configured_properties: BTreeMap<String, String>,
}

impl Step {
    /// Property under which a mapper step carries its mapping document.
    pub const ATLAS_MAPPING: &'static str = "atlasmapping";

    /// An endpoint step invoking `action` through `connection`.
    pub fn endpoint(connection: Connection, action: Action) -> Self {
        Self {
            id: None,
            step_kind: StepKind::Endpoint,
            connection: Some(connection),
            action: Some(action),
            configured_properties: BTreeMap::new(),
        }
    }

    /// A data mapper step with the given mapping document.
    pub fn mapper(mapping: impl Into<String>) -> Self {
        Self {
            id: None,
            step_kind: StepKind::Mapper,
            connection: None,
            action: None,
            configured_properties: BTreeMap::from([(Self::ATLAS_MAPPING.to_string(), mapping.into())]),
        }
    }

    /// The mapping document of a mapper step.
    pub fn mapping(&self) -> Option<&str> {
        self.configured_properties.get(Self::ATLAS_MAPPING).map(String::as_str)
    }
}

/// Lifecycle status of an integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum IntegrationStatus {
    Draft,
    Pending,
    Activated,
    Deactivated,
    Deleted,
}

/// An integration: a named sequence of steps the platform deploys.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_status: Option<IntegrationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_status: Option<IntegrationStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Integration {
    pub fn builder() -> IntegrationBuilder {
        IntegrationBuilder::default()
    }

    /// Current status, `Pending` while the server has not reported one.
    pub fn current_status_or_pending(&self) -> IntegrationStatus {
        self.current_status.unwrap_or(IntegrationStatus::Pending)
    }

    pub fn is_activated(&self) -> bool {
        self.current_status_or_pending() == IntegrationStatus::Activated
    }
}

/// Builder for [`Integration`].
#[derive(Debug, Default)]
pub struct IntegrationBuilder {
    integration: Integration,
}

impl IntegrationBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.integration.name = name.into();
        self
    }

    pub fn steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.integration.steps = steps.into_iter().collect();
        self
    }

    pub fn desired_status(mut self, status: IntegrationStatus) -> Self {
        self.integration.desired_status = Some(status);
        self
    }

    pub fn build(self) -> Integration {
        self.integration
    }
}
