use serde::{Deserialize, Serialize};

/// A tweet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Status {
    pub id: u64,
    #[serde(default)]
    pub id_str: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// A Twitter user as embedded in statuses and returned by
/// `verify_credentials`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    #[serde(default)]
    pub id: u64,
    pub screen_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
