//! Salesforce `Contact` records.

use serde::{Deserialize, Serialize};

use syndesis_qe_client::security::soql;

/// The subset of Contact fields the integration writes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Contact {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "FirstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "LastName", default)]
    pub last_name: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "TwitterScreenName__c", default)]
    pub twitter_screen_name: Option<String>,
}

impl Contact {
    /// SObject type name used for deletes.
    pub const SOBJECT: &'static str = "Contact";

    /// SOQL selecting the contact created for a Twitter screen name.
    ///
    /// ```rust
    /// use syndesis_qe_salesforce::Contact;
    ///
    /// assert_eq!(
    ///     Contact::by_twitter_screen_name("o'talky"),
    ///     "SELECT Id,FirstName,LastName,Description,TwitterScreenName__c FROM contact \
    ///      where TwitterScreenName__c = 'o\\'talky'"
    /// );
    /// ```
    pub fn by_twitter_screen_name(screen_name: &str) -> String {
        format!(
            "SELECT Id,FirstName,LastName,Description,TwitterScreenName__c FROM contact \
             where TwitterScreenName__c = '{}'",
            soql::escape_string(screen_name)
        )
    }
}
