//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! The signature covers the method, the URL without query and every
//! `oauth_*`, query and form parameter, each percent-encoded per RFC 3986,
//! sorted and joined. The signing key is
//! `enc(consumer_secret)&enc(token_secret)`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{Error, ErrorKind, Result};

type HmacSha1 = Hmac<Sha1>;

/// Percent-encode per RFC 3986 (only `A-Z a-z 0-9 - . _ ~` stay literal).
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Application and user tokens of one Twitter account.
///
/// Secrets are redacted in Debug output.
#[derive(Clone)]
pub struct OAuth1Credentials {
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    access_token_secret: String,
}

impl std::fmt::Debug for OAuth1Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth1Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .field("access_token_secret", &"[REDACTED]")
            .finish()
    }
}

impl OAuth1Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        }
    }

    /// Build the `Authorization` header for a request with a fresh nonce
    /// and the current time.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
    ) -> Result<String> {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.authorization_header_with(method, url, params, &nonce, &timestamp)
    }

    /// Build the `Authorization` header with a fixed nonce and timestamp.
    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        nonce: &str,
        timestamp: &str,
    ) -> Result<String> {
        let mut oauth_params = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_token".to_string(), self.access_token.clone()),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];

        let mut all_params = oauth_params.clone();
        all_params.extend(params.iter().cloned());

        let base = signature_base_string(method, url, &all_params);
        let signature = self.sign(&base)?;
        oauth_params.push(("oauth_signature".to_string(), signature));

        let fields = oauth_params
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", percent_encode(key), percent_encode(value)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {fields}"))
    }

    fn sign(&self, base: &str) -> Result<String> {
        let key = format!(
            "{}&{}",
            percent_encode(&self.consumer_secret),
            percent_encode(&self.access_token_secret)
        );
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| Error::new(ErrorKind::Signing(e.to_string())))?;
        mac.update(base.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// `METHOD&enc(url)&enc(k1=v1&k2=v2...)` with encoded pairs sorted.
pub fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(key, value)| (percent_encode(key), percent_encode(value)))
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(url),
        percent_encode(&parameter_string)
    )
}
