//! Service-account token exchange for the push API.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

/// OAuth scope required to send conversation push messages.
const PUSH_SCOPE: &str = "https://www.googleapis.com/auth/actions.fulfillment.conversation";
/// Lifetime of the signed assertion.
const ASSERTION_TTL_SECS: i64 = 3600;

/// Service-account key as downloaded from the platform console.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Load the key from a JSON file.
    pub async fn load(path: &str) -> Result<Self, NotifyError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| NotifyError::Auth(format!("cannot read service account {path}: {e}")))?;
        serde_json::from_str(&raw)
            .map_err(|e| NotifyError::Auth(format!("malformed service account key: {e}")))
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange a signed service-account assertion for a bearer token scoped to
/// the push API.
pub(crate) async fn exchange_token(
    client: &reqwest::Client,
    key: &ServiceAccountKey,
) -> Result<String, NotifyError> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        iss: &key.client_email,
        scope: PUSH_SCOPE,
        aud: &key.token_uri,
        iat: now,
        exp: now + ASSERTION_TTL_SECS,
    };
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| NotifyError::Auth(format!("invalid private key: {e}")))?;
    let assertion = encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|e| NotifyError::Auth(format!("cannot sign assertion: {e}")))?;

    let response = client
        .post(&key.token_uri)
        .form(&[
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", assertion.as_str()),
        ])
        .send()
        .await
        .map_err(|e| NotifyError::Auth(format!("token exchange request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(NotifyError::Auth(format!("token exchange returned {status}: {body}")));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| NotifyError::Auth(format!("malformed token response: {e}")))?;
    Ok(token.access_token)
}
