pub mod provider;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::error::AuthenticationError;

pub use provider::IdentityTokenProvider;

/// Source of bearer tokens for outbound reporting calls
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Return a token that is valid right now, refreshing it if needed
    async fn get_token(&self) -> Result<String, AuthenticationError>;

    /// Forget the cached credential if it still holds `rejected`
    async fn invalidate(&self, _rejected: &str) {}
}

/// Bearer token together with the instant it stops being valid
#[derive(Clone)]
pub struct Credential {
    token: String,
    expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(token: String, expires_at: DateTime<Utc>) -> Self {
        Self { token, expires_at }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Valid strictly before expiry
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        !self.is_valid_at(Utc::now())
    }
}

// Never print the token itself
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Payload returned by the identity endpoint
///
/// Accepts both the absolute `{token, expiresAt}` shape and the BI service's
/// native login shape `{access_token, expires_in}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdentityResponse {
    Absolute {
        token: String,
        #[serde(rename = "expiresAt")]
        expires_at: DateTime<Utc>,
    },
    Relative {
        access_token: String,
        expires_in: i64,
    },
}

impl IdentityResponse {
    pub fn into_credential(self, issued_at: DateTime<Utc>) -> Result<Credential, AuthenticationError> {
        let credential = match self {
            IdentityResponse::Absolute { token, expires_at } => Credential::new(token, expires_at),
            IdentityResponse::Relative { access_token, expires_in } => {
                let expires_at = Duration::try_seconds(expires_in)
                    .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
                    .ok_or_else(|| {
                        AuthenticationError::InvalidResponse(format!(
                            "expires_in {} is out of range",
                            expires_in
                        ))
                    })?;
                Credential::new(access_token, expires_at)
            }
        };

        if credential.token.is_empty() {
            return Err(AuthenticationError::InvalidResponse(
                "identity endpoint returned an empty token".to_string(),
            ));
        }

        Ok(credential)
    }
}
