use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{Credential, IdentityResponse, TokenSource};
use crate::config::LookerConfig;
use crate::error::AuthenticationError;
use crate::http;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
}

/// Token provider backed by the identity endpoint
///
/// The cached credential lives behind an async mutex that is held for the
/// whole refresh, so concurrent callers hitting an empty or expired cache
/// wait on one identity request instead of issuing their own.
pub struct IdentityTokenProvider {
    http_client: Client,
    auth_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<Credential>>,
}

impl IdentityTokenProvider {
    pub fn new(config: &LookerConfig, http_client: Client) -> Self {
        Self {
            http_client,
            auth_url: config.auth_url(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            cached: Mutex::new(None),
        }
    }

    /// Return the current credential, refreshing it when absent or expired
    pub async fn credential(&self) -> Result<Credential, AuthenticationError> {
        let mut cached = self.cached.lock().await;

        if let Some(credential) = cached.as_ref() {
            if !credential.is_expired() {
                debug!(expires_at = %credential.expires_at(), "Using cached credential");
                return Ok(credential.clone());
            }
        }

        // Expired credentials are dropped before the refresh so a failure leaves nothing behind
        *cached = None;

        let credential = self.fetch_credential().await?;
        *cached = Some(credential.clone());
        Ok(credential)
    }

    async fn fetch_credential(&self) -> Result<Credential, AuthenticationError> {
        let request = LoginRequest {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
        };

        let response = self
            .http_client
            .post(&self.auth_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(auth_url = %self.auth_url, error = %e, "Identity endpoint unreachable");
                AuthenticationError::Unreachable(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = http::error_body(response).await;
            warn!(auth_url = %self.auth_url, status = %status, "Identity endpoint rejected credentials");
            return Err(AuthenticationError::Rejected { status, body });
        }

        let issued_at = Utc::now();
        let identity: IdentityResponse = response
            .json()
            .await
            .map_err(|e| AuthenticationError::InvalidResponse(e.to_string()))?;
        let credential = identity.into_credential(issued_at)?;

        info!(expires_at = %credential.expires_at(), "Obtained reporting credential");
        Ok(credential)
    }
}

#[async_trait]
impl TokenSource for IdentityTokenProvider {
    async fn get_token(&self) -> Result<String, AuthenticationError> {
        let credential = self.credential().await?;
        Ok(credential.token().to_string())
    }

    async fn invalidate(&self, rejected: &str) {
        let mut cached = self.cached.lock().await;
        // A credential refreshed by another caller since the rejection stays
        if cached.as_ref().is_some_and(|credential| credential.token() == rejected) {
            *cached = None;
            debug!("Cached credential invalidated");
        }
    }
}
