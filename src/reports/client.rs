use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use super::request::{AdHocQuery, ApiRequest, Filters, ReportTarget};
use crate::auth::{IdentityTokenProvider, TokenSource};
use crate::config::{QueryIds, ReportsConfig};
use crate::error::{ReportClientError, Result};
use crate::http::{self, build_http_client};

/// Saved query behind the email lookup
pub const EMAIL_QUERY_ID: u64 = 1234;
/// Saved query behind the handle lookup
pub const HANDLE_QUERY_ID: u64 = 12345;

const REG_STATS_VIEW: &str = "challenge";
const REG_STATS_FIELDS: [&str; 3] = [
    "challenge.track",
    "challenge.num_registrations",
    "challenge.num_submissions",
];

/// Client for the BI reporting API
///
/// Cheap to clone; clones share the HTTP connection pool and token source.
#[derive(Clone)]
pub struct ReportClient {
    http_client: Client,
    tokens: Arc<dyn TokenSource>,
    base_url: String,
    format: String,
    limit: u32,
    authorize_get: bool,
    queries: QueryIds,
}

impl ReportClient {
    /// Build a client that authenticates through the configured identity endpoint
    pub fn new(config: &ReportsConfig) -> Result<Self> {
        let http_client = build_http_client(&config.looker)?;
        let tokens = Arc::new(IdentityTokenProvider::new(&config.looker, http_client.clone()));
        Self::build(config, http_client, tokens)
    }

    /// Build a client around an existing token source
    pub fn with_token_source(config: &ReportsConfig, tokens: Arc<dyn TokenSource>) -> Result<Self> {
        let http_client = build_http_client(&config.looker)?;
        Self::build(config, http_client, tokens)
    }

    /// Build a client from the process-wide configuration
    pub fn from_env() -> Result<Self> {
        Self::new(crate::config::config())
    }

    fn build(config: &ReportsConfig, http_client: Client, tokens: Arc<dyn TokenSource>) -> Result<Self> {
        let looker = &config.looker;
        Url::parse(&looker.base_url)?;
        if looker.format.is_empty() {
            return Err(ReportClientError::Configuration("output format must not be empty".to_string()));
        }

        Ok(Self {
            http_client,
            tokens,
            base_url: looker.base_url.trim_end_matches('/').to_string(),
            format: looker.format.clone(),
            limit: looker.limit,
            authorize_get: looker.authorize_get,
            queries: looker.queries.clone(),
        })
    }

    pub fn token_source(&self) -> &Arc<dyn TokenSource> {
        &self.tokens
    }

    /// Run a saved look with the configured format and row limit
    pub async fn run_fixed_report(&self, look_id: u64) -> Result<Value> {
        self.run_target(ReportTarget::Look(look_id)).await
    }

    /// Run a saved query with the configured format and row limit
    pub async fn run_saved_query(&self, query_id: u64) -> Result<Value> {
        self.run_target(ReportTarget::Query(query_id)).await
    }

    async fn run_target(&self, target: ReportTarget) -> Result<Value> {
        let endpoint = self.endpoint(&target.path(&self.format, self.limit));
        self.call_api(&endpoint, ApiRequest::Get).await
    }

    /// Build and run an ad-hoc query against the main model
    pub async fn run_ad_hoc_query(
        &self,
        query_id: u64,
        view: Option<String>,
        fields: Option<Vec<String>>,
        filters: Filters,
    ) -> Result<Value> {
        let query = AdHocQuery {
            view,
            fields,
            ..AdHocQuery::new(query_id, filters)
        };
        self.execute(&query).await
    }

    /// Run a fully built ad-hoc query
    pub async fn execute(&self, query: &AdHocQuery) -> Result<Value> {
        let endpoint = self.endpoint(&format!("queries/run/{}", self.format));
        self.call_api(&endpoint, ApiRequest::post(query)?).await
    }

    /// Look up a user by email address
    ///
    /// The saved query defines its own view and projection, so neither is sent.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Value> {
        let filters = Filters::from([("user.email".to_string(), email.to_string())]);
        self.run_ad_hoc_query(EMAIL_QUERY_ID, None, None, filters).await
    }

    /// Look up a user by member handle
    pub async fn find_user_by_handle(&self, handle: &str) -> Result<Value> {
        let filters = Filters::from([("user.handle".to_string(), handle.to_string())]);
        self.run_ad_hoc_query(HANDLE_QUERY_ID, None, None, filters).await
    }

    /// Registration and submission counts per track for one project
    ///
    /// The project id goes over the wire as a string filter value (`"3001"`), not a JSON number.
    pub async fn find_project_reg_submissions(&self, project_id: u64) -> Result<Value> {
        let query = AdHocQuery::new(
            self.queries.reg_stats,
            Filters::from([("challenge.tc_direct_project_id".to_string(), project_id.to_string())]),
        )
        .with_view(REG_STATS_VIEW)
        .with_fields(REG_STATS_FIELDS);
        self.execute(&query).await
    }

    /// Dispatch one call to the reporting API
    ///
    /// A token is always acquired before the request goes out, even when the
    /// request does not carry it.
    pub async fn call_api(&self, endpoint: &str, request: ApiRequest) -> Result<Value> {
        let url = Url::parse(endpoint)?;
        let token = self.tokens.get_token().await?;
        let carries_token = request.carries_token(self.authorize_get);
        let method = request.method();

        let builder = match request {
            ApiRequest::Get => self.http_client.get(url),
            ApiRequest::Post { body } => self
                .http_client
                .post(url)
                .header(CONTENT_TYPE, "application/json")
                .json(&body),
        };
        let builder = if carries_token {
            builder.header(AUTHORIZATION, format!("token {}", token))
        } else {
            builder
        };

        let response = builder.send().await.map_err(|e| {
            warn!(endpoint = %endpoint, method, error = %e, "Report endpoint unreachable");
            ReportClientError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = http::error_body(response).await;
            warn!(endpoint = %endpoint, method, status = %status, "Report call failed");
            if status == StatusCode::UNAUTHORIZED {
                self.tokens.invalidate(&token).await;
            }
            return Err(ReportClientError::Status { status, body });
        }

        let bytes = response.bytes().await.map_err(ReportClientError::Transport)?;
        let payload: Value = serde_json::from_slice(&bytes)?;

        info!(endpoint = %endpoint, method, payload = %payload, "Report call succeeded");
        Ok(payload)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}
