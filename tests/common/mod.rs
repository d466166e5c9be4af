#![allow(dead_code)]

use chrono::{Duration, Utc};
use httpmock::prelude::*;
use httpmock::Mock;
use project_reports::{ReportClient, ReportsConfig};
use serde_json::json;

pub struct TestBackend {
    pub server: MockServer,
}

impl TestBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start_async().await,
        }
    }

    pub fn base_url(&self) -> String {
        self.server.base_url()
    }

    pub fn config(&self) -> ReportsConfig {
        let mut config = ReportsConfig::with_base_url(self.base_url());
        config.looker.client_id = "it-client".to_string();
        config.looker.client_secret = "it-secret".to_string();
        config.looker.timeout_secs = 5;
        config
    }

    pub fn client(&self) -> ReportClient {
        ReportClient::new(&self.config()).expect("failed to build report client")
    }

    /// Identity endpoint handing out `token`, valid for `expires_in_secs`
    pub async fn identity(&self, token: &str, expires_in_secs: i64) -> Mock<'_> {
        let expires_at = Utc::now() + Duration::seconds(expires_in_secs);
        let body = json!({ "token": token, "expiresAt": expires_at.to_rfc3339() });
        self.server
            .mock_async(|when, then| {
                when.method(POST).path("/login");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(body);
            })
            .await
    }
}
