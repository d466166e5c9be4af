use chrono::{Duration, Utc};
use httpmock::MockServer;
use serde_json::{json, Value};

use crate::config::ReportsConfig;

/// Configuration pointing both the identity and reporting endpoints at a mock server
pub fn test_config(server: &MockServer) -> ReportsConfig {
    let mut config = ReportsConfig::with_base_url(server.base_url());
    config.looker.client_id = "test-client".to_string();
    config.looker.client_secret = "test-secret".to_string();
    config.looker.timeout_secs = 5;
    config
}

/// Identity payload whose credential expires `expires_in_secs` from now
pub fn identity_body(token: &str, expires_in_secs: i64) -> Value {
    let expires_at = Utc::now() + Duration::seconds(expires_in_secs);
    json!({
        "token": token,
        "expiresAt": expires_at.to_rfc3339(),
    })
}
