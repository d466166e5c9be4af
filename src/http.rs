use std::time::Duration;

use reqwest::{Client, Response};
use tracing::warn;

use crate::config::LookerConfig;
use crate::error::{ReportClientError, Result};

/// HTTP client shared by the identity and reporting calls
pub(crate) fn build_http_client(config: &LookerConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| ReportClientError::Configuration(format!("failed to build HTTP client: {}", e)))
}

/// Body of a failed response, for error reporting
///
/// A body that cannot be read is logged and replaced by a marker naming the read error.
pub(crate) async fn error_body(response: Response) -> String {
    let url = response.url().clone();
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(url = %url, error = %e, "Failed to read error response body");
            format!("<unreadable body: {}>", e)
        }
    }
}
