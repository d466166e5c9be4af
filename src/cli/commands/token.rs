use serde_json::json;
use crate::auth::IdentityTokenProvider;
use crate::cli::OutputFormat;
use crate::config;
use crate::http;

/// Authenticate once and report when the credential expires
pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let looker = &config::config().looker;
    let http_client = http::build_http_client(looker)?;
    let provider = IdentityTokenProvider::new(looker, http_client);
    let credential = provider.credential().await?;

    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": true,
                "data": {
                    "auth_url": looker.auth_url(),
                    "expires_at": credential.expires_at(),
                }
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ Authenticated against {}", looker.auth_url());
            println!("  expires at {}", credential.expires_at().to_rfc3339());
        }
    }
    Ok(())
}
