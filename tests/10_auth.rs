mod common;

use anyhow::Result;
use httpmock::prelude::*;
use project_reports::{AuthenticationError, ReportClientError, TokenSource};

#[tokio::test]
async fn valid_credential_is_reused_across_calls() -> Result<()> {
    let backend = common::TestBackend::start().await;
    let identity = backend.identity("abc", 3600).await;
    let look = backend
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/looks/42/run/json");
            then.status(200).header("content-type", "application/json").body(r#"{"rows":[]}"#);
        })
        .await;
    let query = backend
        .server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/queries/run/json")
                .header("authorization", "token abc");
            then.status(200).header("content-type", "application/json").body("[]");
        })
        .await;

    let client = backend.client();
    client.run_fixed_report(42).await?;
    client.find_user_by_email("a@b.com").await?;
    client.run_fixed_report(42).await?;

    identity.assert_calls_async(1).await;
    look.assert_calls_async(2).await;
    query.assert_calls_async(1).await;
    Ok(())
}

#[tokio::test]
async fn expired_credential_triggers_exactly_one_refresh_per_call() -> Result<()> {
    let backend = common::TestBackend::start().await;
    // Every credential handed out is already past its expiry
    let identity = backend.identity("short-lived", -1).await;
    backend
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/looks/1/run/json");
            then.status(200).header("content-type", "application/json").body("[]");
        })
        .await;

    let client = backend.client();
    client.run_fixed_report(1).await?;
    identity.assert_calls_async(1).await;

    client.run_fixed_report(1).await?;
    identity.assert_calls_async(2).await;
    Ok(())
}

#[tokio::test]
async fn expiry_elapsing_between_calls_refreshes_once() -> Result<()> {
    let backend = common::TestBackend::start().await;
    let identity = backend.identity("one-second", 1).await;
    backend
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/looks/1/run/json");
            then.status(200).header("content-type", "application/json").body("[]");
        })
        .await;

    let client = backend.client();
    client.run_fixed_report(1).await?;
    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
    client.run_fixed_report(1).await?;

    identity.assert_calls_async(2).await;
    Ok(())
}

#[tokio::test]
async fn unreachable_identity_endpoint_blocks_report_call() -> Result<()> {
    let backend = common::TestBackend::start().await;
    let look = backend
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/looks/42/run/json");
            then.status(200).body("{}");
        })
        .await;

    let mut config = backend.config();
    // Nothing listens on port 9 locally
    config.looker.auth_url = Some("http://127.0.0.1:9/login".to_string());
    let client = project_reports::ReportClient::new(&config)?;

    let err = client.run_fixed_report(42).await.unwrap_err();
    assert!(
        matches!(err, ReportClientError::Authentication(AuthenticationError::Unreachable(_))),
        "unexpected error: {err}"
    );
    look.assert_calls_async(0).await;
    Ok(())
}

#[tokio::test]
async fn token_source_is_shared_between_clones() -> Result<()> {
    let backend = common::TestBackend::start().await;
    let identity = backend.identity("abc", 3600).await;

    let client = backend.client();
    let clone = client.clone();
    assert_eq!(client.token_source().get_token().await?, "abc");
    assert_eq!(clone.token_source().get_token().await?, "abc");

    identity.assert_calls_async(1).await;
    Ok(())
}
