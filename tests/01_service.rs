mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

use common::TestServer;

#[tokio::test]
async fn root_returns_banner() -> Result<()> {
    let server = TestServer::spawn().await?;
    let resp = server.client.get(server.url("/")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await?;
    assert_eq!(body["name"], "GestDocu API");
    assert_eq!(body["endpoints"]["hierarchy"], "/expedientes-jerarquicos/ (protected)");
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let server = TestServer::spawn().await?;
    let resp = server.client.get(server.url("/health")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    Ok(())
}
