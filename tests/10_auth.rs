mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{TestServer, PASSWORD};
use gestdocu_api::database::UserStore;

#[tokio::test]
async fn token_pair_for_valid_credentials() -> Result<()> {
    let server = TestServer::spawn().await?;
    let user = server.create_user("ana", PASSWORD).await?;

    let resp = server.token("ana", PASSWORD).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert!(body["access"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["refresh"].as_str().is_some_and(|t| !t.is_empty()));

    let stored = server.store.find_by_id(user.id).await?.expect("user exists");
    assert!(stored.last_login.is_some());
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.create_user("ana", PASSWORD).await?;

    for (username, password) in [("ana", "nope"), ("ghost", PASSWORD)] {
        let resp = server.token(username, password).await?;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = resp.json().await?;
        assert_eq!(body["detail"], "No active account found with the given credentials");
        assert_eq!(body["code"], "no_active_account");
    }
    Ok(())
}

#[tokio::test]
async fn inactive_user_cannot_log_in() -> Result<()> {
    let server = TestServer::spawn().await?;
    let user = server.create_user("ana", PASSWORD).await?;
    server.store.set_active(user.id, false).await?;

    let resp = server.token("ana", PASSWORD).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn missing_credentials_are_field_errors() -> Result<()> {
    let server = TestServer::spawn().await?;
    let resp = server
        .client
        .post(server.url("/api/auth/token/"))
        .json(&json!({ "username": "ana" }))
        .send()
        .await?;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body, json!({ "password": ["This field is required."] }));
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;
    let resp = server
        .client
        .post(server.url("/api/auth/token/"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["code"], "parse_error");
    Ok(())
}

#[tokio::test]
async fn missing_content_type_is_unsupported_media_type() -> Result<()> {
    let server = TestServer::spawn().await?;
    let resp = server
        .client
        .post(server.url("/api/auth/token/"))
        .body(r#"{"username": "ana", "password": "x"}"#)
        .send()
        .await?;

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: Value = resp.json().await?;
    assert_eq!(body["code"], "unsupported_media_type");
    Ok(())
}

#[tokio::test]
async fn refresh_issues_new_access_token() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.create_user("ana", PASSWORD).await?;
    let pair: Value = server.token("ana", PASSWORD).await?.json().await?;

    let resp = server
        .client
        .post(server.url("/api/auth/token/refresh/"))
        .json(&json!({ "refresh": pair["refresh"] }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await?;
    let access = body["access"].as_str().expect("access token");
    assert!(body.get("refresh").is_none());

    let me = server.client.get(server.url("/api/me/")).bearer_auth(access).send().await?;
    assert_eq!(me.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn access_token_is_not_a_refresh_token() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, access) = server.authenticated("ana").await?;

    let resp = server
        .client
        .post(server.url("/api/auth/token/refresh/"))
        .json(&json!({ "refresh": access }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await?;
    assert_eq!(body["code"], "token_not_valid");
    Ok(())
}

#[tokio::test]
async fn refresh_fails_once_user_is_deactivated() -> Result<()> {
    let server = TestServer::spawn().await?;
    let user = server.create_user("ana", PASSWORD).await?;
    let pair: Value = server.token("ana", PASSWORD).await?.json().await?;
    server.store.set_active(user.id, false).await?;

    let resp = server
        .client
        .post(server.url("/api/auth/token/refresh/"))
        .json(&json!({ "refresh": pair["refresh"] }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_bearer_token() -> Result<()> {
    let server = TestServer::spawn().await?;

    for path in ["/api/me/", "/expedientes-jerarquicos/"] {
        let resp = server.client.get(server.url(path)).send().await?;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = resp.json().await?;
        assert_eq!(body["detail"], "Authentication credentials were not provided.");
        assert_eq!(body["code"], "not_authenticated");
    }

    let resp = server
        .client
        .get(server.url("/api/me/"))
        .bearer_auth("not.a.jwt")
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await?;
    assert_eq!(body["code"], "token_not_valid");
    Ok(())
}

#[tokio::test]
async fn deactivated_user_loses_access_immediately() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (user, access) = server.authenticated("ana").await?;
    server.store.set_active(user.id, false).await?;

    let resp = server.client.get(server.url("/api/me/")).bearer_auth(&access).send().await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await?;
    assert_eq!(body["code"], "user_inactive");
    Ok(())
}
