mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

use common::TestServer;

async fn fetch(server: &TestServer, access: &str) -> Result<Value> {
    let resp = server
        .client
        .get(server.url("/expedientes-jerarquicos/"))
        .bearer_auth(access)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(resp.json().await?)
}

#[tokio::test]
async fn empty_dataset() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, access) = server.authenticated("ana").await?;

    let body = fetch(&server, &access).await?;
    assert_eq!(body["total_clients"], 0);
    assert_eq!(body["clients"], serde_json::json!([]));
    Ok(())
}

#[tokio::test]
async fn prunes_clients_without_cases_and_counts_the_rest() -> Result<()> {
    let server = TestServer::spawn().await?;
    let store = &server.store;
    let a = store.add_client("A").await;
    let k1 = store.add_case(&a, "K1").await;
    let d1 = store.add_dossier(&k1, "D1").await;
    for title in ["doc-1", "doc-2", "doc-3"] {
        store.add_document(&d1, title).await;
    }
    store.add_case(&a, "K2").await;
    store.add_client("B").await;

    let (_, access) = server.authenticated("ana").await?;
    let body = fetch(&server, &access).await?;

    assert_eq!(body["total_clients"], 1);
    let client = &body["clients"][0];
    assert_eq!(client["client"]["name"], "A");
    assert_eq!(client["total_cases"], 2);

    let k1 = &client["cases"][0];
    assert_eq!(k1["case"]["title"], "K1");
    assert_eq!(k1["total_dossiers"], 1);
    assert_eq!(k1["total_documents"], 3);
    assert_eq!(k1["dossiers"][0]["total_documents"], 3);
    assert_eq!(k1["dossiers"][0]["documents"].as_array().map(Vec::len), Some(3));

    let k2 = &client["cases"][1];
    assert_eq!(k2["case"]["title"], "K2");
    assert_eq!(k2["total_dossiers"], 0);
    assert_eq!(k2["total_documents"], 0);
    Ok(())
}

#[tokio::test]
async fn reflects_data_added_between_requests() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, access) = server.authenticated("ana").await?;
    let a = server.store.add_client("A").await;
    let k = server.store.add_case(&a, "K").await;
    let d = server.store.add_dossier(&k, "D").await;

    let before = fetch(&server, &access).await?;
    assert_eq!(before["clients"][0]["cases"][0]["total_documents"], 0);

    server.store.add_document(&d, "late").await;
    let after = fetch(&server, &access).await?;
    assert_eq!(after["clients"][0]["cases"][0]["total_documents"], 1);
    Ok(())
}
