#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde_json::{json, Value};

use gestdocu_api::auth::password::hash_password;
use gestdocu_api::config::AppConfig;
use gestdocu_api::database::models::{NewUser, User};
use gestdocu_api::database::{MemoryStore, UserStore};
use gestdocu_api::{app, AppState};

pub const PASSWORD: &str = "Xk9#vLp2q";

/// One server per test, bound to a free port and backed by a fresh MemoryStore
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub client: Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(AppConfig::development()).await
    }

    pub async fn spawn_with(config: AppConfig) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_memory(config, store.clone());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            base_url,
            store,
            client: Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if self.client.get(self.url("/health")).send().await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn create_user(&self, username: &str, password: &str) -> Result<User> {
        let user = self
            .store
            .create_user(NewUser {
                username: username.to_string(),
                password_hash: hash_password(password, 4)?,
                first_name: "Ana".to_string(),
                last_name: "Rojas".to_string(),
                email: format!("{}@example.com", username),
            })
            .await?;
        Ok(user)
    }

    /// POST /api/auth/token/ and return the raw response
    pub async fn token(&self, username: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/api/auth/token/"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    /// Log in and return the access token
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let body: Value = self.token(username, password).await?.error_for_status()?.json().await?;
        body["access"]
            .as_str()
            .map(str::to_string)
            .context("token response has no access token")
    }

    /// Create a user and log in as them
    pub async fn authenticated(&self, username: &str) -> Result<(User, String)> {
        let user = self.create_user(username, PASSWORD).await?;
        let access = self.login(username, PASSWORD).await?;
        Ok((user, access))
    }
}
