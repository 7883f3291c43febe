use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gestdocu_api::config::config;
use gestdocu_api::database::{DatabaseManager, MemoryStore, PgStore};
use gestdocu_api::{app, AppState};

#[derive(Parser)]
#[command(name = "gestdocu-api")]
#[command(about = "GestDocu API server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Serve the in-memory demo dataset instead of Postgres")]
    memory: bool,

    #[arg(long, help = "Listen port (overrides GESTDOCU_PORT/PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = config().clone();
    config.validate().context("invalid configuration")?;
    tracing::info!("Starting GestDocu API in {:?} mode", config.environment);

    let port = args.port.unwrap_or(config.api.port);

    let state = if args.memory {
        tracing::warn!("Using in-memory store with demo data; nothing is persisted");
        let store = MemoryStore::new();
        store.seed_demo().await;
        AppState::with_memory(config, Arc::new(store))
    } else {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        AppState::with_postgres(config, PgStore::new(pool))
    };

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("GestDocu API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
