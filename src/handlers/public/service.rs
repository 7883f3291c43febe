use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - Service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "GestDocu API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Legal document management: clients, cases, dossiers and documents",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "token": "/api/auth/token/, /api/auth/token/refresh/ (public)",
            "me": "/api/me/ (protected)",
            "change_password": "/api/auth/change-password/ (protected)",
            "hierarchy": "/expedientes-jerarquicos/ (protected)",
        }
    }))
}

/// GET /health - Store connectivity probe
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();

    match state.users.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
