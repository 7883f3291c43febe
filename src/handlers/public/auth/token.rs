// handlers/public/auth/token.rs - POST /api/auth/token/ handler

use axum::extract::State;

use crate::auth::TokenPair;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::services::auth_service::{self, TokenObtainRequest};
use crate::state::AppState;

/// POST /api/auth/token/ - Exchange username and password for a token pair
///
/// ```json
/// { "username": "ana", "password": "..." }
/// ```
///
/// Responds with `{ "access": "...", "refresh": "..." }`. Unknown users,
/// wrong passwords and inactive accounts all get the same 401.
pub async fn token_post(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TokenObtainRequest>,
) -> ApiResult<TokenPair> {
    let pair = auth_service::obtain_pair(state.users.as_ref(), &state.config.security, &request).await?;
    Ok(ApiResponse::success(pair))
}
