// handlers/public/auth/refresh.rs - POST /api/auth/token/refresh/ handler

use axum::extract::State;

use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::services::auth_service::{self, AccessToken, TokenRefreshRequest};
use crate::state::AppState;

/// POST /api/auth/token/refresh/ - Trade a refresh token for a new access token.
/// The refresh token itself is not rotated.
pub async fn refresh_post(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TokenRefreshRequest>,
) -> ApiResult<AccessToken> {
    let access = auth_service::refresh_access(state.users.as_ref(), &state.config.security, &request).await?;
    Ok(ApiResponse::success(access))
}
