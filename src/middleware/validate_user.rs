use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

use super::auth::AuthClaims;

/// The authenticated caller, loaded fresh from the store for this request
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Middleware that resolves the token's user and ensures the account is still active
pub async fn validate_user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let AuthClaims(claims) = request
        .extensions()
        .get::<AuthClaims>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("JWT authentication required before user validation"))?;

    let user = state.users.find_by_id(claims.user_id).await?.ok_or_else(|| {
        tracing::warn!("User validation failed: user {} not found", claims.user_id);
        ApiError::Unauthorized {
            message: "User not found".to_string(),
            code: "user_not_found",
        }
    })?;

    if !user.is_active {
        tracing::warn!("User validation failed: user '{}' is inactive", user.username);
        return Err(ApiError::Unauthorized {
            message: "User is inactive".to_string(),
            code: "user_inactive",
        });
    }

    tracing::debug!("User validation successful: {} ({})", user.username, user.id);

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
