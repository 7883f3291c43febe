use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{validate_jwt, Claims, TokenType};
use crate::error::ApiError;
use crate::state::AppState;

/// Verified access-token claims for the current request
#[derive(Clone, Debug)]
pub struct AuthClaims(pub Claims);

/// JWT authentication middleware that validates access tokens and injects their claims
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(|msg| {
        tracing::debug!("Rejected request without usable credentials: {}", msg);
        ApiError::unauthorized(msg)
    })?;

    let claims = validate_jwt(token, TokenType::Access, &state.config.security).map_err(|e| {
        tracing::warn!("Access token rejected: {}", e);
        ApiError::token_not_valid()
    })?;

    request.extensions_mut().insert(AuthClaims(claims));

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or("Authentication credentials were not provided.")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err("Empty JWT token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}
