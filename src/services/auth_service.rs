use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{self, password, TokenPair, TokenType};
use crate::config::SecurityConfig;
use crate::database::UserStore;
use crate::error::{ApiError, FieldErrors};

#[derive(Debug, Deserialize)]
pub struct TokenObtainRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TokenRefreshRequest {
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccessToken {
    pub access: String,
}

/// Record "This field is required." for absent or blank values
pub(crate) fn required<'a>(errors: &mut FieldErrors, field: &str, value: &'a Option<String>) -> Option<&'a str> {
    match value.as_deref() {
        None => {
            errors.add(field, "This field is required.");
            None
        }
        Some(v) if v.is_empty() => {
            errors.add(field, "This field may not be blank.");
            None
        }
        Some(v) => Some(v),
    }
}

/// Exchange credentials for an access/refresh pair
pub async fn obtain_pair(
    users: &dyn UserStore,
    security: &SecurityConfig,
    request: &TokenObtainRequest,
) -> Result<TokenPair, ApiError> {
    let mut errors = FieldErrors::new();
    let username = required(&mut errors, "username", &request.username);
    let password = required(&mut errors, "password", &request.password);
    let (Some(username), Some(password)) = (username, password) else {
        return Err(ApiError::Validation(errors));
    };

    let user = match users.find_by_username(username).await? {
        Some(user) if user.is_active && password::verify_password(password, &user.password_hash) => user,
        _ => {
            warn!("Failed login attempt for '{}'", username);
            return Err(ApiError::no_active_account());
        }
    };

    let pair = auth::issue_pair(user.id, security)?;
    users.touch_last_login(user.id).await?;
    info!("Issued token pair for '{}'", user.username);
    Ok(pair)
}

/// Issue a new access token from a valid refresh token
pub async fn refresh_access(
    users: &dyn UserStore,
    security: &SecurityConfig,
    request: &TokenRefreshRequest,
) -> Result<AccessToken, ApiError> {
    let mut errors = FieldErrors::new();
    let Some(token) = required(&mut errors, "refresh", &request.refresh) else {
        return Err(ApiError::Validation(errors));
    };

    let claims = auth::validate_jwt(token, TokenType::Refresh, security).map_err(|e| {
        warn!("Refresh token rejected: {}", e);
        ApiError::token_not_valid()
    })?;

    match users.find_by_id(claims.user_id).await? {
        Some(user) if user.is_active => {}
        _ => {
            warn!("Refresh token for missing or inactive user {}", claims.user_id);
            return Err(ApiError::token_not_valid());
        }
    }

    Ok(AccessToken {
        access: auth::issue_access(claims.user_id, security)?,
    })
}
