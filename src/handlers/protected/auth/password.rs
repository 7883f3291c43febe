use axum::extract::{Extension, State};

use crate::middleware::{ApiJson, ApiResponse, ApiResult, CurrentUser};
use crate::services::profile_service::{self, ChangePasswordRequest};
use crate::state::AppState;

/// POST /api/auth/change-password/ - Replace the caller's password
///
/// Returns 204 on success. Field errors are reported under
/// `current_password`, `new_password` or `confirm_password`.
pub async fn change_password_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(request): ApiJson<ChangePasswordRequest>,
) -> ApiResult<()> {
    profile_service::change_password(state.users.as_ref(), &state.config.security, &user, &request).await?;
    Ok(ApiResponse::<()>::no_content())
}
