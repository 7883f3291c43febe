use axum::extract::{Extension, State};

use crate::middleware::{ApiJson, ApiResponse, ApiResult, CurrentUser};
use crate::services::profile_service::{self, MeUpdate, MeView, UpdateMode};
use crate::state::AppState;

/// GET /api/me/ - Caller's account with its profile
pub async fn me_get(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<MeView> {
    let view = profile_service::me(state.users.as_ref(), &user).await?;
    Ok(ApiResponse::success(view))
}

/// PUT /api/me/ - Full update, `username` is required
pub async fn me_put(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(update): ApiJson<MeUpdate>,
) -> ApiResult<MeView> {
    let view = profile_service::update_me(state.users.as_ref(), &user, update, UpdateMode::Full).await?;
    Ok(ApiResponse::success(view))
}

/// PATCH /api/me/ - Partial update of any subset of fields
pub async fn me_patch(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(update): ApiJson<MeUpdate>,
) -> ApiResult<MeView> {
    let view = profile_service::update_me(state.users.as_ref(), &user, update, UpdateMode::Partial).await?;
    Ok(ApiResponse::success(view))
}
