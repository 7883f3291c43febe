use axum::extract::{Extension, State};

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::{build_hierarchy, HierarchyView};
use crate::state::AppState;

/// GET /expedientes-jerarquicos/ - Full Client → Case → Dossier → Document tree
///
/// The caller is required but does not filter the result.
pub async fn hierarchy_get(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<HierarchyView> {
    let view = build_hierarchy(state.hierarchy.as_ref()).await?;
    tracing::info!(
        "Hierarchy served to '{}': {} clients",
        user.username,
        view.total_clients
    );
    Ok(ApiResponse::success(view))
}
