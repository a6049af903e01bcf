use axum::{extract::State, Extension, Json};

use workforce_core::domain::UserInfo;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /api/employee/me
pub async fn me(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<UserInfo>, ApiError> {
    let profile = state
        .employees
        .profile(&user_id)
        .await
        .map_err(ApiError::during("fetching employee data"))?;
    Ok(Json(profile))
}
