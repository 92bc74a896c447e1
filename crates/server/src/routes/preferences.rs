// crates/server/src/routes/preferences.rs
//! User preference endpoints (lazy defaults on first access).

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};

use studyflow_core::{PreferencesPatch, UserPreferences};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/preferences - Fetch the owner's preferences.
///
/// Creates the row with defaults on first access, so this never 404s.
async fn get_preferences(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<UserPreferences>> {
    Ok(Json(
        state.db.get_or_create_preferences(&user.user_id).await?,
    ))
}

/// PUT /api/preferences - Partially update preferences.
async fn update_preferences(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    payload: Result<Json<PreferencesPatch>, JsonRejection>,
) -> ApiResult<Json<UserPreferences>> {
    let Json(patch) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }
    let patch = patch.normalized()?;
    Ok(Json(
        state.db.update_preferences(&user.user_id, &patch).await?,
    ))
}

/// Create the preferences routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/preferences", get(get_preferences).put(update_preferences))
}
