// crates/server/src/routes/study_sessions.rs
//! Study session CRUD endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};

use studyflow_core::{NewStudySession, StudySession};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::routes::SuccessResponse;
use crate::state::AppState;

/// GET /api/study-sessions - List the owner's sessions, earliest first.
///
/// Each row carries the linked task's title and subject when present.
async fn list_sessions(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<Vec<StudySession>>> {
    Ok(Json(state.db.list_sessions(&user.user_id).await?))
}

/// POST /api/study-sessions - Create a session. Returns 201.
///
/// The task reference is optional (freestanding sessions are fine) and
/// `ai_suggested` defaults to false. A `task_id` that does not belong to
/// the caller is rejected with 404.
async fn create_session(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    payload: Result<Json<NewStudySession>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StudySession>)> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if let Some(task_id) = payload.task_id {
        if !state.db.task_exists(&user.user_id, task_id).await? {
            return Err(ApiError::TaskNotFound(task_id));
        }
    }
    let session = state.db.insert_session(&user.user_id, &payload).await?;
    tracing::info!(
        user_id = %user.user_id,
        session_id = session.id,
        ai_suggested = session.ai_suggested,
        "Study session created"
    );
    Ok((StatusCode::CREATED, Json(session)))
}

/// DELETE /api/study-sessions/{id} - Delete a session. Idempotent.
async fn delete_session(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<SuccessResponse>> {
    state.db.delete_session(&user.user_id, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Create the study session routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/study-sessions", get(list_sessions).post(create_session))
        .route("/study-sessions/{id}", delete(delete_session))
}
