//! API route handlers for the studyflow server.

pub mod health;
pub mod preferences;
pub mod stats;
pub mod study_sessions;
pub mod suggest;
pub mod tasks;
pub mod users;

use std::sync::Arc;

use axum::Router;
use serde::Serialize;

use crate::state::AppState;

/// Body for idempotent delete endpoints.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET /api/health - Health check
/// - GET /api/tasks - List the owner's tasks (priority-ordered)
/// - POST /api/tasks - Create a task
/// - PUT /api/tasks/{id} - Partially update a task
/// - DELETE /api/tasks/{id} - Delete a task (idempotent)
/// - GET /api/study-sessions - List the owner's sessions with task metadata
/// - POST /api/study-sessions - Create a study session
/// - DELETE /api/study-sessions/{id} - Delete a session (idempotent)
/// - GET /api/preferences - Fetch-or-create preferences
/// - PUT /api/preferences - Partially update preferences
/// - POST /api/ai/suggest-study-times - AI session suggestions
/// - GET /api/stats - Derived task statistics
/// - GET /api/users/me - Authenticated user id
/// - GET /api/auth/login-url - Identity-service login URL for clients
/// - POST /api/auth/sessions - Exchange a login code for a session cookie
/// - GET /api/logout - Revoke the session and clear the cookie
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", tasks::router())
        .nest("/api", study_sessions::router())
        .nest("/api", preferences::router())
        .nest("/api", suggest::router())
        .nest("/api", stats::router())
        .nest("/api", users::router())
        .with_state(state)
}
