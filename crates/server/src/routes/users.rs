// crates/server/src/routes/users.rs
//! Login, logout and current-user endpoints.
//!
//! Identity issuance lives in the external identity service; these routes
//! only exchange codes for session tokens and manage the session cookie.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::auth::{cookie_value, AuthUser, SESSION_COOKIE};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct LoginPayload {
    code: String,
}

/// Response for the current-user endpoint.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct MeResponse {
    pub user_id: String,
}

fn session_cookie(value: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={value}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age_secs}")
}

/// GET /api/users/me - Who the session belongs to.
async fn me(user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: user.user_id,
    })
}

/// GET /api/auth/login-url - Where to send a user who wants to log in.
///
/// Unauthenticated: clients call this before they have a session.
async fn login_url(State(state): State<Arc<AppState>>) -> ApiResult<Json<serde_json::Value>> {
    let url = state.identity.login_url().await?;
    Ok(Json(serde_json::json!({ "login_url": url })))
}

/// POST /api/auth/sessions - Exchange a login code for a session cookie.
async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let session = state
        .identity
        .exchange_code(&payload.code)
        .await
        .map_err(|e| match e {
            crate::auth::AuthError::Status(401 | 403) => {
                ApiError::Unauthorized("login code rejected".to_string())
            }
            other => ApiError::Identity(other),
        })?;

    tracing::info!(user_id = %session.user_id, "Session created");

    Ok((
        StatusCode::CREATED,
        [(
            header::SET_COOKIE,
            // 30-day session lifetime; the identity service may expire it sooner
            session_cookie(&session.session_token, 30 * 24 * 60 * 60),
        )],
        Json(MeResponse {
            user_id: session.user_id,
        }),
    )
        .into_response())
}

/// GET /api/logout - Revoke the session and clear the cookie.
///
/// Revocation is best-effort: a token the identity service no longer knows
/// still gets its cookie cleared, so logout never fails for the user.
async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let token = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| cookie_value(cookies, SESSION_COOKIE));

    if let Some(token) = token {
        if let Err(e) = state.identity.revoke_session(token).await {
            tracing::warn!(error = %e, "Session revocation failed; clearing cookie anyway");
        }
    }

    (
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie("", 0))],
        Json(serde_json::json!({ "success": true })),
    )
        .into_response()
}

/// Create the user/session routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/me", get(me))
        .route("/auth/login-url", get(login_url))
        .route("/auth/sessions", post(login))
        .route("/logout", get(logout))
}
