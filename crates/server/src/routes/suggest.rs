// crates/server/src/routes/suggest.rs
//! AI study-time suggestion endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use studyflow_core::suggest::{
    SessionWindow, StudyWindow, SuggestedSession, SuggestionRequest, TaskContext,
};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

/// Response for the suggestion endpoint.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct SuggestResponse {
    pub sessions: Vec<SuggestedSession>,
}

/// POST /api/ai/suggest-study-times - Ask the model for study sessions.
///
/// Gathers the owner's pending tasks, existing session windows, and
/// preferences, then delegates to the configured provider. Suggestions are
/// returned as-is; nothing is persisted here. The caller saves whichever
/// subset it accepts through POST /api/study-sessions.
async fn suggest_study_times(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<SuggestResponse>> {
    let tasks = state.db.list_tasks(&user.user_id).await?;
    let sessions = state.db.list_sessions(&user.user_id).await?;
    let preferences = state.db.get_or_create_preferences(&user.user_id).await?;

    let request = SuggestionRequest {
        tasks: tasks
            .iter()
            .filter(|t| !t.is_completed)
            .map(|t| TaskContext {
                id: t.id,
                title: t.title.clone(),
                priority: t.priority,
                estimated_duration: t.estimated_duration,
                deadline_at: t.deadline_at,
                subject: t.subject.clone(),
            })
            .collect(),
        existing_sessions: sessions
            .iter()
            .map(|s| SessionWindow {
                scheduled_start_at: s.scheduled_start_at,
                scheduled_end_at: s.scheduled_end_at,
            })
            .collect(),
        preferences: StudyWindow {
            preferred_study_start_time: preferences.preferred_study_start_time,
            preferred_study_end_time: preferences.preferred_study_end_time,
            break_duration: preferences.break_duration,
            max_session_duration: preferences.max_session_duration,
        },
    };

    tracing::info!(
        user_id = %user.user_id,
        provider = state.suggestions.name(),
        model = state.suggestions.model(),
        pending_tasks = request.tasks.len(),
        "Requesting study-time suggestions"
    );

    let suggested = state.suggestions.suggest(&request).await?;
    Ok(Json(SuggestResponse { sessions: suggested }))
}

/// Create the suggestion routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ai/suggest-study-times", post(suggest_study_times))
}
