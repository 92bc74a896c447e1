// crates/server/src/routes/stats.rs
//! Derived task statistics endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use studyflow_core::stats::{self, DailyCompletion, SubjectCount};
use studyflow_core::Task;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

/// Response for the stats endpoint.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub completion_rate: u8,
    pub urgent_tasks: Vec<Task>,
    pub day_streak: u32,
    pub weekly_productivity: Vec<DailyCompletion>,
    pub subject_distribution: Vec<SubjectCount>,
}

/// GET /api/stats - Derived statistics over the owner's tasks.
///
/// All figures are computed on the fly from the current task list; nothing
/// is cached or stored.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<StatsResponse>> {
    let tasks = state.db.list_tasks(&user.user_id).await?;
    let now = Utc::now();
    let today = now.date_naive();

    Ok(Json(StatsResponse {
        completion_rate: stats::completion_rate(&tasks),
        urgent_tasks: stats::urgent_tasks(&tasks, now)
            .into_iter()
            .cloned()
            .collect(),
        day_streak: stats::day_streak(&tasks, today),
        weekly_productivity: stats::weekly_productivity(&tasks, today),
        subject_distribution: stats::subject_distribution(&tasks),
    }))
}

/// Create the stats routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(get_stats))
}
