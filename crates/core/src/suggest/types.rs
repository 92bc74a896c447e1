// crates/core/src/suggest/types.rs
//! Request/response/error types for the suggestion bridge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A pending task as presented to the scheduler model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskContext {
    pub id: i64,
    pub title: String,
    pub priority: i64,
    #[serde(default)]
    pub estimated_duration: Option<i64>,
    #[serde(default)]
    pub deadline_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subject: Option<String>,
}

/// An already-scheduled session window (start/end only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionWindow {
    pub scheduled_start_at: DateTime<Utc>,
    pub scheduled_end_at: DateTime<Utc>,
}

/// The slice of user preferences the scheduler cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyWindow {
    pub preferred_study_start_time: String,
    pub preferred_study_end_time: String,
    pub break_duration: i64,
    pub max_session_duration: i64,
}

/// Everything a provider needs to propose study times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub tasks: Vec<TaskContext>,
    pub existing_sessions: Vec<SessionWindow>,
    pub preferences: StudyWindow,
}

/// One proposed study session from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedSession {
    #[serde(default)]
    pub task_id: Option<i64>,
    #[serde(default)]
    pub task_title: String,
    pub scheduled_start_at: DateTime<Utc>,
    pub scheduled_end_at: DateTime<Utc>,
    #[serde(default)]
    pub reasoning: String,
}

/// Failures from the suggestion call or reply parsing.
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("request to suggestion provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("suggestion provider returned status {0}")]
    Status(u16),

    #[error("suggestion provider returned an empty completion")]
    EmptyCompletion,

    #[error("invalid suggestion reply: {0}")]
    InvalidReply(String),
}

/// Parse a completion's JSON content into validated session candidates.
///
/// Accepts either a bare array or an object wrapping the array under a
/// `sessions` or `suggestions` key (JSON-object output mode forces the
/// latter shape on some models). Anything else is rejected.
pub fn parse_reply(content: &str) -> Result<Vec<SuggestedSession>, SuggestionError> {
    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| SuggestionError::InvalidReply(e.to_string()))?;

    let list = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(ref map) => map
            .get("sessions")
            .or_else(|| map.get("suggestions"))
            .cloned()
            .ok_or_else(|| {
                SuggestionError::InvalidReply("no session array in reply".to_string())
            })?,
        _ => {
            return Err(SuggestionError::InvalidReply(
                "reply is neither an array nor an object".to_string(),
            ))
        }
    };

    serde_json::from_value(list).map_err(|e| SuggestionError::InvalidReply(e.to_string()))
}
