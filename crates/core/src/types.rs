// crates/core/src/types.rs
//! Domain entities and request payload types.
//!
//! Entities mirror the persisted rows and serialize with snake_case field
//! names, timestamps as ISO-8601 strings. Create/patch payloads validate
//! through `normalized()` before they ever reach SQL: titles are trimmed,
//! priority is clamped to [1,5], durations must be positive. Patches are
//! explicit allow-listed field sets — every field optional, absent means
//! unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest allowed task priority.
pub const MIN_PRIORITY: i64 = 1;
/// Highest allowed task priority.
pub const MAX_PRIORITY: i64 = 5;
/// Priority assumed when a create payload omits one.
pub const DEFAULT_PRIORITY: i64 = 3;

/// Payload validation failures. Map to 400 at the API layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("{0} must be positive")]
    NotPositive(&'static str),
}

/// A user-owned unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: i64,
    /// Estimated duration in minutes.
    pub estimated_duration: Option<i64>,
    pub deadline_at: Option<DateTime<Utc>>,
    pub subject: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload for a task.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: i64,
    #[serde(default)]
    pub estimated_duration: Option<i64>,
    #[serde(default)]
    pub deadline_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subject: Option<String>,
}

fn default_priority() -> i64 {
    DEFAULT_PRIORITY
}

impl NewTask {
    /// Trim the title, clamp priority into [1,5], and reject payloads that
    /// would violate the task invariants.
    pub fn normalized(mut self) -> Result<Self, ValidationError> {
        self.title = self.title.trim().to_string();
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        self.priority = self.priority.clamp(MIN_PRIORITY, MAX_PRIORITY);
        if matches!(self.estimated_duration, Some(d) if d <= 0) {
            return Err(ValidationError::NotPositive("estimated_duration"));
        }
        Ok(self)
    }
}

/// Partial update for a task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i64>,
    pub estimated_duration: Option<i64>,
    pub deadline_at: Option<DateTime<Utc>>,
    pub subject: Option<String>,
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    /// True when no recognized field was supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.estimated_duration.is_none()
            && self.deadline_at.is_none()
            && self.subject.is_none()
            && self.is_completed.is_none()
    }

    /// Apply the same normalization rules as `NewTask` to the provided
    /// fields.
    pub fn normalized(mut self) -> Result<Self, ValidationError> {
        if let Some(title) = self.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(ValidationError::EmptyTitle);
            }
            self.title = Some(title);
        }
        if let Some(p) = self.priority.as_mut() {
            *p = (*p).clamp(MIN_PRIORITY, MAX_PRIORITY);
        }
        if matches!(self.estimated_duration, Some(d) if d <= 0) {
            return Err(ValidationError::NotPositive("estimated_duration"));
        }
        Ok(self)
    }
}

/// A scheduled study block, optionally linked to a task.
///
/// `task_title` and `subject` come from the LEFT JOIN against the linked
/// task and are omitted from JSON when the session is freestanding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: i64,
    pub user_id: String,
    pub task_id: Option<i64>,
    pub scheduled_start_at: DateTime<Utc>,
    pub scheduled_end_at: DateTime<Utc>,
    pub actual_start_at: Option<DateTime<Utc>>,
    pub actual_end_at: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub ai_suggested: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Create payload for a study session.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudySession {
    #[serde(default)]
    pub task_id: Option<i64>,
    pub scheduled_start_at: DateTime<Utc>,
    pub scheduled_end_at: DateTime<Utc>,
    #[serde(default)]
    pub ai_suggested: bool,
}

/// Per-user scheduling defaults. Exactly one row per user, created lazily
/// with defaults on first access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub id: i64,
    pub user_id: String,
    /// Time of day as "HH:MM".
    pub preferred_study_start_time: String,
    pub preferred_study_end_time: String,
    /// Minutes.
    pub break_duration: i64,
    /// Minutes.
    pub max_session_duration: i64,
    pub notification_enabled: bool,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for user preferences.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencesPatch {
    pub preferred_study_start_time: Option<String>,
    pub preferred_study_end_time: Option<String>,
    pub break_duration: Option<i64>,
    pub max_session_duration: Option<i64>,
    pub notification_enabled: Option<bool>,
    pub timezone: Option<String>,
}

impl PreferencesPatch {
    pub fn is_empty(&self) -> bool {
        self.preferred_study_start_time.is_none()
            && self.preferred_study_end_time.is_none()
            && self.break_duration.is_none()
            && self.max_session_duration.is_none()
            && self.notification_enabled.is_none()
            && self.timezone.is_none()
    }

    pub fn normalized(self) -> Result<Self, ValidationError> {
        if matches!(self.break_duration, Some(d) if d <= 0) {
            return Err(ValidationError::NotPositive("break_duration"));
        }
        if matches!(self.max_session_duration, Some(d) if d <= 0) {
            return Err(ValidationError::NotPositive("max_session_duration"));
        }
        Ok(self)
    }
}
