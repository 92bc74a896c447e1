// crates/db/src/queries/study_sessions.rs
//! Study session CRUD queries.
//!
//! Reads LEFT JOIN the linked task so freestanding sessions still come back
//! with `task_title`/`subject` absent rather than erroring. The join is
//! scoped to the session owner, so a `task_id` pointing at another user's
//! task never surfaces that task's metadata.

use chrono::{DateTime, Utc};
use studyflow_core::{NewStudySession, StudySession};

use crate::{Database, DbResult};

type SessionRow = (
    i64,                   // id
    String,                // user_id
    Option<i64>,           // task_id
    DateTime<Utc>,         // scheduled_start_at
    DateTime<Utc>,         // scheduled_end_at
    Option<DateTime<Utc>>, // actual_start_at
    Option<DateTime<Utc>>, // actual_end_at
    bool,                  // is_completed
    bool,                  // ai_suggested
    DateTime<Utc>,         // created_at
    DateTime<Utc>,         // updated_at
    Option<String>,        // task_title (joined)
    Option<String>,        // subject (joined)
);

const SESSION_SELECT: &str = "SELECT s.id, s.user_id, s.task_id, s.scheduled_start_at, \
    s.scheduled_end_at, s.actual_start_at, s.actual_end_at, s.is_completed, s.ai_suggested, \
    s.created_at, s.updated_at, t.title, t.subject \
    FROM study_sessions s \
    LEFT JOIN tasks t ON s.task_id = t.id AND t.user_id = s.user_id";

fn session_from_row(row: SessionRow) -> StudySession {
    StudySession {
        id: row.0,
        user_id: row.1,
        task_id: row.2,
        scheduled_start_at: row.3,
        scheduled_end_at: row.4,
        actual_start_at: row.5,
        actual_end_at: row.6,
        is_completed: row.7,
        ai_suggested: row.8,
        created_at: row.9,
        updated_at: row.10,
        task_title: row.11,
        subject: row.12,
    }
}

impl Database {
    /// All of a user's sessions with joined task metadata, earliest
    /// scheduled start first.
    pub async fn list_sessions(&self, user_id: &str) -> DbResult<Vec<StudySession>> {
        let rows: Vec<SessionRow> = sqlx::query_as(&format!(
            "{SESSION_SELECT} WHERE s.user_id = ? ORDER BY s.scheduled_start_at ASC"
        ))
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(session_from_row).collect())
    }

    /// Insert a session and return the persisted row joined with task
    /// metadata.
    pub async fn insert_session(
        &self,
        user_id: &str,
        session: &NewStudySession,
    ) -> DbResult<StudySession> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO study_sessions (user_id, task_id, scheduled_start_at, \
             scheduled_end_at, ai_suggested, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(session.task_id)
        .bind(session.scheduled_start_at)
        .bind(session.scheduled_end_at)
        .bind(session.ai_suggested)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        let row: SessionRow = sqlx::query_as(&format!("{SESSION_SELECT} WHERE s.id = ?"))
            .bind(result.last_insert_rowid())
            .fetch_one(self.pool())
            .await?;
        Ok(session_from_row(row))
    }

    /// Delete the owner's matching session. Idempotent.
    pub async fn delete_session(&self, user_id: &str, id: i64) -> DbResult<()> {
        sqlx::query("DELETE FROM study_sessions WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
