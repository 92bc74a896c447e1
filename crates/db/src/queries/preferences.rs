// crates/db/src/queries/preferences.rs
//! User preferences queries: lazily-created single row per user.

use chrono::{DateTime, Utc};
use studyflow_core::{PreferencesPatch, UserPreferences};

use crate::{Database, DbResult};

type PreferencesRow = (
    i64,           // id
    String,        // user_id
    String,        // preferred_study_start_time
    String,        // preferred_study_end_time
    i64,           // break_duration
    i64,           // max_session_duration
    bool,          // notification_enabled
    String,        // timezone
    DateTime<Utc>, // created_at
    DateTime<Utc>, // updated_at
);

const PREFERENCES_COLUMNS: &str = "id, user_id, preferred_study_start_time, \
    preferred_study_end_time, break_duration, max_session_duration, notification_enabled, \
    timezone, created_at, updated_at";

fn preferences_from_row(row: PreferencesRow) -> UserPreferences {
    UserPreferences {
        id: row.0,
        user_id: row.1,
        preferred_study_start_time: row.2,
        preferred_study_end_time: row.3,
        break_duration: row.4,
        max_session_duration: row.5,
        notification_enabled: row.6,
        timezone: row.7,
        created_at: row.8,
        updated_at: row.9,
    }
}

impl Database {
    /// The user's preferences row, created with schema defaults on first
    /// access. The UNIQUE constraint on `user_id` plus INSERT OR IGNORE
    /// keeps creation idempotent under concurrent first reads.
    pub async fn get_or_create_preferences(&self, user_id: &str) -> DbResult<UserPreferences> {
        let now = Utc::now();
        sqlx::query(
            "INSERT OR IGNORE INTO user_preferences (user_id, created_at, updated_at) \
             VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        let row: PreferencesRow = sqlx::query_as(&format!(
            "SELECT {PREFERENCES_COLUMNS} FROM user_preferences WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_one(self.pool())
        .await?;
        Ok(preferences_from_row(row))
    }

    /// Apply a partial update, refreshing `updated_at`. The row is created
    /// with defaults first if this user never fetched their preferences.
    /// Callers reject empty patches before reaching this method.
    pub async fn update_preferences(
        &self,
        user_id: &str,
        patch: &PreferencesPatch,
    ) -> DbResult<UserPreferences> {
        // ensure the row exists so an early PUT behaves like GET-then-PUT
        self.get_or_create_preferences(user_id).await?;

        let now = Utc::now();
        sqlx::query(
            "UPDATE user_preferences SET \
                preferred_study_start_time = COALESCE(?1, preferred_study_start_time), \
                preferred_study_end_time = COALESCE(?2, preferred_study_end_time), \
                break_duration = COALESCE(?3, break_duration), \
                max_session_duration = COALESCE(?4, max_session_duration), \
                notification_enabled = COALESCE(?5, notification_enabled), \
                timezone = COALESCE(?6, timezone), \
                updated_at = ?7 \
             WHERE user_id = ?8",
        )
        .bind(&patch.preferred_study_start_time)
        .bind(&patch.preferred_study_end_time)
        .bind(patch.break_duration)
        .bind(patch.max_session_duration)
        .bind(patch.notification_enabled)
        .bind(&patch.timezone)
        .bind(now)
        .bind(user_id)
        .execute(self.pool())
        .await?;

        let row: PreferencesRow = sqlx::query_as(&format!(
            "SELECT {PREFERENCES_COLUMNS} FROM user_preferences WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_one(self.pool())
        .await?;
        Ok(preferences_from_row(row))
    }
}
