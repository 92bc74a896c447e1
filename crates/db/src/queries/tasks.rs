// crates/db/src/queries/tasks.rs
//! Task CRUD queries.

use chrono::{DateTime, Utc};
use studyflow_core::{NewTask, Task, TaskPatch};

use crate::{Database, DbResult};

type TaskRow = (
    i64,                   // id
    String,                // user_id
    String,                // title
    Option<String>,        // description
    i64,                   // priority
    Option<i64>,           // estimated_duration
    Option<DateTime<Utc>>, // deadline_at
    Option<String>,        // subject
    bool,                  // is_completed
    DateTime<Utc>,         // created_at
    DateTime<Utc>,         // updated_at
);

const TASK_COLUMNS: &str = "id, user_id, title, description, priority, estimated_duration, \
                            deadline_at, subject, is_completed, created_at, updated_at";

fn task_from_row(row: TaskRow) -> Task {
    Task {
        id: row.0,
        user_id: row.1,
        title: row.2,
        description: row.3,
        priority: row.4,
        estimated_duration: row.5,
        deadline_at: row.6,
        subject: row.7,
        is_completed: row.8,
        created_at: row.9,
        updated_at: row.10,
    }
}

impl Database {
    /// All of a user's tasks: priority descending, then deadline ascending
    /// with missing deadlines last, then newest first.
    pub async fn list_tasks(&self, user_id: &str) -> DbResult<Vec<Task>> {
        let rows: Vec<TaskRow> = sqlx::query_as(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ? \
             ORDER BY priority DESC, deadline_at IS NULL, deadline_at ASC, created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(task_from_row).collect())
    }

    /// Insert a validated task payload and return the persisted row.
    pub async fn insert_task(&self, user_id: &str, task: &NewTask) -> DbResult<Task> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO tasks (user_id, title, description, priority, estimated_duration, \
             deadline_at, subject, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.priority)
        .bind(task.estimated_duration)
        .bind(task.deadline_at)
        .bind(&task.subject)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_task_by_id(result.last_insert_rowid()).await
    }

    /// Apply a patch to the owner's matching task, refreshing `updated_at`.
    ///
    /// Returns `Ok(None)` when no row matched (wrong id or wrong owner).
    /// Callers reject empty patches before reaching this method.
    pub async fn update_task(
        &self,
        user_id: &str,
        id: i64,
        patch: &TaskPatch,
    ) -> DbResult<Option<Task>> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE tasks SET \
                title = COALESCE(?1, title), \
                description = COALESCE(?2, description), \
                priority = COALESCE(?3, priority), \
                estimated_duration = COALESCE(?4, estimated_duration), \
                deadline_at = COALESCE(?5, deadline_at), \
                subject = COALESCE(?6, subject), \
                is_completed = COALESCE(?7, is_completed), \
                updated_at = ?8 \
             WHERE user_id = ?9 AND id = ?10",
        )
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.priority)
        .bind(patch.estimated_duration)
        .bind(patch.deadline_at)
        .bind(&patch.subject)
        .bind(patch.is_completed)
        .bind(now)
        .bind(user_id)
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let row: TaskRow = sqlx::query_as(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ? AND id = ?"
        ))
        .bind(user_id)
        .bind(id)
        .fetch_one(self.pool())
        .await?;
        Ok(Some(task_from_row(row)))
    }

    /// Whether the owner has a task with this id.
    pub async fn task_exists(&self, user_id: &str, id: i64) -> DbResult<bool> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM tasks WHERE user_id = ? AND id = ?")
                .bind(user_id)
                .bind(id)
                .fetch_optional(self.pool())
                .await?;
        Ok(row.is_some())
    }

    /// Delete the owner's matching task. Idempotent: deleting an absent row
    /// is not an error.
    pub async fn delete_task(&self, user_id: &str, id: i64) -> DbResult<()> {
        sqlx::query("DELETE FROM tasks WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn get_task_by_id(&self, id: i64) -> DbResult<Task> {
        let row: TaskRow =
            sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
                .bind(id)
                .fetch_one(self.pool())
                .await?;
        Ok(task_from_row(row))
    }
}
