/// Inline SQL migrations for the studyflow database schema.
///
/// We use simple inline migrations rather than sqlx migration files
/// because the schema is small and self-contained. Timestamps are stored
/// as ISO-8601 TEXT; booleans as INTEGER 0/1.

pub const MIGRATIONS: &[&str] = &[
    // Migration 1: tasks table
    r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    priority INTEGER NOT NULL DEFAULT 3,
    estimated_duration INTEGER,
    deadline_at TEXT,
    subject TEXT,
    is_completed BOOLEAN NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#,
    // Migration 2: tasks owner index
    r#"
CREATE INDEX IF NOT EXISTS idx_tasks_user ON tasks(user_id);
"#,
    // Migration 3: study_sessions table
    r#"
CREATE TABLE IF NOT EXISTS study_sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    task_id INTEGER REFERENCES tasks(id),
    scheduled_start_at TEXT NOT NULL,
    scheduled_end_at TEXT NOT NULL,
    actual_start_at TEXT,
    actual_end_at TEXT,
    is_completed BOOLEAN NOT NULL DEFAULT 0,
    ai_suggested BOOLEAN NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#,
    // Migrations 4-5: study_sessions indexes
    r#"
CREATE INDEX IF NOT EXISTS idx_study_sessions_user ON study_sessions(user_id);
"#,
    r#"
CREATE INDEX IF NOT EXISTS idx_study_sessions_task ON study_sessions(task_id);
"#,
    // Migration 6: user_preferences table (one row per user, lazily
    // created with these defaults on first access)
    r#"
CREATE TABLE IF NOT EXISTS user_preferences (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL UNIQUE,
    preferred_study_start_time TEXT NOT NULL DEFAULT '09:00',
    preferred_study_end_time TEXT NOT NULL DEFAULT '21:00',
    break_duration INTEGER NOT NULL DEFAULT 15,
    max_session_duration INTEGER NOT NULL DEFAULT 120,
    notification_enabled BOOLEAN NOT NULL DEFAULT 0,
    timezone TEXT NOT NULL DEFAULT 'UTC',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#,
];
