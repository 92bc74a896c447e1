// crates/db/src/queries/mod.rs
// Owner-scoped CRUD operations for the studyflow SQLite database.

mod preferences;
mod study_sessions;
mod tasks;
