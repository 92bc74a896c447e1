// crates/core/src/lib.rs
//! Core domain logic for studyflow: entities and payload validation,
//! derived task statistics, the Pomodoro countdown state machine, and the
//! AI study-time suggestion bridge.

pub mod pomodoro;
pub mod stats;
pub mod suggest;
pub mod types;

pub use types::{
    NewStudySession, NewTask, PreferencesPatch, StudySession, Task, TaskPatch, UserPreferences,
    ValidationError, DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY,
};
