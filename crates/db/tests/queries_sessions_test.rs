//! Integration tests for study session queries and the task join.

use chrono::{TimeZone, Utc};
use studyflow_core::{NewStudySession, NewTask, DEFAULT_PRIORITY};
use studyflow_db::Database;

fn session_at(hour: u32) -> NewStudySession {
    NewStudySession {
        task_id: None,
        scheduled_start_at: Utc.with_ymd_and_hms(2025, 1, 10, hour, 0, 0).unwrap(),
        scheduled_end_at: Utc.with_ymd_and_hms(2025, 1, 10, hour + 1, 0, 0).unwrap(),
        ai_suggested: false,
    }
}

#[tokio::test]
async fn test_linked_session_carries_task_metadata() {
    let db = Database::new_in_memory().await.unwrap();
    let task = db
        .insert_task(
            "u1",
            &NewTask {
                title: "Review calculus".to_string(),
                description: None,
                priority: DEFAULT_PRIORITY,
                estimated_duration: None,
                deadline_at: None,
                subject: Some("Math".to_string()),
            },
        )
        .await
        .unwrap();

    let mut payload = session_at(9);
    payload.task_id = Some(task.id);
    payload.ai_suggested = true;
    let session = db.insert_session("u1", &payload).await.unwrap();

    assert_eq!(session.task_id, Some(task.id));
    assert_eq!(session.task_title.as_deref(), Some("Review calculus"));
    assert_eq!(session.subject.as_deref(), Some("Math"));
    assert!(session.ai_suggested);
}

#[tokio::test]
async fn test_freestanding_session_has_no_join_fields() {
    let db = Database::new_in_memory().await.unwrap();
    let session = db.insert_session("u1", &session_at(9)).await.unwrap();
    assert!(session.task_title.is_none());
    assert!(session.subject.is_none());
}

#[tokio::test]
async fn test_join_survives_listing() {
    let db = Database::new_in_memory().await.unwrap();
    let task = db
        .insert_task(
            "u1",
            &NewTask {
                title: "Read chapter 4".to_string(),
                description: None,
                priority: DEFAULT_PRIORITY,
                estimated_duration: None,
                deadline_at: None,
                subject: None,
            },
        )
        .await
        .unwrap();

    let mut linked = session_at(14);
    linked.task_id = Some(task.id);
    db.insert_session("u1", &linked).await.unwrap();
    db.insert_session("u1", &session_at(9)).await.unwrap();

    let sessions = db.list_sessions("u1").await.unwrap();
    assert_eq!(sessions.len(), 2);
    // earliest first; the linked one is second
    assert!(sessions[0].task_title.is_none());
    assert_eq!(sessions[1].task_title.as_deref(), Some("Read chapter 4"));
}

#[tokio::test]
async fn test_sessions_scoped_to_owner() {
    let db = Database::new_in_memory().await.unwrap();
    let theirs = db.insert_session("u2", &session_at(9)).await.unwrap();

    assert!(db.list_sessions("u1").await.unwrap().is_empty());

    db.delete_session("u1", theirs.id).await.unwrap();
    assert_eq!(db.list_sessions("u2").await.unwrap().len(), 1);
}
