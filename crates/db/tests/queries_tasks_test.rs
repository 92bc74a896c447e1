//! Integration tests for task query methods: ordering and ownership.

use chrono::{Duration, Utc};
use studyflow_core::{NewTask, TaskPatch, DEFAULT_PRIORITY};
use studyflow_db::Database;

fn task(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: None,
        priority: DEFAULT_PRIORITY,
        estimated_duration: None,
        deadline_at: None,
        subject: None,
    }
}

#[tokio::test]
async fn test_list_orders_priority_then_deadline_nulls_last() {
    let db = Database::new_in_memory().await.unwrap();
    let now = Utc::now();

    let mut low = task("low priority");
    low.priority = 1;
    let mut high_late = task("high, far deadline");
    high_late.priority = 5;
    high_late.deadline_at = Some(now + Duration::days(10));
    let mut high_soon = task("high, near deadline");
    high_soon.priority = 5;
    high_soon.deadline_at = Some(now + Duration::days(1));
    let mut high_open = task("high, no deadline");
    high_open.priority = 5;

    db.insert_task("u1", &low).await.unwrap();
    db.insert_task("u1", &high_late).await.unwrap();
    db.insert_task("u1", &high_soon).await.unwrap();
    db.insert_task("u1", &high_open).await.unwrap();

    let titles: Vec<String> = db
        .list_tasks("u1")
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(
        titles,
        vec![
            "high, near deadline",
            "high, far deadline",
            "high, no deadline",
            "low priority",
        ]
    );
}

#[tokio::test]
async fn test_list_ties_break_by_newest_created() {
    let db = Database::new_in_memory().await.unwrap();
    db.insert_task("u1", &task("older")).await.unwrap();
    db.insert_task("u1", &task("newer")).await.unwrap();

    let tasks = db.list_tasks("u1").await.unwrap();
    assert_eq!(tasks[0].title, "newer");
    assert_eq!(tasks[1].title, "older");
}

#[tokio::test]
async fn test_list_only_returns_owner_rows() {
    let db = Database::new_in_memory().await.unwrap();
    db.insert_task("u1", &task("mine")).await.unwrap();
    db.insert_task("u2", &task("theirs")).await.unwrap();

    let tasks = db.list_tasks("u1").await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "mine");
}

#[tokio::test]
async fn test_update_foreign_task_behaves_as_not_found() {
    let db = Database::new_in_memory().await.unwrap();
    let theirs = db.insert_task("u2", &task("theirs")).await.unwrap();

    let patch = TaskPatch {
        is_completed: Some(true),
        ..TaskPatch::default()
    };
    // the id exists, but not for this owner
    assert!(db.update_task("u1", theirs.id, &patch).await.unwrap().is_none());

    let untouched = &db.list_tasks("u2").await.unwrap()[0];
    assert!(!untouched.is_completed);
    assert_eq!(untouched.updated_at, theirs.updated_at);
}

#[tokio::test]
async fn test_delete_foreign_task_is_a_noop() {
    let db = Database::new_in_memory().await.unwrap();
    let theirs = db.insert_task("u2", &task("theirs")).await.unwrap();

    db.delete_task("u1", theirs.id).await.unwrap();

    assert_eq!(db.list_tasks("u2").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_full_lifecycle() {
    let db = Database::new_in_memory().await.unwrap();
    let mut payload = task("Review calculus");
    payload.priority = 5;
    payload.deadline_at = Some(Utc::now() + Duration::days(2));

    let created = db.insert_task("u1", &payload).await.unwrap();
    assert!(!created.is_completed);

    // priority 5 sorts first
    db.insert_task("u1", &task("filler")).await.unwrap();
    let listed = db.list_tasks("u1").await.unwrap();
    assert_eq!(listed[0].id, created.id);

    let patch = TaskPatch {
        is_completed: Some(true),
        ..TaskPatch::default()
    };
    let completed = db.update_task("u1", created.id, &patch).await.unwrap().unwrap();
    assert!(completed.is_completed);
    assert!(completed.updated_at > created.updated_at);

    db.delete_task("u1", created.id).await.unwrap();
    let remaining = db.list_tasks("u1").await.unwrap();
    assert!(remaining.iter().all(|t| t.id != created.id));
}
