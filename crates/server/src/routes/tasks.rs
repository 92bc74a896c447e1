// crates/server/src/routes/tasks.rs
//! Task CRUD endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use studyflow_core::{NewTask, Task, TaskPatch};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::routes::SuccessResponse;
use crate::state::AppState;

/// GET /api/tasks - List the owner's tasks.
///
/// Ordered by priority descending, then nearest deadline (tasks without a
/// deadline last), then newest first.
async fn list_tasks(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.db.list_tasks(&user.user_id).await?))
}

/// POST /api/tasks - Create a task. Returns 201 with the persisted row.
async fn create_task(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let payload = payload.normalized()?;
    let task = state.db.insert_task(&user.user_id, &payload).await?;
    tracing::info!(user_id = %user.user_id, task_id = task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/{id} - Partially update a task.
///
/// Only fields present in the body change. An empty body is a 400; an id
/// that does not exist (or belongs to someone else) is a 404.
async fn update_task(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(patch) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }
    let patch = patch.normalized()?;
    state
        .db
        .update_task(&user.user_id, id, &patch)
        .await?
        .map(Json)
        .ok_or(ApiError::TaskNotFound(id))
}

/// DELETE /api/tasks/{id} - Delete a task. Idempotent.
async fn delete_task(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<SuccessResponse>> {
    state.db.delete_task(&user.user_id, id).await?;
    tracing::info!(user_id = %user.user_id, task_id = id, "Task deleted");
    Ok(Json(SuccessResponse::ok()))
}

/// Create the task routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
}

#[cfg(test)]
mod tests {
    use crate::testing::{authed_request, body_json, request, test_app, USER_ONE, USER_TWO};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_list_tasks_requires_auth() {
        let app = test_app().await;
        let response = app
            .oneshot(request(Method::GET, "/api/tasks", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_tasks_empty() {
        let app = test_app().await;
        let response = app
            .oneshot(authed_request(Method::GET, "/api/tasks", USER_ONE, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_task_returns_201_with_row() {
        let app = test_app().await;
        let response = app
            .oneshot(authed_request(
                Method::POST,
                "/api/tasks",
                USER_ONE,
                Some(json!({"title": "Review calculus", "priority": 5})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["title"], "Review calculus");
        assert_eq!(body["priority"], 5);
        assert_eq!(body["is_completed"], false);
        assert!(body["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_create_task_blank_title_is_400() {
        let app = test_app().await;
        let response = app
            .oneshot(authed_request(
                Method::POST,
                "/api/tasks",
                USER_ONE,
                Some(json!({"title": "   "})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["details"].as_str().unwrap().contains("title"));
    }

    #[tokio::test]
    async fn test_create_task_malformed_body_is_400() {
        let app = test_app().await;
        let mut req = authed_request(Method::POST, "/api/tasks", USER_ONE, None);
        *req.body_mut() = axum::body::Body::from("{not json");
        req.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            "application/json".parse().unwrap(),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_task_clamps_priority() {
        let app = test_app().await;
        let response = app
            .oneshot(authed_request(
                Method::POST,
                "/api/tasks",
                USER_ONE,
                Some(json!({"title": "Overenthusiastic", "priority": 99})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["priority"], 5);
    }

    #[tokio::test]
    async fn test_update_empty_patch_is_400_and_leaves_row_untouched() {
        let app = test_app().await;
        let created = app
            .clone()
            .oneshot(authed_request(
                Method::POST,
                "/api/tasks",
                USER_ONE,
                Some(json!({"title": "Read chapter 3"})),
            ))
            .await
            .unwrap();
        let created = body_json(created).await;
        let id = created["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(authed_request(
                Method::PUT,
                &format!("/api/tasks/{id}"),
                USER_ONE,
                Some(json!({})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["details"]
            .as_str()
            .unwrap()
            .contains("No fields to update"));

        // the rejected patch never touched the stored row
        let listed = app
            .oneshot(authed_request(Method::GET, "/api/tasks", USER_ONE, None))
            .await
            .unwrap();
        let listed = body_json(listed).await;
        assert_eq!(listed[0]["updated_at"], created["updated_at"]);
    }

    #[tokio::test]
    async fn test_update_unknown_task_is_404() {
        let app = test_app().await;
        let response = app
            .oneshot(authed_request(
                Method::PUT,
                "/api/tasks/9999",
                USER_ONE,
                Some(json!({"is_completed": true})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_other_users_task_is_404() {
        let app = test_app().await;
        let created = app
            .clone()
            .oneshot(authed_request(
                Method::POST,
                "/api/tasks",
                USER_ONE,
                Some(json!({"title": "Private task"})),
            ))
            .await
            .unwrap();
        let id = body_json(created).await["id"].as_i64().unwrap();

        let response = app
            .oneshot(authed_request(
                Method::PUT,
                &format!("/api/tasks/{id}"),
                USER_TWO,
                Some(json!({"is_completed": true})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let app = test_app().await;
        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(authed_request(
                    Method::DELETE,
                    "/api/tasks/123",
                    USER_ONE,
                    None,
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await["success"], true);
        }
    }

    #[tokio::test]
    async fn test_task_lifecycle_end_to_end() {
        let app = test_app().await;

        // create a high-priority task with a deadline
        let created = app
            .clone()
            .oneshot(authed_request(
                Method::POST,
                "/api/tasks",
                USER_ONE,
                Some(json!({
                    "title": "Review calculus",
                    "priority": 5,
                    "deadline_at": "2025-01-10T10:00:00Z"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let id = body_json(created).await["id"].as_i64().unwrap();

        // a lower-priority task sorts after it
        app.clone()
            .oneshot(authed_request(
                Method::POST,
                "/api/tasks",
                USER_ONE,
                Some(json!({"title": "Tidy notes", "priority": 2})),
            ))
            .await
            .unwrap();

        let listed = app
            .clone()
            .oneshot(authed_request(Method::GET, "/api/tasks", USER_ONE, None))
            .await
            .unwrap();
        let tasks = body_json(listed).await;
        assert_eq!(tasks[0]["id"].as_i64().unwrap(), id);

        // complete it
        let updated = app
            .clone()
            .oneshot(authed_request(
                Method::PUT,
                &format!("/api/tasks/{id}"),
                USER_ONE,
                Some(json!({"is_completed": true})),
            ))
            .await
            .unwrap();
        assert_eq!(updated.status(), StatusCode::OK);
        assert_eq!(body_json(updated).await["is_completed"], true);

        // delete it, then it no longer lists
        let deleted = app
            .clone()
            .oneshot(authed_request(
                Method::DELETE,
                &format!("/api/tasks/{id}"),
                USER_ONE,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::OK);

        let listed = app
            .oneshot(authed_request(Method::GET, "/api/tasks", USER_ONE, None))
            .await
            .unwrap();
        let tasks = body_json(listed).await;
        assert!(tasks
            .as_array()
            .unwrap()
            .iter()
            .all(|t| t["id"].as_i64().unwrap() != id));
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let app = test_app().await;
        app.clone()
            .oneshot(authed_request(
                Method::POST,
                "/api/tasks",
                USER_ONE,
                Some(json!({"title": "Mine"})),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(authed_request(Method::GET, "/api/tasks", USER_TWO, None))
            .await
            .unwrap();
        assert_eq!(body_json(response).await, json!([]));
    }
}
