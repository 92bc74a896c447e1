// crates/server/src/lib.rs
//! Studyflow server library.
//!
//! This crate provides the Axum-based HTTP server for the studyflow
//! application: task and study-session CRUD, per-user preferences, derived
//! statistics, and AI study-time suggestions, all behind a session-cookie
//! auth layer delegating to an external identity service.

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use std::sync::Arc;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (tasks, study sessions, preferences, stats, suggestions, auth)
/// - CORS for development (allows any origin)
/// - Request tracing
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Test Support
// ============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Method, Request, Response},
        Router,
    };
    use studyflow_core::suggest::{
        SuggestedSession, SuggestionError, SuggestionProvider, SuggestionRequest,
    };
    use studyflow_db::Database;

    use crate::auth::StaticIdentityClient;
    use crate::state::AppState;

    /// Session token for the first test user ("u1").
    pub const USER_ONE: &str = "tok-u1";
    /// Session token for the second test user ("u2").
    pub const USER_TWO: &str = "tok-u2";

    /// Canned suggestion provider: returns fixed sessions, or always fails.
    pub struct StubSuggestionProvider {
        sessions: Vec<SuggestedSession>,
        fail: bool,
    }

    impl StubSuggestionProvider {
        pub fn empty() -> Self {
            Self {
                sessions: Vec::new(),
                fail: false,
            }
        }

        pub fn with_sessions(sessions: Vec<SuggestedSession>) -> Self {
            Self {
                sessions,
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                sessions: Vec::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl SuggestionProvider for StubSuggestionProvider {
        async fn suggest(
            &self,
            _request: &SuggestionRequest,
        ) -> Result<Vec<SuggestedSession>, SuggestionError> {
            if self.fail {
                return Err(SuggestionError::Status(503));
            }
            Ok(self.sessions.clone())
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    /// AppState over an in-memory database with two known sessions.
    pub async fn test_state() -> Arc<AppState> {
        test_state_with_suggestions(StubSuggestionProvider::empty()).await
    }

    pub async fn test_state_with_suggestions(provider: StubSuggestionProvider) -> Arc<AppState> {
        let db = Database::new_in_memory().await.expect("in-memory DB");
        let identity = Arc::new(StaticIdentityClient::new(&[
            (USER_ONE, "u1"),
            (USER_TWO, "u2"),
        ]));
        AppState::new(db, identity, Arc::new(provider))
    }

    /// A fully-wired router over a fresh in-memory database.
    pub async fn test_app() -> Router {
        crate::create_app(test_state().await)
    }

    pub async fn test_app_with_suggestions(provider: StubSuggestionProvider) -> Router {
        crate::create_app(test_state_with_suggestions(provider).await)
    }

    /// Build an unauthenticated request, with an optional JSON body.
    pub fn request(method: Method, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    /// Build a request carrying the given session token as a cookie.
    pub fn authed_request(
        method: Method,
        uri: &str,
        token: &str,
        body: Option<serde_json::Value>,
    ) -> Request<Body> {
        let mut request = request(method, uri, body);
        request.headers_mut().insert(
            header::COOKIE,
            format!("studyflow_session={token}").parse().unwrap(),
        );
        request
    }

    /// Read a response body as JSON.
    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }
}

// ============================================================================
// Integration Tests
// ============================================================================
