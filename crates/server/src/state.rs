// crates/server/src/state.rs
//! Application state for the Axum server.

use crate::auth::IdentityClient;
use std::sync::Arc;
use std::time::Instant;
use studyflow_core::suggest::SuggestionProvider;
use studyflow_db::Database;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Database handle for task/session/preference queries.
    pub db: Database,
    /// Identity service client for session verification.
    pub identity: Arc<dyn IdentityClient>,
    /// AI study-time suggestion provider.
    pub suggestions: Arc<dyn SuggestionProvider>,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(
        db: Database,
        identity: Arc<dyn IdentityClient>,
        suggestions: Arc<dyn SuggestionProvider>,
    ) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            db,
            identity,
            suggestions,
        })
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
