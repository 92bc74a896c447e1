// crates/core/src/suggest/provider.rs
//! SuggestionProvider trait defining the interface for scheduler backends.

use async_trait::async_trait;

use super::types::{SuggestedSession, SuggestionError, SuggestionRequest};

/// Trait for services that can propose study sessions.
///
/// The production implementation is `OpenAiProvider`; tests substitute
/// static stubs behind the same seam.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Propose study sessions for the given tasks, schedule, and
    /// preferences. Best-effort: callers treat any error as a generic
    /// upstream failure.
    async fn suggest(
        &self,
        request: &SuggestionRequest,
    ) -> Result<Vec<SuggestedSession>, SuggestionError>;

    /// Provider name for logging (e.g. "openai").
    fn name(&self) -> &str;

    /// Model identifier (e.g. "gpt-4o-mini").
    fn model(&self) -> &str;
}
