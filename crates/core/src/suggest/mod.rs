// crates/core/src/suggest/mod.rs
//! AI study-time suggestion bridge.
//!
//! Formats task/session/preference context into a natural-language prompt,
//! calls an external chat-completion service configured for JSON output, and
//! parses the reply into session candidates. The call is best-effort: any
//! failure surfaces as a `SuggestionError`, there is no retry and no partial
//! recovery. The model's reply is treated as untrusted input and must pass
//! the same schema validation as user payloads before anyone persists it.

pub mod openai;
pub mod prompt;
pub mod provider;
pub mod types;

pub use openai::OpenAiProvider;
pub use prompt::build_prompt;
pub use provider::SuggestionProvider;
pub use types::{
    parse_reply, SessionWindow, StudyWindow, SuggestedSession, SuggestionError, SuggestionRequest,
    TaskContext,
};
