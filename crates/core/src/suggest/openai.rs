// crates/core/src/suggest/openai.rs
//! OpenAI-compatible chat-completion provider.
//!
//! One blocking call per invocation: POST /chat/completions in JSON-object
//! output mode, then parse `choices[0].message.content` into validated
//! session candidates.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::prompt::build_prompt;
use super::provider::SuggestionProvider;
use super::types::{parse_reply, SuggestedSession, SuggestionError, SuggestionRequest};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point at a compatible endpoint (Azure, local proxy, test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        // trailing slash would double up in the request path
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl SuggestionProvider for OpenAiProvider {
    async fn suggest(
        &self,
        request: &SuggestionRequest,
    ) -> Result<Vec<SuggestedSession>, SuggestionError> {
        let prompt = build_prompt(request);
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "response_format": {"type": "json_object"},
            "temperature": 0.7,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestionError::Status(status.as_u16()));
        }

        let completion: ChatCompletion = response.json().await?;
        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or(SuggestionError::EmptyCompletion)?;

        debug!(model = %self.model, reply_bytes = content.len(), "suggestion reply received");
        parse_reply(content)
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
