// crates/server/src/auth.rs
//! Session-cookie authentication backed by an external identity service.
//!
//! The server never stores credentials itself. A `studyflow_session` cookie
//! carries an opaque token which is exchanged with the identity service for
//! the owning user id on every authenticated request.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the session cookie issued on login.
pub const SESSION_COOKIE: &str = "studyflow_session";

const IDENTITY_TIMEOUT_SECS: u64 = 10;

/// Errors from the identity service client.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("identity request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("identity service returned HTTP {0}")]
    Status(u16),
}

/// A verified session: the user it belongs to and the token that proves it.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionInfo {
    pub user_id: String,
    pub session_token: String,
}

/// Client for the external identity service.
///
/// `login_url` asks the service where to send a user who wants to log in,
/// `exchange_code` turns a one-time login code into a session token,
/// `verify_session` resolves a token to its user, and `revoke_session`
/// invalidates a token on logout.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn login_url(&self) -> Result<String, AuthError>;
    async fn exchange_code(&self, code: &str) -> Result<SessionInfo, AuthError>;
    async fn verify_session(&self, token: &str) -> Result<Option<String>, AuthError>;
    async fn revoke_session(&self, token: &str) -> Result<(), AuthError>;
}

/// HTTP implementation of [`IdentityClient`].
pub struct HttpIdentityClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpIdentityClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VerifyReply {
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginUrlReply {
    login_url: String,
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn login_url(&self) -> Result<String, AuthError> {
        let response = self
            .client
            .get(format!("{}/login-url", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(IDENTITY_TIMEOUT_SECS))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::Status(response.status().as_u16()));
        }

        Ok(response.json::<LoginUrlReply>().await?.login_url)
    }

    async fn exchange_code(&self, code: &str) -> Result<SessionInfo, AuthError> {
        let response = self
            .client
            .post(format!("{}/sessions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(IDENTITY_TIMEOUT_SECS))
            .json(&serde_json::json!({ "code": code }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::Status(response.status().as_u16()));
        }

        Ok(response.json::<SessionInfo>().await?)
    }

    async fn verify_session(&self, token: &str) -> Result<Option<String>, AuthError> {
        let response = self
            .client
            .get(format!("{}/sessions/verify", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(IDENTITY_TIMEOUT_SECS))
            .query(&[("token", token)])
            .send()
            .await?;

        // An unknown or expired token is not an identity-service failure.
        if response.status().as_u16() == 404 {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AuthError::Status(response.status().as_u16()));
        }

        Ok(response.json::<VerifyReply>().await?.user_id)
    }

    async fn revoke_session(&self, token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .delete(format!("{}/sessions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(IDENTITY_TIMEOUT_SECS))
            .query(&[("token", token)])
            .send()
            .await?;

        if !response.status().is_success() && response.status().as_u16() != 404 {
            return Err(AuthError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Extract the value of a named cookie from a `Cookie` header string.
pub(crate) fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// The authenticated user for a request, resolved from the session cookie.
///
/// Rejects with 401 when the cookie is missing or the token does not map to
/// a user. Identity-service outages surface as 500, not 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub session_token: String,
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let cookies = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing session cookie".to_string()))?;

        let token = cookie_value(cookies, SESSION_COOKIE)
            .ok_or_else(|| ApiError::Unauthorized("missing session cookie".to_string()))?;

        match state.identity.verify_session(token).await? {
            Some(user_id) => Ok(AuthUser {
                user_id,
                session_token: token.to_string(),
            }),
            None => Err(ApiError::Unauthorized("invalid session".to_string())),
        }
    }
}

/// In-memory identity client with a fixed token table, for tests.
#[cfg(test)]
pub struct StaticIdentityClient {
    sessions: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl StaticIdentityClient {
    pub fn new(sessions: &[(&str, &str)]) -> Self {
        Self {
            sessions: sessions
                .iter()
                .map(|(token, user)| (token.to_string(), user.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl IdentityClient for StaticIdentityClient {
    async fn login_url(&self) -> Result<String, AuthError> {
        Ok("https://identity.test/login".to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<SessionInfo, AuthError> {
        // Codes are "code-for-<token>" in tests.
        let token = code.strip_prefix("code-for-").unwrap_or(code);
        match self.sessions.get(token) {
            Some(user_id) => Ok(SessionInfo {
                user_id: user_id.clone(),
                session_token: token.to_string(),
            }),
            None => Err(AuthError::Status(401)),
        }
    }

    async fn verify_session(&self, token: &str) -> Result<Option<String>, AuthError> {
        Ok(self.sessions.get(token).cloned())
    }

    async fn revoke_session(&self, _token: &str) -> Result<(), AuthError> {
        Ok(())
    }
}
