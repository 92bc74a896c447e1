// crates/server/src/main.rs
//! Studyflow server binary.
//!
//! Opens (or creates) the SQLite database, wires the identity and suggestion
//! providers from the environment, and serves the HTTP API on localhost.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use studyflow_core::suggest::{OpenAiProvider, SuggestionProvider};
use studyflow_db::Database;
use studyflow_server::auth::HttpIdentityClient;
use studyflow_server::{create_app, AppState};

/// Default port for the server.
const DEFAULT_PORT: u16 = 47621;

/// Get the server port from environment or use default.
fn get_port() -> u16 {
    std::env::var("STUDYFLOW_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Build the OpenAI-compatible suggestion provider from the environment.
///
/// `OPENAI_API_KEY` is required; `OPENAI_BASE_URL` and `OPENAI_MODEL` are
/// optional overrides for self-hosted or alternative endpoints.
fn build_suggestion_provider() -> Result<OpenAiProvider> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY is not set"))?;

    let mut provider = OpenAiProvider::new(api_key);
    if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
        provider = provider.with_base_url(base_url);
    }
    if let Ok(model) = std::env::var("OPENAI_MODEL") {
        provider = provider.with_model(model);
    }
    Ok(provider)
}

/// Build the identity service client from the environment.
fn build_identity_client() -> Result<HttpIdentityClient> {
    let base_url = std::env::var("IDENTITY_API_URL")
        .map_err(|_| anyhow::anyhow!("IDENTITY_API_URL is not set"))?;
    let api_key = std::env::var("IDENTITY_API_KEY")
        .map_err(|_| anyhow::anyhow!("IDENTITY_API_KEY is not set"))?;
    Ok(HttpIdentityClient::new(base_url, api_key))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    eprintln!("\n\u{1f4da} studyflow v{}\n", env!("CARGO_PKG_VERSION"));

    // Open database: explicit path override, else the platform data dir.
    let db = match std::env::var("STUDYFLOW_DB") {
        Ok(path) => Database::new(&PathBuf::from(path)).await?,
        Err(_) => Database::open_default().await?,
    };
    tracing::info!(path = %db.db_path().display(), "Database ready");

    let identity = Arc::new(build_identity_client()?);
    let suggestions = Arc::new(build_suggestion_provider()?);
    tracing::info!(
        provider = suggestions.name(),
        model = suggestions.model(),
        "Suggestion provider configured"
    );

    let state = AppState::new(db, identity, suggestions);
    let app = create_app(state);

    let port = get_port();
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("  \u{2713} Listening on http://{addr}\n");

    axum::serve(listener, app).await?;
    Ok(())
}
