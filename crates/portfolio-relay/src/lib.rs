//! Same-origin relay for the assistant widget
//!
//! The widget posts its completion request here without any credential. The
//! relay pins the model and temperature to its own configuration, attaches the
//! upstream API key and forwards the call exactly once, handing back the
//! upstream status and body untouched.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use portfolio_core::ai::{CompletionRequest, CompletionSettings};
use portfolio_core::config::RELAY_COMPLETIONS_PATH;
use portfolio_core::Config;
use serde_json::json;

pub struct RelayState {
    client: reqwest::Client,
    upstream_url: String,
    api_key: String,
    settings: CompletionSettings,
}

impl RelayState {
    pub fn new(upstream_url: &str, api_key: &str, settings: CompletionSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            upstream_url: upstream_url.to_string(),
            api_key: api_key.to_string(),
            settings,
        }
    }

    /// Build relay state from config. Refuses to run without an API key.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .openai_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow!("OPENAI_API_KEY is not set; the relay needs it to reach {}", config.upstream_url()))?;

        Ok(Self::new(
            config.upstream_url(),
            api_key,
            config.completion_settings(),
        ))
    }
}

pub fn router(state: Arc<RelayState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(RELAY_COMPLETIONS_PATH, post(relay_completion))
        .with_state(state)
}

/// Serve until `shutdown` resolves.
pub async fn serve(
    addr: SocketAddr,
    state: Arc<RelayState>,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "relay listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("relay stopped");
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": { "message": message } }))).into_response()
}

async fn relay_completion(
    State(state): State<Arc<RelayState>>,
    Json(mut request): Json<CompletionRequest>,
) -> Response {
    if request.messages.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "messages must not be empty");
    }

    // The widget does not get to choose these.
    request.model = state.settings.model.clone();
    request.temperature = state.settings.temperature;

    tracing::debug!(
        model = %request.model,
        messages = request.messages.len(),
        "forwarding completion request"
    );

    let upstream = match state
        .client
        .post(&state.upstream_url)
        .bearer_auth(&state.api_key)
        .json(&request)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "upstream completion request failed");
            return error_response(StatusCode::BAD_GATEWAY, &e.to_string());
        }
    };

    let status = StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    if !status.is_success() {
        tracing::warn!(%status, "upstream returned an error status");
    }

    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();

    match upstream.bytes().await {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, content_type)],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read upstream body");
            error_response(StatusCode::BAD_GATEWAY, &e.to_string())
        }
    }
}
