use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{CompletionError, CompletionService};
use crate::context::RoleEntry;

/// Fixed call parameters, taken from configuration and never from the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<RoleEntry>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    choices: Vec<Choice>,
}

impl CompletionResponse {
    /// Content of the first choice, if it holds any visible text.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .filter(|content| !content.trim().is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Detailed { message: String },
    Plain(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorField,
}

/// Pull a readable message out of a non-success response body.
///
/// Understands `{"error": {"message": ..}}` and `{"error": ".."}`; anything else
/// falls back to the status line.
pub fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: ErrorField::Detailed { message } | ErrorField::Plain(message),
        }) if !message.trim().is_empty() => message,
        _ => format!("API error {}", status),
    }
}

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// The widget normally points this at the relay, which holds the credential.
/// A key is only attached when one is configured explicitly.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    settings: CompletionSettings,
}

impl CompletionClient {
    pub fn new(endpoint: &str, settings: CompletionSettings) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            api_key: None,
            settings,
        }
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    pub async fn query(&self, messages: &[RoleEntry]) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            temperature: self.settings.temperature,
            messages: messages.to_vec(),
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            messages = request.messages.len(),
            "sending completion request"
        );

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CompletionError::transport(Some(error_message(status, &text))));
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .first_content()
            .map(str::to_string)
            .ok_or(CompletionError::EmptyCompletion)
    }
}

#[async_trait::async_trait]
impl CompletionService for CompletionClient {
    async fn complete(&self, messages: &[RoleEntry]) -> Result<String, CompletionError> {
        self.query(messages).await
    }
}
