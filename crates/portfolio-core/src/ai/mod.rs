pub mod openai;

pub use openai::{CompletionClient, CompletionRequest, CompletionResponse, CompletionSettings};

use async_trait::async_trait;
use thiserror::Error;

use crate::context::RoleEntry;

/// Shown when a failure carries no usable message of its own.
pub const GENERIC_FAILURE: &str = "Erro desconhecido ao processar sua mensagem.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// The call did not complete: network failure, non-success status or an
    /// unexpected body shape.
    #[error("{0}")]
    Transport(String),

    #[error("Resposta da IA vazia ou inválida.")]
    EmptyCompletion,
}

impl CompletionError {
    /// Transport error from an optional upstream message, falling back to
    /// [`GENERIC_FAILURE`] when there is nothing readable.
    pub fn transport(message: Option<String>) -> Self {
        match message.map(|m| m.trim().to_string()) {
            Some(m) if !m.is_empty() => CompletionError::Transport(m),
            _ => CompletionError::Transport(GENERIC_FAILURE.to_string()),
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::transport(Some(err.to_string()))
    }
}

/// One request/response round trip against a language-model service.
///
/// Implementations never retry, stream or cache: every call is exactly one
/// outbound request, and a successful call always yields non-empty text.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, messages: &[RoleEntry]) -> Result<String, CompletionError>;
}
