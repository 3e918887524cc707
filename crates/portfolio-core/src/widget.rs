//! Assistant widget controller
//!
//! Owns the conversation and the visible widget state, and sequences a send:
//! append the user message, build the context, call the completion service,
//! then append either the reply or an inline error message.
//!
//! A send is split in two so a front end can keep handling input while the
//! call is outstanding: [`WidgetController::begin_send`] does the synchronous
//! half and hands back a [`PendingSend`]; [`WidgetController::finish_send`]
//! applies whatever the call produced. Overlapping sends are applied in the
//! order their results arrive.

use std::sync::Arc;

use crate::ai::{CompletionError, CompletionService};
use crate::context::{build_context, RoleEntry};
use crate::state::{Message, Sender, WidgetState};
use crate::store::MessageStore;

/// Prefix for failures shown in the transcript
pub const ERROR_PREFIX: &str = "Erro: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetPhase {
    Closed,
    Open,
}

/// Static text the widget is configured with
#[derive(Debug, Clone)]
pub struct Persona {
    /// System instructions sent ahead of every conversation
    pub instructions: String,
    /// Assistant message seeded on first open
    pub greeting: String,
}

/// Payload for a completion call that has been started but not applied
#[derive(Debug, Clone)]
pub struct PendingSend {
    pub sent_text: String,
    pub payload: Vec<RoleEntry>,
}

pub struct WidgetController {
    store: MessageStore,
    state: WidgetState,
    persona: Persona,
    client: Arc<dyn CompletionService>,
}

impl WidgetController {
    pub fn new(persona: Persona, client: Arc<dyn CompletionService>) -> Self {
        Self {
            store: MessageStore::new(),
            state: WidgetState::default(),
            persona,
            client,
        }
    }

    pub fn conversation(&self) -> &MessageStore {
        &self.store
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn phase(&self) -> WidgetPhase {
        if self.state.is_open {
            WidgetPhase::Open
        } else {
            WidgetPhase::Closed
        }
    }

    /// Shared handle to the completion service, for running calls off the UI task.
    pub fn client(&self) -> Arc<dyn CompletionService> {
        Arc::clone(&self.client)
    }

    pub fn toggle(&mut self) -> WidgetPhase {
        match self.phase() {
            WidgetPhase::Closed => self.open(),
            WidgetPhase::Open => self.state.is_open = false,
        }
        self.phase()
    }

    fn open(&mut self) {
        self.state.is_open = true;
        self.state.has_unread_notification = false;

        // Only an empty conversation gets the greeting, so it is seeded once.
        if self.store.is_empty() {
            if let Some(greeting) = Message::new(Sender::Assistant, self.persona.greeting.as_str()) {
                self.store.append(greeting);
            }
        }
    }

    pub fn set_draft_input(&mut self, text: impl Into<String>) {
        self.state.draft_input = text.into();
    }

    /// Synchronous half of a send.
    ///
    /// Returns `None` without touching anything when the draft is blank.
    /// Otherwise the payload is built from the conversation as it stood before
    /// this message, then the trimmed text is appended and the draft cleared.
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        let text = self.state.draft_input.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();

        let payload = build_context(&self.persona.instructions, self.store.all(), &text);
        self.store.append(Message::user(text.as_str()));
        self.state.draft_input.clear();

        Some(PendingSend {
            sent_text: text,
            payload,
        })
    }

    /// Apply the outcome of a completion call to the conversation.
    ///
    /// Failures become an ordinary assistant message; the user message that
    /// started the turn is never rolled back.
    pub fn finish_send(&mut self, outcome: Result<String, CompletionError>) {
        let message = match outcome {
            Ok(reply) => Message::new(Sender::Assistant, reply)
                .unwrap_or_else(|| error_message(&CompletionError::EmptyCompletion)),
            Err(err) => {
                tracing::warn!(error = %err, "assistant turn failed");
                error_message(&err)
            }
        };
        self.store.append(message);
    }

    /// Run a full send inline: begin, await the completion, finish.
    ///
    /// Returns `false` when the draft was blank and nothing happened.
    pub async fn send(&mut self) -> bool {
        let Some(pending) = self.begin_send() else {
            return false;
        };
        let outcome = self.client.complete(&pending.payload).await;
        self.finish_send(outcome);
        true
    }
}

fn error_message(err: &CompletionError) -> Message {
    Message::assistant(format!("{}{}", ERROR_PREFIX, err))
}
