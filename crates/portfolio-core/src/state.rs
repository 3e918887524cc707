//! UI-agnostic conversation types
//!
//! These are shared between the widget controller, the context builder and any
//! front end that renders the transcript. None of them depend on a UI framework.

use serde::{Deserialize, Serialize};

/// Who produced a message in the widget transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One utterance in the conversation.
///
/// Fields are private so a message cannot change after it has been appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    text: String,
    sender: Sender,
}

impl Message {
    /// Build a message, rejecting text that is blank after trimming.
    pub fn new(sender: Sender, text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self { text, sender })
    }

    pub(crate) fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub(crate) fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Assistant,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }
}

/// Visibility and draft state owned by the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    pub is_open: bool,
    pub has_unread_notification: bool,
    pub draft_input: String,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            is_open: false,
            has_unread_notification: true,
            draft_input: String::new(),
        }
    }
}
