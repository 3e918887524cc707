//! Builds the message list sent to the completion service

use serde::{Deserialize, Serialize};

use crate::state::{Message, Sender};

/// Role vocabulary understood by chat-completion endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl From<Sender> for Role {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => Role::User,
            Sender::Assistant => Role::Assistant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub role: Role,
    pub content: String,
}

impl RoleEntry {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Assemble `[system] ++ conversation ++ [user: new_input]`.
///
/// The whole transcript is resent every call, nothing is truncated. The caller
/// has already rejected blank input.
pub fn build_context<'a, I>(persona: &str, conversation: I, new_input: &str) -> Vec<RoleEntry>
where
    I: IntoIterator<Item = &'a Message>,
{
    let conversation = conversation.into_iter();
    let mut entries = Vec::with_capacity(conversation.size_hint().0 + 2);

    entries.push(RoleEntry::new(Role::System, persona));
    entries.extend(
        conversation.map(|msg| RoleEntry::new(msg.sender().into(), msg.text())),
    );
    entries.push(RoleEntry::new(Role::User, new_input));

    entries
}
