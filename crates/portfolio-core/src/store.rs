//! Append-only message log backing the widget transcript

use crate::state::Message;

/// Ordered log of exchanged messages.
///
/// There is no edit or delete operation and no size cap. Message identity is
/// its index in the log.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Read-only view of the conversation in chronological order.
    ///
    /// The iterator is `Clone`, so a caller can walk it more than once.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &Message> + Clone + '_ {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
