//! The in-memory conversation log for one chat session.

use super::message::Message;
use super::prompt::GREETING;

/// Append-only ordered log of exchanged messages.
///
/// Insertion order is display order and conversational order. The first entry
/// is always the synthetic assistant greeting; the relay does not special-case
/// it. The log lives and dies with the session.
#[derive(Clone, Debug)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create a log seeded with the assistant greeting.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(GREETING)],
        }
    }

    /// Append a user message.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// All messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The newest entry, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of log entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty (never true for a greeting-seeded log).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::Role;

    #[test]
    fn test_starts_with_greeting() {
        let conversation = Conversation::new();
        assert_eq!(conversation.len(), 1);
        let first = conversation.last();
        assert!(first.is_some_and(|m| m.role == Role::Assistant));
        assert!(first.is_some_and(|m| m.content == GREETING));
    }

    #[test]
    fn test_appends_preserve_order() {
        let mut conversation = Conversation::new();
        conversation.push_user("What is MOSES reporting?");
        conversation.push_assistant("MOSES is the statutory production reporting system.");

        let messages = conversation.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[1].content, "What is MOSES reporting?");
    }
}
