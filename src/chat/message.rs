//! Message types exchanged between the widget, the relay and the upstream.

use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user asking a question.
    User,
    /// The assistant (greeting, replies, and synthetic error messages).
    Assistant,
}

/// One entry of the conversation log.
///
/// Messages carry no identifiers or timestamps; their position in the log is
/// their identity. The log is append-only and bounded to one session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Author of the message.
    pub role: Role,
    /// Plain text content.
    pub content: String,
}

impl Message {
    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_serialize_lowercase() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(Message::user("hello"))?;
        assert_eq!(
            value,
            serde_json::json!({ "role": "user", "content": "hello" })
        );

        let value = serde_json::to_value(Message::assistant("hi"))?;
        assert_eq!(
            value,
            serde_json::json!({ "role": "assistant", "content": "hi" })
        );
        Ok(())
    }

    #[test]
    fn test_wire_format_parses() -> Result<(), serde_json::Error> {
        let message: Message =
            serde_json::from_str(r#"{"role":"assistant","content":"Hello!"}"#)?;
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.content, "Hello!");
        Ok(())
    }
}
