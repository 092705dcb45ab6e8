//! Chat data model — the request body and the role-tagged conversation.

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /chat`.
///
/// A missing or `null` `message` deserialises to an empty string so the
/// relay decides how blank input is handled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// True when the message has no visible characters.
    pub fn is_blank(&self) -> bool {
        self.message.trim().is_empty()
    }
}

/// Speaker of a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Assistant,
    User,
}

/// One role-tagged entry of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Ordered messages sent to the inference backend for a single turn.
///
/// Serialises as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation(Vec<ChatMessage>);

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.0.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.0.last()
    }
}

impl From<Vec<ChatMessage>> for Conversation {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self(messages)
    }
}

impl Extend<ChatMessage> for Conversation {
    fn extend<T: IntoIterator<Item = ChatMessage>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hi");
        assert_eq!(serde_json::to_value(Role::System).unwrap(), "system");
        assert_eq!(serde_json::to_value(Role::User).unwrap(), "user");
    }

    #[test]
    fn conversation_serializes_as_array() {
        let conv = Conversation::from(vec![ChatMessage::user("hello")]);
        let json = serde_json::to_string(&conv).unwrap();
        assert_eq!(json, r#"[{"role":"user","content":"hello"}]"#);
    }

    #[test]
    fn missing_message_defaults_to_empty() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.message, "");
        assert!(req.is_blank());
    }

    #[test]
    fn null_message_defaults_to_empty() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":null}"#).unwrap();
        assert_eq!(req.message, "");
        assert!(req.is_blank());
    }

    #[test]
    fn non_string_message_is_rejected() {
        assert!(serde_json::from_str::<ChatRequest>(r#"{"message":42}"#).is_err());
    }

    #[test]
    fn whitespace_message_is_blank() {
        assert!(ChatRequest::new(" \t\n").is_blank());
        assert!(!ChatRequest::new(" hi ").is_blank());
    }
}
