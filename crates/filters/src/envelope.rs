//! Request/response envelope exchanged with the chat host.
//!
//! The host owns the wire format; filters only look at `messages`, `model` and the optional user
//! context. Everything else is carried through untouched in the `extra` maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Author of a chat message.
///
/// Roles this crate does not act on (`tool`, `function`, vendor extensions) are kept verbatim in
/// [`Role::Other`] so they serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
    Other(String),
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
            Self::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "system" => Self::System,
            "user" => Self::User,
            "assistant" => Self::Assistant,
            "tool" => Self::Tool,
            _ => Self::Other(role),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

/// Message body. Plain text in the common case; anything else (`null` on tool-call turns, a
/// list of parts on multimodal input) is carried through as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Structured(Value),
}

impl Default for Content {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Content {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(_) => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(_) => None,
        }
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl PartialEq<&str> for Content {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

/// One entry of the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: Content,
    /// Host-specific keys (ids, timestamps, tool calls, attachments...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    #[must_use]
    pub fn new(role: Role, content: impl Into<Content>) -> Self {
        Self {
            role,
            content: content.into(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<Content>) -> Self {
        Self::new(Role::User, content)
    }

    #[must_use]
    pub fn assistant(content: impl Into<Content>) -> Self {
        Self::new(Role::Assistant, content)
    }

    #[must_use]
    pub fn system(content: impl Into<Content>) -> Self {
        Self::new(Role::System, content)
    }
}

/// Request or response body as seen by a filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    #[must_use]
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            model: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn last_message_mut(&mut self) -> Option<&mut Message> {
        self.messages.last_mut()
    }

    /// Top-level keys present in the serialized envelope, in a stable order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = vec!["messages"];
        if self.model.is_some() {
            keys.push("model");
        }
        keys.extend(self.extra.keys().map(String::as_str));
        keys
    }
}

/// Per-user settings the host attaches to the user context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserValves {
    /// Personal turn limit. `None` means "use the filter's default".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_turns: Option<u32>,
}

/// The user on whose behalf a request is made.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Host role (`user`, `admin`, `pending`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub valves: UserValves,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserContext {
    #[must_use]
    pub fn with_role(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.valves.max_turns = Some(max_turns);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let raw = json!({
            "model": "llama3",
            "stream": true,
            "chat_id": "c-1",
            "messages": [
                { "role": "system", "content": "be brief" },
                { "role": "user", "content": "你好", "id": "m-2" }
            ]
        });

        let envelope: Envelope = serde_json::from_value(raw.clone()).expect("parse envelope");
        assert_eq!(envelope.messages.len(), 2);
        assert_eq!(envelope.messages[1].role, Role::User);
        assert_eq!(envelope.messages[1].extra.get("id"), Some(&json!("m-2")));
        assert_eq!(envelope.model.as_deref(), Some("llama3"));

        let back = serde_json::to_value(&envelope).expect("serialize envelope");
        assert_eq!(back, raw);
    }

    #[test]
    fn keys_lists_known_and_extra_fields() {
        let mut envelope = Envelope::new(vec![Message::user("hi")]).with_model("m");
        envelope.extra.insert("stream".to_string(), json!(false));
        assert_eq!(envelope.keys(), vec!["messages", "model", "stream"]);
    }

    #[test]
    fn user_context_reads_host_valves() {
        let user: UserContext = serde_json::from_value(json!({
            "id": "u-1",
            "role": "user",
            "valves": { "max_turns": 6 },
            "email": "someone@example.com"
        }))
        .expect("parse user");

        assert_eq!(user.role.as_deref(), Some("user"));
        assert_eq!(user.valves.max_turns, Some(6));
        assert!(user.extra.contains_key("email"));
    }

    #[test]
    fn tool_call_turns_and_tool_results_round_trip() {
        let raw = json!({
            "messages": [
                { "role": "user", "content": "what is 6 x 7?" },
                {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{ "id": "call-1", "type": "function",
                        "function": { "name": "multiply", "arguments": "{\"a\":6,\"b\":7}" } }]
                },
                { "role": "tool", "content": "42", "tool_call_id": "call-1" },
                { "role": "developer", "content": "stay on topic" }
            ]
        });

        let envelope: Envelope = serde_json::from_value(raw.clone()).expect("parse envelope");
        assert_eq!(envelope.messages[1].role, Role::Assistant);
        assert_eq!(envelope.messages[1].content, Content::Structured(Value::Null));
        assert_eq!(envelope.messages[1].content.as_text(), None);
        assert_eq!(envelope.messages[2].role, Role::Tool);
        assert_eq!(envelope.messages[2].content, "42");
        assert_eq!(envelope.messages[3].role, Role::Other("developer".to_string()));

        let back = serde_json::to_value(&envelope).expect("serialize envelope");
        assert_eq!(back, raw);
    }

    #[test]
    fn multimodal_content_is_kept_as_parts() {
        let raw = json!({
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": "這張圖是什麼？" },
                    { "type": "image_url", "image_url": { "url": "data:image/png;base64,AAAA" } }
                ]
            }]
        });

        let mut envelope: Envelope = serde_json::from_value(raw.clone()).expect("parse envelope");
        let last = envelope.last_message_mut().expect("one message");
        assert!(matches!(last.content, Content::Structured(Value::Array(_))));
        assert!(last.content.text_mut().is_none());

        assert_eq!(serde_json::to_value(&envelope).expect("serialize"), raw);
    }

    #[test]
    fn missing_messages_default_to_empty() {
        let envelope: Envelope = serde_json::from_value(json!({})).expect("parse");
        assert!(envelope.messages.is_empty());
        assert!(envelope.last_message().is_none());
    }
}
