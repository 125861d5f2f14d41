//! A2A message types

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use uuid::Uuid;

/// A message in the A2A protocol
///
/// Messages are the primary unit of communication between agents.
/// Each message has a role (user or agent), one or more parts, and a unique
/// `messageId`. The optional `taskId`/`contextId` fields associate a message
/// with an existing task or conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Wire discriminator, always `"message"`
    #[serde(default = "Message::kind_value")]
    pub kind: String,

    /// Unique message identifier
    #[serde(rename = "messageId")]
    pub message_id: String,

    /// Role of the message sender
    pub role: Role,

    /// Message content parts (at least one required)
    pub parts: Vec<Part>,

    /// Optional task identifier (for appending to an existing task)
    #[serde(rename = "taskId", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// Optional context identifier (for multi-turn conversations)
    #[serde(rename = "contextId", skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
}

impl Message {
    fn kind_value() -> String {
        "message".to_string()
    }

    /// Create a new message with text content and a freshly generated id
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            kind: Self::kind_value(),
            message_id: Uuid::now_v7().to_string(),
            role,
            parts: vec![Part::text(text)],
            task_id: None,
            context_id: None,
        }
    }

    /// Create a user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an agent message with text content
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, text)
    }

    /// Create a new message builder
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// Add a message part
    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Associate this message with an existing task
    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// Associate this message with a conversation context
    pub fn with_context_id(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    /// Concatenate the text of all text parts, in order
    ///
    /// Non-text parts contribute nothing here but remain in `parts`.
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                Part::Unknown(_) => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Builder for constructing Message instances
#[derive(Debug, Default)]
pub struct MessageBuilder {
    role: Option<Role>,
    parts: Vec<Part>,
    message_id: Option<String>,
    task_id: Option<String>,
    context_id: Option<String>,
}

impl MessageBuilder {
    /// Create a new message builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role of the message
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set the message parts
    pub fn parts(mut self, parts: Vec<Part>) -> Self {
        self.parts = parts;
        self
    }

    /// Add a single part to the message
    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Set the message ID (generated if not set)
    pub fn message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }

    /// Set the task ID
    pub fn task_id(mut self, id: impl Into<String>) -> Self {
        self.task_id = Some(id.into());
        self
    }

    /// Set the context ID
    pub fn context_id(mut self, id: impl Into<String>) -> Self {
        self.context_id = Some(id.into());
        self
    }

    /// Build the message
    ///
    /// # Panics
    ///
    /// Panics if role is not set or if parts are empty
    pub fn build(self) -> Message {
        let role = self.role.expect("Message role is required");
        assert!(
            !self.parts.is_empty(),
            "Message must have at least one part"
        );

        Message {
            kind: Message::kind_value(),
            message_id: self
                .message_id
                .unwrap_or_else(|| Uuid::now_v7().to_string()),
            role,
            parts: self.parts,
            task_id: self.task_id,
            context_id: self.context_id,
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from a user
    User,

    /// Message from an AI agent
    Agent,
}

/// A part of a message, discriminated by its `kind` field
///
/// The baseline kind is `text`. Parts of any other kind are carried as an
/// opaque JSON value so they round-trip without loss, even when this
/// implementation cannot interpret them.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// Text content (`kind: "text"`)
    Text {
        /// The text content
        text: String,
    },

    /// A part of an unrecognized kind, preserved verbatim
    Unknown(Value),
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// The `kind` discriminator of this part, if present
    pub fn kind(&self) -> Option<&str> {
        match self {
            Part::Text { .. } => Some("text"),
            Part::Unknown(value) => value.get("kind").and_then(Value::as_str),
        }
    }
}

impl Serialize for Part {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Part::Text { text } => json!({ "kind": "text", "text": text }).serialize(serializer),
            Part::Unknown(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Part {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value.get("kind").and_then(Value::as_str) {
            Some("text") => {
                let text = value
                    .get("text")
                    .and_then(Value::as_str)
                    .ok_or_else(|| D::Error::missing_field("text"))?
                    .to_string();
                Ok(Part::Text { text })
            }
            _ => Ok(Part::Unknown(value)),
        }
    }
}
