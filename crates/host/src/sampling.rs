//! Sampling (reverse-request) payload types.
//!
//! A handler may ask the original caller to perform a sub-task, such as
//! summarizing content, before producing its own result. These types
//! describe that request/response pair; delivery happens over the
//! context's callback channel (see `InvocationContext::request_sampling`).

use serde::{Deserialize, Serialize};

/// Role of a sampling message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A content item in a sampling exchange.
///
/// Binary content travels base64-encoded, as in MCP tool content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
    Image { data: String, mime_type: String },
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }

    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Content::Image {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Get text if this is a text item.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// One message in a sampling request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingMessage {
    pub role: Role,
    pub content: Content,
}

impl SamplingMessage {
    pub fn user(content: Content) -> Self {
        Self {
            role: Role::User,
            content,
        }
    }
}

/// A request issued by a handler back to the caller.
///
/// Messages are delivered to the caller in the order submitted; any
/// ordering beyond that (e.g. message-then-attachments) is the
/// handler's responsibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    pub messages: Vec<SamplingMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl SamplingRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_message(mut self, message: SamplingMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// The caller's reply to a sampling request. Consumed once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingResponse {
    pub content: Content,
}

impl SamplingResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: Content::text(text),
        }
    }

    /// Get the reply text if the caller answered with text content.
    pub fn as_text(&self) -> Option<&str> {
        self.content.as_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_tagged() {
        let json = serde_json::to_string(&Content::text("hello")).unwrap();
        assert!(json.contains("\"type\":\"text\""));

        let json = serde_json::to_string(&Content::image("aGk=", "image/png")).unwrap();
        assert!(json.contains("\"type\":\"image\""));
        assert!(json.contains("image/png"));
    }

    #[test]
    fn request_builder_preserves_message_order() {
        let request = SamplingRequest::new()
            .with_system_prompt("Summarize the emails.")
            .with_message(SamplingMessage::user(Content::text("first")))
            .with_message(SamplingMessage::user(Content::image("aGk=", "image/png")))
            .with_temperature(0.0);

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].content.as_text(), Some("first"));
        assert!(request.messages[1].content.as_text().is_none());
    }
}
