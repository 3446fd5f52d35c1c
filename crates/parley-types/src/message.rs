use serde::{Deserialize, Deserializer, Serialize};

pub type MessageId = i64;

/// One prompt/response exchange inside a conversation.
///
/// Records are immutable once committed to a conversation. Field names follow the
/// Rust side; the serde renames match the chat backend's wire names
/// (`message`, `response`, `reasoning_content`, `model`, `tokens_used`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: MessageId,

    #[serde(rename = "message", default, deserialize_with = "nullable_string")]
    pub prompt_text: String,

    #[serde(rename = "response", default, deserialize_with = "nullable_string")]
    pub response_text: String,

    #[serde(rename = "reasoning_content", default, skip_serializing_if = "Option::is_none")]
    pub reasoning_text: Option<String>,

    #[serde(rename = "model", default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,

    #[serde(rename = "tokens_used", default, skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl MessageRecord {
    pub fn new(
        id: MessageId,
        prompt_text: impl Into<String>,
        response_text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            prompt_text: prompt_text.into(),
            response_text: response_text.into(),
            reasoning_text: None,
            model_id: None,
            token_count: None,
            temperature: None,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning_text = Some(reasoning.into());
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_token_count(mut self, tokens: u32) -> Self {
        self.token_count = Some(tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Reasoning text, treating an empty string the same as absent
    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning_text.as_deref().filter(|r| !r.is_empty())
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let json = r#"{
            "id": 42,
            "message": "hello",
            "response": "Hi there",
            "reasoning_content": "greeting",
            "model": "gpt-x",
            "tokens_used": 12,
            "temperature": 0.7
        }"#;

        let record: MessageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.prompt_text, "hello");
        assert_eq!(record.response_text, "Hi there");
        assert_eq!(record.reasoning(), Some("greeting"));
        assert_eq!(record.model_id.as_deref(), Some("gpt-x"));
        assert_eq!(record.token_count, Some(12));
    }

    #[test]
    fn test_null_response_becomes_empty() {
        let json = r#"{"id": 1, "message": "q", "response": null}"#;
        let record: MessageRecord = serde_json::from_str(json).unwrap();
        assert!(record.response_text.is_empty());
        assert!(record.reasoning_text.is_none());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let json = r#"{"response": ""}"#;
        assert!(serde_json::from_str::<MessageRecord>(json).is_err());
    }

    #[test]
    fn test_empty_reasoning_is_none() {
        let record = MessageRecord::new(1, "q", "a").with_reasoning("");
        assert_eq!(record.reasoning(), None);
    }
}
