// Wire envelopes of the chat backend's REST API

use parley_types::{ConversationSummary, MessageRecord, ModelDescriptor};
use serde::{Deserialize, Serialize};

/// `{ "success": bool, "data": T }`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct ModelsData {
    pub models: Vec<ModelDescriptor>,
    #[serde(default)]
    pub default_model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryData {
    pub conversation: ConversationSummary,
    #[serde(default)]
    pub chats: Vec<MessageRecord>,
}

/// Body of a non-success response
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateConversationBody<'a> {
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SendMessageBody<'a> {
    pub message: &'a str,
    pub model: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_envelope() {
        let json = r#"{
            "success": true,
            "data": {
                "conversation": {
                    "id": 7, "title": "Chat", "user_id": 1,
                    "last_message_at": "2024-01-01T00:00:00.000000Z",
                    "created_at": "2024-01-01T00:00:00.000000Z",
                    "updated_at": "2024-01-01T00:00:00.000000Z"
                },
                "chats": [{"id": 1, "message": "q", "response": "a", "model": "gpt-x"}]
            }
        }"#;

        let envelope: Envelope<HistoryData> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.conversation.id, 7);
        assert_eq!(envelope.data.chats.len(), 1);
    }

    #[test]
    fn test_error_body_without_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"errors": {}}"#).unwrap();
        assert!(body.message.is_none());
    }
}
