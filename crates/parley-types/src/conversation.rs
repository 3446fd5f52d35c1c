use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::MessageRecord;
use crate::timestamp;

pub type ConversationId = i64;

/// Conversation as listed in the sidebar (no message bodies)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub title: String,
    #[serde(default, deserialize_with = "timestamp::deserialize_lenient")]
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub chats_count: u32,
}

impl ConversationSummary {
    pub fn new(id: ConversationId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            last_message_at: None,
            chats_count: 0,
        }
    }
}

/// A conversation with its full, ordered message history.
///
/// History is append-only: records are pushed in the order their completion was
/// observed and never reordered or edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    #[serde(rename = "chats", alias = "messages", default)]
    pub messages: Vec<MessageRecord>,
    #[serde(default, deserialize_with = "timestamp::deserialize_lenient")]
    pub last_message_at: Option<DateTime<Utc>>,
}

impl Conversation {
    pub fn new(id: ConversationId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            messages: Vec::new(),
            last_message_at: None,
        }
    }

    pub fn with_messages(mut self, messages: Vec<MessageRecord>) -> Self {
        self.messages = messages;
        self
    }

    /// Append a committed record and bump `last_message_at`
    pub fn push(&mut self, record: MessageRecord) {
        self.messages.push(record);
        self.last_message_at = Some(Utc::now());
    }

    pub fn last_message(&self) -> Option<&MessageRecord> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: self.id,
            title: self.title.clone(),
            last_message_at: self.last_message_at,
            chats_count: self.messages.len() as u32,
        }
    }
}
