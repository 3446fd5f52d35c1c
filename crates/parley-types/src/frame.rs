use serde::{Deserialize, Serialize};

use crate::message::MessageRecord;

/// One decoded unit of the chat streaming protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamFrame {
    /// Next piece of the visible response
    ContentDelta {
        text: String,
    },

    /// Next piece of the model's reasoning, shown apart from the response
    ReasoningDelta {
        text: String,
    },

    /// Terminal frame, optionally carrying the record the server stored
    Done {
        #[serde(skip_serializing_if = "Option::is_none")]
        chat: Option<MessageRecord>,
    },
}

impl StreamFrame {
    pub fn content(text: impl Into<String>) -> Self {
        StreamFrame::ContentDelta { text: text.into() }
    }

    pub fn reasoning(text: impl Into<String>) -> Self {
        StreamFrame::ReasoningDelta { text: text.into() }
    }

    pub fn done(chat: Option<MessageRecord>) -> Self {
        StreamFrame::Done { chat }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, StreamFrame::Done { .. })
    }
}

/// Payload carried after `data: ` on each stream line.
///
/// `chat` stays untyped here so a malformed terminal record can be told apart
/// from a malformed line.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamPayload {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reasoning_content: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub chat: Option<serde_json::Value>,
}

/// Text accumulated so far for the in-flight cycle, for live display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LiveBuffers {
    pub pending_prompt: String,
    pub content: String,
    pub reasoning: String,
}

impl LiveBuffers {
    pub fn for_prompt(prompt: impl Into<String>) -> Self {
        Self {
            pending_prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending_prompt.is_empty() && self.content.is_empty() && self.reasoning.is_empty()
    }
}
