use async_trait::async_trait;
use futures::Stream;
use parley_types::ConversationId;
use std::pin::Pin;

use crate::error::Result;

/// Raw body chunks of a streaming response, in arrival order
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>>> + Send>>;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub conversation_id: ConversationId,
    pub message: String,
    pub model: String,
}

impl ChatRequest {
    pub fn new(
        conversation_id: ConversationId,
        message: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id,
            message: message.into(),
            model: model.into(),
        }
    }
}

/// Opens the streaming chat request.
///
/// Implementations resolve once response headers are in: a non-success status
/// is returned as an error, a success status as the body stream. Dropping the
/// stream aborts the request.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn open_chat_stream(&self, request: ChatRequest) -> Result<ByteStream>;
}
