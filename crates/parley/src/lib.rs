//! # Parley
//!
//! Client core for a streaming chat backend: turns a growing response body into
//! content and reasoning deltas, folds them into live buffers, and commits each
//! exchange into a reactive, session-wide conversation store.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parley::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Arc::new(
//!         ApiClient::builder()
//!             .base_url("http://localhost:8000")
//!             .token_provider(Arc::new(StaticToken::new(std::env::var("PARLEY_TOKEN")?)))
//!             .build()?,
//!     );
//!     let store = Arc::new(ConversationStore::new());
//!
//!     let service = ChatService::new(client.clone(), store.clone());
//!     service.load_models().await;
//!     service.load_conversation(7).await?;
//!
//!     let orchestrator = Orchestrator::new(store.clone(), client);
//!     let model = store.select_model_for(7).unwrap_or_else(|| "gpt-x".to_string());
//!
//!     if let SendOutcome::Committed(record) = orchestrator.send(7, "hello", &model).await {
//!         println!("{}", record.response_text);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`parley-types`**: message records, conversations, model catalog, stream frames
//! - **`parley-stream`**: frame decoder and stream accumulator
//! - **`parley-store`**: reactive conversation state and model selection
//! - **`parley-client`**: HTTP client and the streaming chat transport
//! - **`parley-session`**: send/receive orchestrator and chat service

pub mod prelude;

pub use parley_types::{
    Conversation, ConversationId, ConversationSummary, LiveBuffers, MessageId, MessageRecord,
    ModelCatalog, ModelDescriptor, StreamFrame, StreamPayload, TemperatureRange,
};

pub use parley_stream::{
    decode_progress, FrameBatchStream, FrameDecoder, ResponseSnapshot, StreamAccumulator,
    EMPTY_RESPONSE_NOTICE,
};

pub use parley_store::{select_model, ConversationStore};

pub use parley_client::{
    ApiClient, ApiClientBuilder, ByteStream, ChatRequest, ChatTransport, ClientError,
    StaticToken, TokenProvider,
};

pub use parley_session::{
    error_notice, error_record, ChatService, Orchestrator, Phase, SendOutcome, SendRejected,
};
