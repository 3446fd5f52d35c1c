//! Prelude module for convenient imports
//!
//! ```rust
//! use parley::prelude::*;
//! ```

pub use crate::{
    ApiClient, ChatService, ChatTransport, ClientError, Conversation, ConversationStore,
    LiveBuffers, MessageRecord, ModelCatalog, Orchestrator, Phase, SendOutcome, StaticToken,
    StreamFrame, TokenProvider,
};
