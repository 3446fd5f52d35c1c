pub mod conversation;
pub mod frame;
pub mod message;
pub mod model;
mod timestamp;

pub use conversation::{Conversation, ConversationId, ConversationSummary};
pub use frame::{LiveBuffers, StreamFrame, StreamPayload};
pub use message::{MessageId, MessageRecord};
pub use model::{ModelCatalog, ModelDescriptor, TemperatureRange};
