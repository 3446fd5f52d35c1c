pub mod selection;
pub mod store;

pub use selection::select_model;
pub use store::ConversationStore;
