use parley_client::{ApiClient, Result};
use parley_store::ConversationStore;
use parley_types::{ConversationId, ConversationSummary, ModelCatalog};
use std::sync::Arc;
use tracing::{debug, warn};

/// Request/response calls whose results land in the store
pub struct ChatService {
    client: Arc<ApiClient>,
    store: Arc<ConversationStore>,
}

impl ChatService {
    pub fn new(client: Arc<ApiClient>, store: Arc<ConversationStore>) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    pub async fn load_conversations(&self) -> Result<Vec<ConversationSummary>> {
        let conversations = self.client.list_conversations().await?;
        self.store.set_conversations(conversations.clone());
        Ok(conversations)
    }

    /// Load the model catalog. A failure leaves an empty catalog, which blocks
    /// sending until models can be fetched again.
    pub async fn load_models(&self) -> ModelCatalog {
        let catalog = match self.client.list_models().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e.detail(), "Failed to load models");
                ModelCatalog::new()
            }
        };

        self.store.set_models(catalog.clone());
        catalog
    }

    /// Fetch a conversation's history and make it the active one
    pub async fn load_conversation(&self, id: ConversationId) -> Result<()> {
        let conversation = self.client.conversation_history(id).await?;
        debug!(conversation_id = id, messages = conversation.len(), "Conversation loaded");
        self.store.set_active_conversation(conversation);
        Ok(())
    }

    pub async fn create_conversation(&self, title: &str) -> Result<ConversationSummary> {
        let summary = self.client.create_conversation(title).await?;
        self.store.prepend_conversation(summary.clone());
        Ok(summary)
    }

    pub async fn delete_conversation(&self, id: ConversationId) -> Result<()> {
        self.client.delete_conversation(id).await?;
        self.store.remove_conversation(id);
        Ok(())
    }
}
