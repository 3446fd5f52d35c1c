use chrono::Utc;
use parking_lot::Mutex;
use parley_types::{
    Conversation, ConversationId, ConversationSummary, MessageRecord, ModelCatalog,
};
use std::collections::HashMap;
use tokio::sync::watch;
use tracing::debug;

use crate::selection::select_model;

/// Session-wide conversation state.
///
/// Construct once per session and share it (`Arc<ConversationStore>`) with the
/// orchestrator and any display layer. Every mutation goes through the methods
/// below; they are synchronous and cannot fail. Each reactive field is a watch
/// channel, so a new subscriber sees the current value immediately and every
/// change after it.
pub struct ConversationStore {
    conversations: watch::Sender<Vec<ConversationSummary>>,
    active: watch::Sender<Option<Conversation>>,
    models: watch::Sender<ModelCatalog>,
    typing: watch::Sender<bool>,
    last_models: Mutex<HashMap<ConversationId, String>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            conversations: watch::channel(Vec::new()).0,
            active: watch::channel(None).0,
            models: watch::channel(ModelCatalog::new()).0,
            typing: watch::channel(false).0,
            last_models: Mutex::new(HashMap::new()),
        }
    }

    // Conversations list

    pub fn list_conversations(&self) -> Vec<ConversationSummary> {
        self.conversations.borrow().clone()
    }

    pub fn set_conversations(&self, conversations: Vec<ConversationSummary>) {
        debug!(count = conversations.len(), "Conversation list replaced");
        self.conversations.send_replace(conversations);
    }

    /// Put a freshly created conversation at the top of the list
    pub fn prepend_conversation(&self, summary: ConversationSummary) {
        self.conversations.send_modify(|list| {
            list.retain(|c| c.id != summary.id);
            list.insert(0, summary);
        });
    }

    /// Drop a conversation from the list, clearing it if it was the active one
    pub fn remove_conversation(&self, id: ConversationId) {
        self.conversations.send_if_modified(|list| {
            let before = list.len();
            list.retain(|c| c.id != id);
            list.len() != before
        });

        self.active.send_if_modified(|active| {
            if active.as_ref().is_some_and(|c| c.id == id) {
                *active = None;
                true
            } else {
                false
            }
        });

        self.last_models.lock().remove(&id);
    }

    // Active conversation

    /// Replace the active conversation with a freshly loaded one.
    ///
    /// If no model has been remembered for it yet, the model of its last record
    /// becomes the remembered one.
    pub fn set_active_conversation(&self, conversation: Conversation) {
        if let Some(model_id) = conversation.last_message().and_then(|m| m.model_id.clone()) {
            self.last_models
                .lock()
                .entry(conversation.id)
                .or_insert(model_id);
        }

        debug!(
            conversation_id = conversation.id,
            messages = conversation.len(),
            "Active conversation set"
        );
        self.active.send_replace(Some(conversation));
    }

    pub fn active_conversation(&self) -> Option<Conversation> {
        self.active.borrow().clone()
    }

    pub fn active_conversation_id(&self) -> Option<ConversationId> {
        self.active.borrow().as_ref().map(|c| c.id)
    }

    pub fn clear_active_conversation(&self) {
        self.active.send_replace(None);
    }

    /// Append a committed record.
    ///
    /// The record lands in the active conversation when `conversation_id` is the
    /// active one; the matching list entry is bumped either way. Returns whether
    /// the active conversation received the record.
    pub fn append_message(&self, conversation_id: ConversationId, record: MessageRecord) -> bool {
        let appended = self.active.send_if_modified(|active| match active {
            Some(conversation) if conversation.id == conversation_id => {
                conversation.push(record);
                true
            }
            _ => false,
        });

        let last_message_at = self
            .active
            .borrow()
            .as_ref()
            .filter(|c| c.id == conversation_id)
            .and_then(|c| c.last_message_at)
            .unwrap_or_else(Utc::now);

        self.conversations.send_if_modified(|list| {
            match list.iter_mut().find(|c| c.id == conversation_id) {
                Some(summary) => {
                    summary.chats_count += 1;
                    summary.last_message_at = Some(last_message_at);
                    true
                }
                None => false,
            }
        });

        debug!(conversation_id, appended, "Message committed");
        appended
    }

    // Models

    pub fn set_models(&self, catalog: ModelCatalog) {
        debug!(count = catalog.len(), "Model catalog replaced");
        self.models.send_replace(catalog);
    }

    pub fn models(&self) -> ModelCatalog {
        self.models.borrow().clone()
    }

    pub fn remember_model_for_conversation(&self, id: ConversationId, model_id: impl Into<String>) {
        self.last_models.lock().insert(id, model_id.into());
    }

    pub fn last_model_for(&self, id: ConversationId) -> Option<String> {
        self.last_models.lock().get(&id).cloned()
    }

    /// Model to preselect for a conversation, see [`select_model`]
    pub fn select_model_for(&self, id: ConversationId) -> Option<String> {
        let last_used = self.last_model_for(id);
        select_model(&self.models.borrow(), last_used.as_deref())
    }

    // Typing flag

    pub fn set_typing(&self, typing: bool) {
        self.typing.send_if_modified(|current| {
            let changed = *current != typing;
            *current = typing;
            changed
        });
    }

    pub fn is_typing(&self) -> bool {
        *self.typing.borrow()
    }

    /// Set `typing` if it was clear; returns false when a cycle already holds it
    pub fn try_begin_typing(&self) -> bool {
        self.typing.send_if_modified(|current| {
            if *current {
                false
            } else {
                *current = true;
                true
            }
        })
    }

    // Subscriptions

    pub fn subscribe_conversations(&self) -> watch::Receiver<Vec<ConversationSummary>> {
        self.conversations.subscribe()
    }

    pub fn subscribe_active(&self) -> watch::Receiver<Option<Conversation>> {
        self.active.subscribe()
    }

    pub fn subscribe_models(&self) -> watch::Receiver<ModelCatalog> {
        self.models.subscribe()
    }

    pub fn subscribe_typing(&self) -> watch::Receiver<bool> {
        self.typing.subscribe()
    }

    /// Reset everything, e.g. on logout
    pub fn clear(&self) {
        self.conversations.send_replace(Vec::new());
        self.active.send_replace(None);
        self.models.send_replace(ModelCatalog::new());
        self.typing.send_replace(false);
        self.last_models.lock().clear();
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
