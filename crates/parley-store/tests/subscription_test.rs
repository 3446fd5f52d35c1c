use parley_store::ConversationStore;
use parley_types::{Conversation, ConversationSummary, MessageRecord};
use std::sync::Arc;

#[tokio::test]
async fn test_late_subscriber_sees_current_value() {
    let store = ConversationStore::new();
    store.set_conversations(vec![ConversationSummary::new(1, "First")]);

    let rx = store.subscribe_conversations();
    assert_eq!(rx.borrow().len(), 1);
    assert_eq!(rx.borrow()[0].title, "First");
}

#[tokio::test]
async fn test_subscriber_observes_appended_record() {
    let store = Arc::new(ConversationStore::new());
    store.set_active_conversation(Conversation::new(7, "Chat"));

    let mut rx = store.subscribe_active();
    rx.borrow_and_update();

    let writer = Arc::clone(&store);
    tokio::spawn(async move {
        writer.append_message(7, MessageRecord::new(42, "hello", "Hi there"));
    });

    rx.changed().await.unwrap();
    let active = rx.borrow_and_update().clone().unwrap();
    assert_eq!(active.messages.len(), 1);
    assert_eq!(active.messages[0].id, 42);
}

#[tokio::test]
async fn test_typing_changes_are_published() {
    let store = ConversationStore::new();
    let mut rx = store.subscribe_typing();
    assert!(!*rx.borrow_and_update());

    store.set_typing(true);
    rx.changed().await.unwrap();
    assert!(*rx.borrow_and_update());

    // Setting the same value again is not a change
    store.set_typing(true);
    assert!(!rx.has_changed().unwrap());
}
