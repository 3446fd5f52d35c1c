use parley_client::ApiClient;
use parley_session::Orchestrator;
use parley_store::ConversationStore;
use parley_types::Conversation;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Accepts one chat request and answers with a delta every 100ms, about 900ms in all
async fn drip_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let length: usize = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .map(|v| v.trim().parse().unwrap())
            .unwrap_or(0);
        while buf.len() < header_end + length {
            let n = socket.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
        }

        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n")
            .await
            .unwrap();
        for _ in 0..9 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            socket
                .write_all(b"data: {\"content\":\"x\",\"done\":false}\n")
                .await
                .unwrap();
        }
        socket
            .write_all(b"data: {\"done\":true,\"chat\":{\"id\":42,\"response\":\"xxxxxxxxx\"}}\n")
            .await
            .unwrap();
        let _ = socket.shutdown().await;
    });

    url
}

#[tokio::test]
async fn test_long_healthy_stream_is_committed() {
    let url = drip_server().await;
    let client = Arc::new(
        ApiClient::builder()
            .base_url(url)
            .read_timeout(Duration::from_millis(400))
            .build()
            .unwrap(),
    );
    let store = Arc::new(ConversationStore::new());
    store.set_active_conversation(Conversation::new(7, "Chat"));
    let orchestrator = Orchestrator::new(store.clone(), client);

    let outcome = orchestrator.send(7, "hello", "gpt-x").await;

    let record = outcome.record().expect("record committed");
    assert_eq!(record.id, 42);
    assert_eq!(record.response_text, "xxxxxxxxx");
    assert!(!record.response_text.contains("Error"));
    assert_eq!(store.active_conversation().unwrap().messages.len(), 1);
}
