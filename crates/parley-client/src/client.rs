use async_trait::async_trait;
use futures::StreamExt;
use parley_types::{Conversation, ConversationId, ConversationSummary, ModelCatalog};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::auth::TokenProvider;
use crate::dto::{
    CreateConversationBody, Envelope, ErrorBody, HistoryData, ModelsData, SendMessageBody,
};
use crate::error::{ClientError, Result};
use crate::transport::{ByteStream, ChatRequest, ChatTransport};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(300);
const SERVER_ERROR_FALLBACK: &str = "Server error occurred";
const UNREADABLE_ERROR_FALLBACK: &str = "Failed to process the request";

/// Client for the chat backend REST API (HTTP direct, no SDK)
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    tokens: Option<Arc<dyn TokenProvider>>,
}

impl ApiClient {
    /// Create a client with the default connect and read timeouts
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        Self::builder().base_url(base_url).token_provider(tokens).build()
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request with the current bearer credential attached
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http_client.request(method, self.url(path));

        match self.tokens.as_ref().and_then(|t| t.token()) {
            Some(token) => builder.bearer_auth(token),
            None => {
                debug!(path, "No credential available, sending request unauthenticated");
                builder
            }
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let response = check_status(response).await?;
        let body = response.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
        let envelope: Envelope<Vec<ConversationSummary>> = self
            .send_json(self.request(Method::GET, "/api/conversations"))
            .await?;

        Ok(envelope.data)
    }

    pub async fn create_conversation(&self, title: &str) -> Result<ConversationSummary> {
        let builder = self
            .request(Method::POST, "/api/conversations")
            .json(&CreateConversationBody { title });
        let envelope: Envelope<ConversationSummary> = self.send_json(builder).await?;

        Ok(envelope.data)
    }

    pub async fn delete_conversation(&self, id: ConversationId) -> Result<()> {
        let path = format!("/api/conversations/{}", id);
        let response = self.request(Method::DELETE, &path).send().await?;
        check_status(response).await?;

        Ok(())
    }

    /// Load a conversation with its full message history
    pub async fn conversation_history(&self, id: ConversationId) -> Result<Conversation> {
        let path = format!("/api/conversations/{}/history", id);
        let envelope: Envelope<HistoryData> = self
            .send_json(self.request(Method::GET, &path))
            .await?;

        let HistoryData { conversation, chats } = envelope.data;
        Ok(Conversation {
            id: conversation.id,
            title: conversation.title,
            messages: chats,
            last_message_at: conversation.last_message_at,
        })
    }

    pub async fn list_models(&self) -> Result<ModelCatalog> {
        let envelope: Envelope<ModelsData> = self
            .send_json(self.request(Method::GET, "/api/models"))
            .await?;

        let ModelsData { models, default_model } = envelope.data;
        Ok(ModelCatalog::from_models(models, default_model))
    }
}

#[async_trait]
impl ChatTransport for ApiClient {
    async fn open_chat_stream(&self, request: ChatRequest) -> Result<ByteStream> {
        let path = format!("/api/conversations/{}/chat", request.conversation_id);
        let response = self
            .request(Method::POST, &path)
            .header(ACCEPT, "text/event-stream")
            .json(&SendMessageBody {
                message: &request.message,
                model: &request.model,
            })
            .send()
            .await?;

        let response = check_status(response).await?;
        debug!(
            conversation_id = request.conversation_id,
            status = response.status().as_u16(),
            "Chat stream opened"
        );

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(ClientError::from));

        Ok(Box::pin(body))
    }
}

/// Pass through success responses; turn anything else into `ClientError::Server`
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed
            .message
            .unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string()),
        Err(_) => UNREADABLE_ERROR_FALLBACK.to_string(),
    };

    warn!(status = status.as_u16(), %message, "Backend returned an error status");
    Err(ClientError::server(status.as_u16(), message))
}

pub struct ApiClientBuilder {
    base_url: Option<String>,
    tokens: Option<Arc<dyn TokenProvider>>,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            tokens: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn token_provider(mut self, tokens: Arc<dyn TokenProvider>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Longest silence between reads. There is no cap on total duration, so a
    /// stream that keeps sending is never cut off.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Config("base_url is required".to_string()))?;
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Config("base_url must not be empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(self.connect_timeout)
            .read_timeout(self.read_timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(ApiClient {
            http_client,
            base_url,
            tokens: self.tokens,
        })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
