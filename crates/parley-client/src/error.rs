use thiserror::Error;

/// Failures talking to the chat backend.
///
/// `Display` is the human-readable notice shown in place of a response, so it
/// never carries low-level detail; `detail()` is for logs.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error occurred")]
    Transport(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Failed to process the request")]
    Decode(#[from] serde_json::Error),

    #[error("The response ended before it was complete")]
    Incomplete,

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        ClientError::Server {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Full description including the underlying cause
    pub fn detail(&self) -> String {
        match self {
            ClientError::Transport(cause) => format!("transport failure: {}", cause),
            ClientError::Server { status, message } => format!("HTTP {}: {}", status, message),
            ClientError::Decode(e) => format!("decode failure: {}", e),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
