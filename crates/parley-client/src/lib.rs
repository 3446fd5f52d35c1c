pub mod auth;
pub mod client;
pub mod dto;
pub mod error;
pub mod transport;

pub use auth::{StaticToken, TokenProvider};
pub use client::{ApiClient, ApiClientBuilder};
pub use error::{ClientError, Result};
pub use transport::{ByteStream, ChatRequest, ChatTransport};
