//! Error types for rubric-chat

use crate::provider::Provider;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("No messages provided")]
    NoMessages,

    #[error("Invalid provider")]
    InvalidProvider(String),

    #[error("API key not configured. Please set {var} in your .env file.")]
    MissingCredential { var: &'static str },

    #[error("{} API error: {body}", .provider.display_name())]
    Upstream {
        provider: Provider,
        status: u16,
        body: String,
    },

    #[error("{} request failed: {message}", .provider.display_name())]
    Transport { provider: Provider, message: String },

    #[error("{} API returned an unexpected response", .provider.display_name())]
    MalformedResponse { provider: Provider },
}

impl ChatError {
    /// Errors caused by the request itself rather than the proxy or upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ChatError::NoMessages | ChatError::InvalidProvider(_))
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
