use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Not authenticated: credentials must be prepared before calling private endpoints")]
    NotAuthenticated,

    #[error("Transport error: {0}")]
    TransportError(#[source] reqwest::Error),

    /// Non-200 response. `message` is the response body exactly as received.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to decode response: {source}")]
    DecodeError {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("Other error: {0}")]
    Other(String),
}

impl ExchangeError {
    /// Whether the failure happened before the server answered.
    ///
    /// Everything else is terminal: the server saw the request and rejected it,
    /// or the caller has to fix its setup first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransportError(_))
    }

    /// Raw response body carried by the error, if the server sent one.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::ApiError { message, .. } => Some(message),
            Self::DecodeError { body, .. } => Some(body),
            _ => None,
        }
    }
}
