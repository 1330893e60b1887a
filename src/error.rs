//! CoreNLP client error types

/// CoreNLP client error types
#[derive(Debug, thiserror::Error)]
pub enum CoreNlpError {
    // Construction errors
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("environment error: {0}")]
    Environment(String),

    // Transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("server error ({status}): {message}")]
    Api { status: u16, message: String },

    // Data errors
    #[error("unexpected response format: {0}")]
    ResponseFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreNlpError {
    /// Whether this error came from the HTTP round trip itself
    /// (connection refused, timeout, non-success status).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. })
    }

    /// Whether this error was raised while constructing a client.
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Environment(_))
    }
}

impl From<reqwest::Error> for CoreNlpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CoreNlpError::Http(format!("request timed out: {err}"))
        } else if err.is_connect() {
            CoreNlpError::Http(format!("connection failed: {err}"))
        } else {
            CoreNlpError::Http(err.to_string())
        }
    }
}

/// Result type alias for CoreNLP client operations
pub type Result<T> = std::result::Result<T, CoreNlpError>;
