//! Error types for the Reel server client.

use reel_core::ReelError;
use thiserror::Error;

/// Errors that can occur when talking to the catalog server.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// File not found for upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File extension the server does not accept
    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    /// IO error while reading an upload
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ServerClientError {
    /// Classify a transport failure from `send()`
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ServerUnreachable(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}

impl From<ServerClientError> for ReelError {
    fn from(err: ServerClientError) -> Self {
        match err {
            ServerClientError::ServerError { status, message } => Self::Server { status, message },
            ServerClientError::ParseError(msg) => Self::Parse(msg),
            ServerClientError::Request(e) => Self::Network(e.to_string()),
            ServerClientError::ServerUnreachable(msg) => Self::Network(msg),
            ServerClientError::Io(e) => Self::Io(e),
            ServerClientError::InvalidUrl(msg)
            | ServerClientError::FileNotFound(msg)
            | ServerClientError::UnsupportedFile(msg) => Self::InvalidInput(msg),
        }
    }
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_into_core_errors() {
        let err: ReelError = ServerClientError::ServerError {
            status: 404,
            message: "Video not found".into(),
        }
        .into();
        assert!(matches!(err, ReelError::Server { status: 404, .. }));

        let err: ReelError = ServerClientError::ServerUnreachable("refused".into()).into();
        assert!(err.is_transient());

        let err: ReelError = ServerClientError::UnsupportedFile("notes.txt".into()).into();
        assert!(matches!(err, ReelError::InvalidInput(_)));
    }
}
