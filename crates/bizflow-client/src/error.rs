//! Error types for the HTTP client and resource services

use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors returned by the HTTP client and services
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network or protocol failure before a response was read
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP 401
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Backend message, or the status reason
        message: String,
    },

    /// HTTP 403
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Backend message, or the status reason
        message: String,
    },

    /// Any other non-success response, or a success status with a failure envelope
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Envelope code, when the body was an envelope
        code: Option<i32>,
        /// Backend message text
        message: String,
    },

    /// The envelope did not carry the expected `result`
    #[error("Response envelope has no result")]
    MissingResult,

    /// Body could not be decoded into the expected schema
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Request rejected by local schema validation, nothing was sent
    #[error("Invalid request: {0}")]
    Validation(#[source] bizflow_core::Error),

    /// Token storage could not be read or written
    #[error("Session storage error: {message}")]
    Session {
        /// Error message
        message: String,
    },

    /// Base URL or path could not be turned into a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Coarse classification used by views to pick a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure or undecodable response
    Transport,
    /// 401 or 403
    Authorization,
    /// Local validation or a backend rejection with a message
    Validation,
    /// Client side state problem
    Internal,
}

impl ClientError {
    /// Create a session storage error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Classify the error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) | Self::Decode(_) | Self::MissingResult => ErrorKind::Transport,
            Self::Unauthorized { .. } | Self::Forbidden { .. } => ErrorKind::Authorization,
            Self::Api { .. } | Self::Validation(_) => ErrorKind::Validation,
            Self::Session { .. } | Self::InvalidUrl(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the backend refused access (HTTP 403)
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// Message text that came from the backend or local validation
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::Api { message, .. } => {
                Some(message.clone()).filter(|m| !m.trim().is_empty())
            }
            Self::Validation(bizflow_core::Error::Validation { message, .. }) => {
                Some(message.clone())
            }
            _ => None,
        }
    }
}

impl From<bizflow_core::Error> for ClientError {
    fn from(err: bizflow_core::Error) -> Self {
        match err {
            bizflow_core::Error::Io(e) => Self::session(e.to_string()),
            bizflow_core::Error::Serialization(e) => Self::Decode(e),
            other => Self::Validation(other),
        }
    }
}
