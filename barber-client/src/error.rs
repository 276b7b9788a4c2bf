//! Client error types

use shared::BookingError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request could not be sent or the response could not be read
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the response body when present
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication required (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Conflicting state on the backend (409), e.g. a slot already booked
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rejected locally before any request was sent
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// Operation needs a signed-in user
    #[error("Not signed in")]
    NotSignedIn,

    /// Barber operation on an account without a barber id
    #[error("Account {0} is not linked to a barber")]
    NotABarber(String),

    /// Bad client configuration (e.g. unparsable base URL)
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Request failures and non-2xx responses
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Network(_)
                | Self::Api { .. }
                | Self::NotFound(_)
                | Self::Unauthorized(_)
                | Self::Forbidden(_)
                | Self::Conflict(_)
        )
    }

    /// Local validation failures (no round-trip happened)
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Booking(_) | Self::NotSignedIn | Self::NotABarber(_))
    }

    /// HTTP status of a backend rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::Conflict(_) => Some(409),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
