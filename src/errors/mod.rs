//! Error handling module for the tutorials client.
//!
//! Provides a single error type shared by the HTTP client, the record access
//! layer, and the collection store, with stable error codes for display.

use thiserror::Error;

use crate::models::TutorialId;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Client error type.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not complete (connectivity, transport timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server responded with HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// A single-record fetch did not succeed.
    #[error("tutorial {0} not found")]
    NotFound(String),

    /// The remote call succeeded but the local collection has no such record.
    #[error("tutorial {0} is not in the local collection")]
    NotInCollection(TutorialId),

    /// A success response carried a body that could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// A draft failed client-side validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Network(_) => codes::NETWORK_ERROR,
            ClientError::Server { .. } => codes::SERVER_ERROR,
            ClientError::NotFound(_) | ClientError::NotInCollection(_) => codes::NOT_FOUND,
            ClientError::Decode(_) => codes::DECODE_ERROR,
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
            ClientError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// True for both remote and local not-found outcomes.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::NotFound(_) | ClientError::NotInCollection(_)
        )
    }

    /// HTTP status of a server error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!("JSON error: {:?}", err);
        ClientError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let server = ClientError::Server {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(server.error_code(), codes::SERVER_ERROR);
        assert_eq!(server.status(), Some(500));
        assert!(!server.is_not_found());

        let stale = ClientError::NotInCollection(TutorialId::Number(4));
        assert_eq!(stale.error_code(), codes::NOT_FOUND);
        assert!(stale.is_not_found());
        assert_eq!(
            stale.to_string(),
            "tutorial 4 is not in the local collection"
        );

        assert!(ClientError::NotFound("9".to_string()).is_not_found());
        assert_eq!(
            ClientError::Validation("title is required".to_string()).error_code(),
            codes::VALIDATION_ERROR
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<Vec<i32>>("{").unwrap_err();
        let err = ClientError::from(err);
        assert_eq!(err.error_code(), codes::DECODE_ERROR);
    }
}
