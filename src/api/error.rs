//! API Error Types
//!
//! Error taxonomy for the backend client. Every remote failure in the app is
//! one of these; all of them are non-fatal and end up on the console.

use thiserror::Error;

/// Errors from talking to the hosted backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request never completed (DNS, connection, CORS, aborted)
    #[error("network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not decode into the expected shape
    #[error("parse error: {0}")]
    Parse(String),

    /// Operation requires an authenticated session and none is active
    #[error("no active session")]
    NoSession,
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Parse(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Result type for backend operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 409,
            message: "duplicate key".to_string(),
        };
        assert_eq!(err.to_string(), "backend returned 409: duplicate key");
    }

    #[test]
    fn test_no_session_display() {
        assert_eq!(ApiError::NoSession.to_string(), "no active session");
    }
}
