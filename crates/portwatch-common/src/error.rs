//! Failure taxonomy for backend calls.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { status: u16, endpoint: String },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl GatewayError {
    pub fn status(status: u16, endpoint: impl Into<String>) -> Self {
        GatewayError::Status {
            status,
            endpoint: endpoint.into(),
        }
    }
}

/// Whether a finished preference write should be followed by a refetch.
/// A failed write keeps the optimistic local value until the next refresh.
pub fn refetch_after_write(result: &Result<(), GatewayError>) -> bool {
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_successful_writes_refetch() {
        assert!(refetch_after_write(&Ok(())));
        assert!(!refetch_after_write(&Err(GatewayError::status(
            500,
            "/api/save-service-name"
        ))));
        assert!(!refetch_after_write(&Err(GatewayError::Network(
            "connection refused".into()
        ))));
    }

    #[test]
    fn status_error_names_endpoint() {
        let err = GatewayError::status(500, "/api/save-url-path");
        assert_eq!(err.to_string(), "/api/save-url-path returned HTTP 500");
    }
}
