//! Errors shared by the gateway ports.

use thiserror::Error;

/// Errors returned by the remote issue and task gateways.
///
/// Every variant is treated the same way by the reconciler: the affected
/// item is logged and skipped, and the next pass re-attempts it.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure before a response arrived.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// 401 or 403.
    #[error("Authentication rejected ({status}): {body}")]
    Unauthorized {
        /// HTTP status.
        status: u16,
        /// Response body.
        body: String,
    },

    /// 404.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 429.
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// 5xx.
    #[error("Server error ({status}): {body}")]
    ServerError {
        /// HTTP status.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Any other non-success status.
    #[error("Unexpected response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Response body did not decode.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, body: String, resource: &str) -> Self {
        match status {
            401 | 403 => Self::Unauthorized { status, body },
            404 => Self::NotFound(resource.to_string()),
            429 => Self::RateLimited(body),
            500..=599 => Self::ServerError { status, body },
            _ => Self::UnexpectedStatus { status, body },
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            GatewayError::from_status(401, String::new(), "x"),
            GatewayError::Unauthorized { status: 401, .. }
        ));
        assert!(matches!(
            GatewayError::from_status(404, String::new(), "issue #3"),
            GatewayError::NotFound(ref r) if r == "issue #3"
        ));
        assert!(matches!(
            GatewayError::from_status(429, String::new(), "x"),
            GatewayError::RateLimited(_)
        ));
        assert!(matches!(
            GatewayError::from_status(503, "down".to_string(), "x"),
            GatewayError::ServerError { status: 503, .. }
        ));
        assert!(matches!(
            GatewayError::from_status(422, String::new(), "x"),
            GatewayError::UnexpectedStatus { status: 422, .. }
        ));
    }

    #[test]
    fn test_error_messages_carry_body() {
        let err = GatewayError::from_status(500, "boom".to_string(), "tasks");
        assert_eq!(err.to_string(), "Server error (500): boom");
    }
}
