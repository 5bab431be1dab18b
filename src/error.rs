//! Error types for graph-mi-relay.
//!
//! Uses `thiserror` for library-style errors with automatic `Display` and `Error` implementations.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure to obtain a token from the ambient identity.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Failed to create Azure credential: {0}")]
    Setup(String),

    /// Every credential source was unavailable, or one of them was refused.
    #[error("Failed to acquire access token: {0}")]
    Token(String),
}

/// Microsoft Graph call failures.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Token acquisition failed: {0}")]
    Identity(#[from] IdentityError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Graph API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseFailed(String),

    #[error("Unauthorized (401): Token may be expired")]
    Unauthorized,

    #[error("Forbidden (403): Insufficient permissions")]
    Forbidden,

    #[error("Rate limited (429): Too many requests")]
    RateLimited,
}

/// Error returned by the HTTP handlers.
///
/// Every variant answers with the same generic 500; the cause only goes to the log.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Directory error: {0}")]
    Graph(#[from] GraphError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = IdentityError::Token("ManagedIdentityCredential: HTTP 401".into());
        assert_eq!(
            err.to_string(),
            "Failed to acquire access token: ManagedIdentityCredential: HTTP 401"
        );

        let err = GraphError::RequestFailed("HTTP 500".into());
        assert_eq!(err.to_string(), "Graph API request failed: HTTP 500");
    }

    #[test]
    fn test_identity_failure_wraps_into_graph_error() {
        let err: GraphError = IdentityError::Token("denied".into()).into();
        assert!(matches!(err, GraphError::Identity(IdentityError::Token(_))));
    }

    #[tokio::test]
    async fn test_api_error_is_generic_500() {
        let err = ApiError::Identity(IdentityError::Token("secret detail".into()));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Internal Server Error");
    }
}
