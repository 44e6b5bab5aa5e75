use authz::error::AuthzError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The authorizer failed outright. Surfaced as a server error, never 401/403.
    #[error("Authorizer failed: {0}")]
    AuthorizerFailure(#[from] AuthzError),

    #[error("User is not authorized to access this resource with an explicit deny")]
    ExplicitDeny,

    #[error("User is not authorized to access this resource")]
    ImplicitDeny,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// Convert error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::AuthorizerFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::ExplicitDeny => StatusCode::FORBIDDEN,
            GatewayError::ImplicitDeny => StatusCode::FORBIDDEN,
            GatewayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Mirrors what callers of the managed platform see: authorizer failures
        // carry no detail, denials carry a capitalized `Message`.
        let body = match self {
            GatewayError::AuthorizerFailure(_) => json!({ "message": null }),
            GatewayError::ExplicitDeny | GatewayError::ImplicitDeny => {
                json!({ "Message": self.to_string() })
            }
            GatewayError::Config(_) | GatewayError::Io(_) => {
                json!({ "message": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::AuthorizerFailure(AuthzError::InvalidToken).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(GatewayError::ExplicitDeny.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(GatewayError::ImplicitDeny.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            GatewayError::Config("bad port".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_token_is_server_error() {
        let response = GatewayError::from(AuthzError::InvalidToken).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
