// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::billing::BillingError;
use crate::middleware::response::Envelope;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 502 Bad Gateway (external service issues)
    BadGateway(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::BadGateway(msg) => msg,
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        ApiError::BadGateway(message.into())
    }
}

// Collaborator failures never reach the client verbatim
impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        tracing::error!(error = %err, "Billing provider call failed");
        ApiError::internal_server_error("Failed to fetch billing data")
    }
}

impl From<crate::client::ActionError> for ApiError {
    fn from(err: crate::client::ActionError) -> Self {
        use crate::client::ActionError;

        match err {
            ActionError::Status { status, .. } if status == reqwest::StatusCode::NOT_FOUND => {
                ApiError::not_found("Resource not found")
            }
            ActionError::Status { status, .. } if status == reqwest::StatusCode::UNAUTHORIZED => {
                ApiError::unauthorized("Session rejected by content service")
            }
            ActionError::Status { status, .. } if status == reqwest::StatusCode::FORBIDDEN => {
                ApiError::forbidden("Access denied by content service")
            }
            other => {
                tracing::error!(error = %other, "Content service call failed");
                ApiError::bad_gateway("Content service unavailable")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body: Envelope<()> = Envelope::failure(self.message());
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_errors_become_generic_500() {
        let err: ApiError = BillingError::Provider("No such invoice: 'in_secret_detail'".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("in_secret_detail"));
    }

    #[test]
    fn guard_statuses() {
        assert_eq!(ApiError::unauthorized("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
    }
}
