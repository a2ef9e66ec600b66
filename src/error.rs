// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// `ServerMisconfigured` and `ServerError` both map to 500 but stay distinct
/// variants: the former means the static secret is absent server-side, the
/// latter wraps a datastore or processing failure.
#[derive(Debug)]
pub enum ApiError {
    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    ServerMisconfigured(String),
    ServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ServerMisconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::ServerMisconfigured(msg) => msg,
            ApiError::ServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "detail": self.message() })
    }
}

// Static constructor methods
impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn server_misconfigured(message: impl Into<String>) -> Self {
        ApiError::ServerMisconfigured(message.into())
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        ApiError::ServerError(message.into())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::ServerError(msg) | ApiError::ServerMisconfigured(msg) = &self {
            tracing::error!("request failed: {}", msg);
        }
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

/// Handler result: a JSON payload or a taxonomy error.
pub type ApiResult<T> = Result<Json<T>, ApiError>;
