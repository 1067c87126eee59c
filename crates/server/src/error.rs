use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Check error: {0}")]
    Check(#[from] checker::CheckError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ServerError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Check(checker::CheckError::InvalidInput(_))
            | ServerError::Check(checker::CheckError::EmptyOrTooShort) => StatusCode::BAD_REQUEST,
            ServerError::Check(checker::CheckError::NoActiveParams) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServerError::Check(checker::CheckError::Deadline) => StatusCode::GATEWAY_TIMEOUT,
            ServerError::Check(checker::CheckError::CorpusRead(_))
            | ServerError::Check(checker::CheckError::Persistence(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServerError::Internal(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    fn error_code(&self) -> String {
        match self {
            ServerError::Authentication(_) => "AUTH_FAILED".to_string(),
            ServerError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED".to_string(),
            ServerError::BadRequest(_) => "BAD_REQUEST".to_string(),
            ServerError::Check(e) => e.kind().to_string(),
            ServerError::Internal(_) => "INTERNAL_ERROR".to_string(),
            ServerError::Config(_) => "CONFIG_ERROR".to_string(),
            ServerError::NotFound => "NOT_FOUND".to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}

// Display is automatically derived by thiserror::Error
