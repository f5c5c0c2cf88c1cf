use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use peacock_core::error::PeacockError;
use serde_json::json;
use thiserror::Error;

/// Errors returned by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid or incomplete request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Path outside the library root (403)
    #[error("{0}")]
    Forbidden(String),

    /// Unknown file or directory (404)
    #[error("{0}")]
    NotFound(String),

    /// Failure while doing the work (500)
    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PeacockError> for ApiError {
    fn from(err: PeacockError) -> Self {
        match err {
            PeacockError::NotFound(msg) => ApiError::NotFound(msg),
            PeacockError::PermissionDenied(msg) => ApiError::Forbidden(msg),
            PeacockError::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Background task failed: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}
