use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use products_core::product::ProductError;
use products_core::storage::{repository_error_to_status_code, RepositoryError};

/// `{"message": "..."}` body used by every non-data response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A failed request, rendered as a JSON message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Wraps a storage failure. The client sees `message`; the cause is logged.
    pub fn repository(err: RepositoryError, message: &str) -> Self {
        let status = StatusCode::from_u16(repository_error_to_status_code(&err))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        tracing::error!(error = %err, status = %status, "{message}");
        Self::new(status, message)
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match &err {
            ProductError::Malformed(detail) => {
                tracing::warn!(error = %detail, "Rejected malformed product")
            }
            ProductError::IdMismatch { path, body } => {
                tracing::warn!(path_id = %path, body_id = %body, "Rejected product with mismatched id")
            }
            _ => tracing::warn!(error = %err, "Rejected product"),
        }
        Self::new(StatusCode::BAD_REQUEST, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Message::new(self.message))).into_response()
    }
}
