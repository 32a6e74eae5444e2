use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{error_response::ErrorResponse, repository::RepositoryError};

/// Everything a task handler can fail with, mapped onto a status code and an
/// `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("{0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Repository(RepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Repository(RepositoryError::InvalidRequest(_)) | ApiError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Repository(RepositoryError::StorageUnavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Repository(RepositoryError::NotFound(_)) => "Task not found".to_string(),
            ApiError::Repository(RepositoryError::InvalidRequest(msg)) | ApiError::InvalidRequest(msg) => {
                msg.clone()
            }
            // Store internals stay in the server log.
            ApiError::Repository(RepositoryError::StorageUnavailable(_)) => "Task storage unavailable".to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "task request failed");
        } else {
            tracing::debug!(error = %self, %status, "task request rejected");
        }
        (status, Json(ErrorResponse { error: self.message() })).into_response()
    }
}
