//! Errors surfaced by request handlers and how they map onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::TodoError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Todo(#[from] TodoError),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(msg) | Self::Todo(TodoError::NotFound(msg)) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg).into_response()
            }
            Self::Todo(e @ TodoError::InvalidTitle { .. }) => {
                tracing::warn!("Validation error: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
            }
            // Stored-data faults: logged in full, clients see a generic message.
            e => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        let cases = [
            (ApiError::not_found("Not found."), StatusCode::NOT_FOUND),
            (
                ApiError::from(TodoError::NotFound("gone".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(TodoError::InvalidTitle { len: 0 }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(TodoError::IndexOutOfRange { index: 3, len: 1 }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::from(TodoError::IdExhausted(u64::MAX)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
