//! Uniform JSON error envelope and handler-level error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::domains::students::models::ValidationErrors;
use crate::domains::students::store::StoreError;

/// Error envelope: `{"status": "Error", "error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "Error".to_string(),
            error: message.into(),
        }
    }
}

/// Errors a request handler can surface to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body was empty where one is required.
    #[error("empty body")]
    EmptyBody,

    /// Malformed JSON body or unparseable path parameter.
    #[error("{0}")]
    BadRequest(String),

    /// Well-formed payload violating field constraints.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Storage failure, including not-found.
    #[error("{0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyBody | Self::BadRequest(_) | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            // Not-found maps to 500 exactly like any other storage failure;
            // StoreError::NotFound stays a distinct variant so callers can
            // still tell the two apart.
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(self.to_string());
        (self.status_code(), Json(body)).into_response()
    }
}
