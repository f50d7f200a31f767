//! Error types for the signup service.

use crate::controller::ApiError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use document_store::StoreError;
use thiserror::Error;

/// Internal failure raised by a collaborator.
///
/// None of these messages reach the client; the controller and the
/// `IntoResponse` impl below replace them with an opaque `ServerError` body.
#[derive(Debug, Error)]
pub enum SignupError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Database error: {0}")]
    Database(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiError::ServerError)).into_response()
    }
}

impl From<argon2::Error> for SignupError {
    fn from(e: argon2::Error) -> Self {
        SignupError::Hashing(e.to_string())
    }
}

impl From<argon2::password_hash::Error> for SignupError {
    fn from(e: argon2::password_hash::Error) -> Self {
        SignupError::Hashing(e.to_string())
    }
}

impl From<serde_json::Error> for SignupError {
    fn from(e: serde_json::Error) -> Self {
        SignupError::Internal(format!("JSON serialization error: {}", e))
    }
}

impl From<tokio::task::JoinError> for SignupError {
    fn from(e: tokio::task::JoinError) -> Self {
        SignupError::Internal(format!("Background task failed: {}", e))
    }
}
