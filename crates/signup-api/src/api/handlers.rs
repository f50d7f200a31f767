//! HTTP request handlers.

use super::types::HealthResponse;
use super::AppState;
use crate::controller::{HttpRequest, HttpResponse};
use crate::error::SignupError;
use axum::{extract::State, Json};
use serde_json::Value;

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, SignupError> {
    let accounts = state.accounts.count().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        accounts,
    }))
}

/// Create an account.
pub async fn signup(State(state): State<AppState>, Json(body): Json<Value>) -> HttpResponse {
    state.signup.handle(HttpRequest::new(body)).await
}
