//! Request, response and client error types for the signup controller.

use crate::account::{AccountInput, AccountRecord};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Required body fields, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "email", "password", "passwordConfirmation"];

/// Error body returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ApiError {
    #[error("Missing param: {field}")]
    MissingParam { field: String },

    #[error("Invalid param: {field}")]
    InvalidParam { field: String },

    #[error("Internal server error")]
    ServerError,
}

impl ApiError {
    pub fn missing_param(field: impl Into<String>) -> Self {
        ApiError::MissingParam {
            field: field.into(),
        }
    }

    pub fn invalid_param(field: impl Into<String>) -> Self {
        ApiError::InvalidParam {
            field: field.into(),
        }
    }
}

/// Incoming request as seen by the controller.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    pub body: Value,
}

impl HttpRequest {
    pub fn new(body: Value) -> Self {
        Self { body }
    }
}

/// Response body: the created account or an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Account(AccountRecord),
    Error(ApiError),
}

/// Uniform controller response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: ResponseBody,
}

impl HttpResponse {
    pub fn ok(account: AccountRecord) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            body: ResponseBody::Account(account),
        }
    }

    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST.as_u16(),
            body: ResponseBody::Error(error),
        }
    }

    pub fn server_error() -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            body: ResponseBody::Error(ApiError::ServerError),
        }
    }
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

/// Signup payload extracted from the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl SignUpInput {
    /// Extract the four required fields.
    ///
    /// Presence of every field is checked before any value is inspected, so a
    /// missing field is always reported ahead of a malformed one. `null`
    /// counts as missing.
    pub fn from_body(body: &Value) -> Result<Self, ApiError> {
        for field in REQUIRED_FIELDS {
            if matches!(body.get(field), None | Some(Value::Null)) {
                return Err(ApiError::missing_param(field));
            }
        }

        Ok(Self {
            name: string_field(body, "name")?,
            email: string_field(body, "email")?,
            password: string_field(body, "password")?,
            password_confirmation: string_field(body, "passwordConfirmation")?,
        })
    }

    /// Drop the confirmation, keeping the other fields unchanged.
    pub fn into_account(self) -> AccountInput {
        AccountInput {
            name: self.name,
            email: self.email,
            password: self.password,
        }
    }
}

fn string_field(body: &Value, field: &str) -> Result<String, ApiError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ApiError::invalid_param(field))
}
