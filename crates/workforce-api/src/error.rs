use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;
use validator::ValidationErrors;

use workforce_core::error::DomainError;

pub const NO_TOKEN: &str = "Not authorized, no token";
pub const TOKEN_FAILED: &str = "Not authorized, token failed";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String, detail: Option<Value> },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Error in {operation}: {detail}")]
    Internal { operation: &'static str, detail: String },
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Value>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest { message: message.into(), detail: None }
    }

    pub fn validation(detail: impl Into<Value>) -> Self {
        ApiError::BadRequest {
            message: "Validation error".to_string(),
            detail: Some(detail.into()),
        }
    }

    pub fn unauthorized(message: &str) -> Self {
        ApiError::Unauthorized(message.to_string())
    }

    /// Maps a domain failure; anything that is not the caller's fault becomes
    /// a 500 reported as "Error in <operation>".
    pub fn from_domain(err: DomainError, operation: &'static str) -> Self {
        match err {
            DomainError::Validation(errors) => {
                ApiError::validation(field_error_detail(&errors))
            }
            DomainError::InvalidField { .. } => ApiError::validation(err.to_string()),
            DomainError::MissingRequiredFields => ApiError::bad_request("Missing required fields"),
            DomainError::EmailAlreadyExists(_) => ApiError::bad_request("Email is already registered"),
            DomainError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            DomainError::InvalidToken(_) => ApiError::unauthorized(TOKEN_FAILED),
            DomainError::UserNotFound | DomainError::DepartmentNotFound => ApiError::NotFound(err.to_string()),
            DomainError::PasswordHashError(_)
            | DomainError::TokenGenerationError(_)
            | DomainError::DatabaseError(_) => ApiError::Internal { operation, detail: err.to_string() },
        }
    }

    /// `map_err` adapter carrying the operation name into 500 responses.
    pub fn during(operation: &'static str) -> impl FnOnce(DomainError) -> ApiError {
        move |err| ApiError::from_domain(err, operation)
    }
}

/// `{field: [{code, message}]}` per rejected field. The rejected value that
/// validator keeps in `params` is never echoed back.
fn field_error_detail(errors: &ValidationErrors) -> Value {
    let fields: Map<String, Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let entries = errs
                .iter()
                .map(|e| json!({ "code": e.code, "message": e.message }))
                .collect();
            (field.to_string(), Value::Array(entries))
        })
        .collect();
    Value::Object(fields)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest { message, detail } => {
                tracing::warn!("Bad request: {}", message);
                (StatusCode::BAD_REQUEST, ErrorResponse { message, error: detail })
            }
            ApiError::Unauthorized(message) => {
                tracing::warn!("Unauthorized: {}", message);
                (StatusCode::UNAUTHORIZED, ErrorResponse { message, error: None })
            }
            ApiError::NotFound(message) => {
                tracing::warn!("Not found: {}", message);
                (StatusCode::NOT_FOUND, ErrorResponse { message, error: None })
            }
            ApiError::Internal { operation, detail } => {
                tracing::error!("Error in {}: {}", operation, detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message: format!("Error in {}", operation),
                        error: Some(Value::String(detail)),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
