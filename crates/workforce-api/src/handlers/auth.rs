// ============================================================================
// Workforce API - Auth Handlers
// File: crates/workforce-api/src/handlers/auth.rs
// ============================================================================
//! Registration and login

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use workforce_core::domain::{Credentials, NewUser, UserInfo};
use workforce_core::services::AuthResult;

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned by both register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserInfo,
}

impl AuthResponse {
    fn new(message: &'static str, result: AuthResult) -> Self {
        Self { message, token: result.token, user: result.user }
    }
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let result = state
        .auth
        .register(input)
        .await
        .map_err(ApiError::during("registering user"))?;

    Ok((StatusCode::CREATED, Json(AuthResponse::new("User created successfully", result))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(credentials) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let result = state
        .auth
        .login(credentials)
        .await
        .map_err(ApiError::during("logging in"))?;

    Ok(Json(AuthResponse::new("user login successfully", result)))
}
