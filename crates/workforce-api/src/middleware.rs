//! Bearer-token gate for the protected routes

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ApiError, NO_TOKEN, TOKEN_FAILED};
use crate::state::AppState;

/// Id of the authenticated caller, inserted into request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request).ok_or_else(|| ApiError::unauthorized(NO_TOKEN))?;

    let user_id = state.auth.verify(token).map_err(|e| {
        warn!("Rejected bearer token on {}: {}", request.uri().path(), e);
        ApiError::unauthorized(TOKEN_FAILED)
    })?;

    debug!("Authenticated request from user {}", user_id);
    request.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(request).await)
}
