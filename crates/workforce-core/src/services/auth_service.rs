// ============================================================================
// Workforce Core - Authentication Service
// File: crates/workforce-core/src/services/auth_service.rs
// ============================================================================
//! Authentication service with register, login, and bearer-token verification

use std::sync::Arc;
use uuid::Uuid;
use tracing::{info, warn};
use validator::Validate;

use workforce_security::{JwtService, PasswordService};
use workforce_shared::utils::mask_email;

use crate::domain::{Credentials, NewUser, User, UserInfo};
use crate::error::DomainError;
use crate::repositories::UserRepository;

/// Authentication service for handling user login/register flows
pub struct AuthService<R: UserRepository + ?Sized> {
    user_repo: Arc<R>,
    jwt: JwtService,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(user_repo: Arc<R>, jwt: JwtService) -> Self {
        Self { user_repo, jwt }
    }

    /// Register a new user and sign them in
    pub async fn register(&self, input: NewUser) -> Result<AuthResult, DomainError> {
        input.validate()?;
        info!("Registration attempt for email: {}", mask_email(&input.email));

        // 1. Email must be unique
        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            warn!("Registration failed: email already exists: {}", mask_email(&input.email));
            return Err(DomainError::EmailAlreadyExists(input.email));
        }

        // 2. Hash before anything is stored
        let password_hash = PasswordService::hash(&input.password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        // 3. Persist
        let user = User::new(input, password_hash);
        let created_user = self.user_repo.create(&user).await?;

        info!("Registration successful for user: {}", created_user.id);
        self.signed_in(&created_user)
    }

    /// Login with email and password
    pub async fn login(&self, credentials: Credentials) -> Result<AuthResult, DomainError> {
        credentials.validate()?;
        let masked = mask_email(&credentials.email);

        let user = self
            .user_repo
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: email not found: {}", masked);
                DomainError::InvalidCredentials
            })?;

        let password_valid = PasswordService::verify(&credentials.password, &user.password)
            .map_err(|e| {
                warn!("Login failed: unreadable password hash for user {}: {}", user.id, e);
                DomainError::InvalidCredentials
            })?;

        if !password_valid {
            warn!("Login failed: invalid password for: {}", masked);
            return Err(DomainError::InvalidCredentials);
        }

        info!("Login successful for: {}", masked);
        self.signed_in(&user)
    }

    /// Resolve a bearer token to the user id it was issued for
    pub fn verify(&self, token: &str) -> Result<Uuid, DomainError> {
        self.jwt
            .verify(token)
            .map_err(|e| DomainError::InvalidToken(e.to_string()))
    }

    fn signed_in(&self, user: &User) -> Result<AuthResult, DomainError> {
        let token = self
            .jwt
            .issue(&user.id)
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;
        Ok(AuthResult { token, user: UserInfo::from(user) })
    }
}

/// Result of a successful register or login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub user: UserInfo,
}
