//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

/// The only identity carried is the user id in `sub`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// HS256 signer/verifier. Without `expiry_seconds` tokens are valid forever.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_seconds: Option<i64>,
}

impl JwtService {
    pub fn new(secret: &str, expiry_seconds: Option<i64>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_seconds,
        }
    }

    pub fn issue(&self, user_id: &Uuid) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: self
                .expiry_seconds
                .map(|secs| (now + Duration::seconds(secs)).timestamp()),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })
    }

    /// Validates `token` and returns the user id it was issued for.
    pub fn verify(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims = self.validate_token(token)?;
        Uuid::parse_str(&claims.sub)
            .map_err(|_| JwtError::ValidationError("subject is not a user id".to_string()))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        if self.expiry_seconds.is_some() {
            validation.set_required_spec_claims(&["exp", "sub"]);
            validation.validate_exp = true;
        } else {
            validation.set_required_spec_claims(&["sub"]);
            validation.validate_exp = false;
        }
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_to_same_user() {
        let service = JwtService::new("test-secret", None);
        let user_id = Uuid::new_v4();
        let token = service.issue(&user_id).unwrap();
        assert_eq!(service.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn unbounded_tokens_carry_no_exp() {
        let service = JwtService::new("test-secret", None);
        let token = service.issue(&Uuid::new_v4()).unwrap();
        let claims = service.validate_token(&token).unwrap();
        assert!(claims.exp.is_none());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = JwtService::new("secret-a", None);
        let verifier = JwtService::new("secret-b", None);
        let token = issuer.issue(&Uuid::new_v4()).unwrap();
        assert!(matches!(verifier.verify(&token), Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn garbage_is_rejected() {
        let service = JwtService::new("test-secret", None);
        assert!(service.verify("not.a.jwt").is_err());
        assert!(service.verify("").is_err());
    }

    #[test]
    fn configured_expiry_is_enforced() {
        let service = JwtService::new("test-secret", Some(-3600));
        let token = service.issue(&Uuid::new_v4()).unwrap();
        assert!(matches!(service.verify(&token), Err(JwtError::TokenExpired)));
    }

    #[test]
    fn expiring_verifier_rejects_token_without_exp() {
        let unbounded = JwtService::new("test-secret", None);
        let bounded = JwtService::new("test-secret", Some(3600));
        let token = unbounded.issue(&Uuid::new_v4()).unwrap();
        assert!(bounded.verify(&token).is_err());
    }
}
