//! User domain entity

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Role enumeration. Stored and returned, never used for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Employee,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "employee" => Some(Role::Employee),
            "manager" => Some(Role::Manager),
            _ => None,
        }
    }
}

/// Stored user record. `password` always holds a hash.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub gender: Option<String>,
    pub hobbies: Vec<String>,
    /// Copy of the owning department's name, written by member resync only.
    pub department_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a user from a validated registration and an already hashed secret.
    pub fn new(input: NewUser, password_hash: String) -> Self {
        let role = input
            .role
            .as_deref()
            .and_then(Role::from_str)
            .unwrap_or_default();
        Self {
            id: workforce_shared::new_id(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: password_hash,
            role,
            gender: input.gender,
            hobbies: input.hobbies,
            department_name: None,
            created_at: Utc::now(),
        }
    }
}

/// Registration payload.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct NewUser {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, max = 18, message = "Password must be between 8 and 18 characters long"))]
    pub password: String,

    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,

    pub gender: Option<String>,
    pub hobbies: Vec<String>,
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    match Role::from_str(role) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("role").with_message(Cow::Borrowed("Invalid role"))),
    }
}

/// Login payload.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct Credentials {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

/// Public view of a user: everything but the secret.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub hobbies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role,
            gender: user.gender.clone(),
            hobbies: user.hobbies.clone(),
            department_name: user.department_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> NewUser {
        NewUser {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "password123".into(),
            role: None,
            gender: Some("female".into()),
            hobbies: vec!["math".into()],
        }
    }

    #[test]
    fn role_defaults_to_employee() {
        let user = User::new(registration(), "hash".into());
        assert_eq!(user.role, Role::Employee);
        assert!(user.department_name.is_none());
    }

    #[test]
    fn registration_accepts_valid_input() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn registration_rejects_password_outside_bounds() {
        let mut short = registration();
        short.password = "1234567".into();
        assert!(short.validate().unwrap_err().field_errors().contains_key("password"));

        let mut long = registration();
        long.password = "a".repeat(19);
        assert!(long.validate().unwrap_err().field_errors().contains_key("password"));

        let mut edge = registration();
        edge.password = "a".repeat(18);
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn registration_rejects_unknown_role_and_bad_email() {
        let mut input = registration();
        input.role = Some("admin".into());
        input.email = "not-an-email".into();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("role"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn missing_fields_deserialize_to_validation_failures() {
        let input: NewUser = serde_json::from_str(r#"{"email":"ada@example.com"}"#).unwrap();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("last_name"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn public_view_has_no_secret() {
        let mut user = User::new(registration(), "super-secret-hash".into());
        user.role = Role::Manager;
        let json = serde_json::to_value(UserInfo::from(&user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "manager");
        assert_eq!(json["firstName"], "Ada");
        assert!(json.get("departmentName").is_none());
        assert!(!json.to_string().contains("super-secret-hash"));
    }
}
