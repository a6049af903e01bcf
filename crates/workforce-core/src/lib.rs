//! # Workforce Core
//! 
//! Domain entities, services, and repository traits for the workforce
//! directory: users, departments, and the member resync that keeps
//! `User::department_name` in step with department writes.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
