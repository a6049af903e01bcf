//! PostgreSQL repository implementations

pub mod user_repo_impl;
pub mod department_repo_impl;

pub use user_repo_impl::PgUserRepository;
pub use department_repo_impl::PgDepartmentRepository;

use workforce_core::error::DomainError;

pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

pub(crate) fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
