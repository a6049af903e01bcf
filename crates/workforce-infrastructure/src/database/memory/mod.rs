//! In-memory repository implementations
//!
//! Rows are kept in insertion order behind `tokio::sync::RwLock`, which is
//! the creation order the ports promise.

pub mod user_repo_impl;
pub mod department_repo_impl;

pub use user_repo_impl::InMemoryUserRepository;
pub use department_repo_impl::InMemoryDepartmentRepository;
