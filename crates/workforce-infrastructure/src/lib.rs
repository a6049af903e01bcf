//! # Workforce Infrastructure
//! 
//! Persistence adapters for the workforce directory ports: PostgreSQL via
//! sqlx, and an in-memory store for local runs and tests.

pub mod database;

pub use database::{
    create_pool, run_migrations, InMemoryDepartmentRepository, InMemoryUserRepository,
    PgDepartmentRepository, PgUserRepository, Repositories, StoreError,
};
