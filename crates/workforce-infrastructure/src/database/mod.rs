//! Database module (PostgreSQL and in-memory adapters)

pub mod connection;
pub mod postgres;
pub mod memory;

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use workforce_core::repositories::{DepartmentRepository, UserRepository};
use workforce_shared::config::DatabaseSettings;

pub use connection::{create_pool, run_migrations};
pub use memory::{InMemoryDepartmentRepository, InMemoryUserRepository};
pub use postgres::{PgDepartmentRepository, PgUserRepository};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database connection failed: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// The two stores behind their ports, ready to hand to the services.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub departments: Arc<dyn DepartmentRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            departments: Arc::new(InMemoryDepartmentRepository::new()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            departments: Arc::new(PgDepartmentRepository::new(pool)),
        }
    }

    /// `memory://` selects the in-memory store; anything else is a Postgres URL.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        if settings.is_in_memory() {
            info!("Using in-memory store; data is lost on shutdown");
            return Ok(Self::in_memory());
        }

        let pool = create_pool(&settings.url, settings.max_connections, settings.min_connections).await?;
        info!("Database connection established.");
        run_migrations(&pool).await?;
        info!("Database migrations applied.");
        Ok(Self::postgres(pool))
    }
}
