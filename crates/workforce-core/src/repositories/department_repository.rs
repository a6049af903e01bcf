//! Department repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{Department, DepartmentFilter};
use crate::error::DomainError;

/// Listing and search return departments in creation order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn count(&self) -> Result<u64, DomainError>;
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Department>, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Department>, DomainError>;
    async fn search(&self, filter: &DepartmentFilter) -> Result<Vec<Department>, DomainError>;
    async fn create(&self, department: &Department) -> Result<Department, DomainError>;
    /// `None` when the row vanished between load and save.
    async fn update(&self, department: &Department) -> Result<Option<Department>, DomainError>;
    /// `false` when nothing was deleted.
    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError>;
}
