//! User repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{Role, User};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError>;
    /// Exact, case-sensitive match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    /// Users that exist among `ids`, in no particular order.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError>;
    async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DomainError>;
    async fn create(&self, user: &User) -> Result<User, DomainError>;
    /// Writes `department_name` onto every existing user in `ids`; unknown ids
    /// are skipped. Returns the number of users touched.
    async fn set_department_name(&self, ids: &[Uuid], department_name: &str) -> Result<u64, DomainError>;
}
