//! Employee self-service lookups

use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::domain::UserInfo;
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct EmployeeService<R: UserRepository + ?Sized> {
    user_repo: Arc<R>,
}

impl<R: UserRepository + ?Sized> EmployeeService<R> {
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    /// Public record of the authenticated caller.
    pub async fn profile(&self, user_id: &Uuid) -> Result<UserInfo, DomainError> {
        let user = self.user_repo.find_by_id(user_id).await?.ok_or_else(|| {
            warn!("Profile requested for unknown user: {}", user_id);
            DomainError::UserNotFound
        })?;
        Ok(UserInfo::from(&user))
    }
}
