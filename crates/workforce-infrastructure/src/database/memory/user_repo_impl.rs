use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use workforce_core::domain::{Role, User};
use workforce_core::error::DomainError;
use workforce_core::repositories::UserRepository;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        // Mirrors the UNIQUE constraint on users.email.
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists(user.email.clone()));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn set_department_name(&self, ids: &[Uuid], department_name: &str) -> Result<u64, DomainError> {
        let mut touched = 0;
        for user in self.users.write().await.iter_mut().filter(|u| ids.contains(&u.id)) {
            user.department_name = Some(department_name.to_string());
            touched += 1;
        }
        Ok(touched)
    }
}
