// ============================================================================
// Workforce Core - Directory Service
// File: crates/workforce-core/src/services/directory_service.rs
// ============================================================================
//! Department lifecycle and member resync.
//!
//! Every create/update that carries member ids is followed by a second,
//! separate write that copies the department's current name onto those users.
//! The two writes are not atomic. Deleting a department, or dropping a user
//! from its member list, leaves that user's `department_name` untouched.

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Department, DepartmentInput};
use crate::error::DomainError;
use crate::repositories::{DepartmentRepository, UserRepository};

pub struct DirectoryService<D, U>
where
    D: DepartmentRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    departments: Arc<D>,
    users: Arc<U>,
}

impl<D, U> DirectoryService<D, U>
where
    D: DepartmentRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub fn new(departments: Arc<D>, users: Arc<U>) -> Self {
        Self { departments, users }
    }

    pub async fn create_department(&self, input: DepartmentInput) -> Result<Department, DomainError> {
        let department = input.into_new_department()?;
        let created = self.departments.create(&department).await?;
        info!(
            "Department created: {} ({}) with {} members",
            created.department_name,
            created.id,
            created.employee_ids.len()
        );

        self.resync_members(&created.employee_ids, &created.department_name).await?;
        Ok(created)
    }

    pub async fn update_department(&self, id: &Uuid, patch: DepartmentInput) -> Result<Department, DomainError> {
        let mut department = self
            .departments
            .find_by_id(id)
            .await?
            .ok_or(DomainError::DepartmentNotFound)?;

        let resync = patch.apply_to(&mut department)?;

        let updated = self.departments.update(&department).await?.ok_or_else(|| {
            warn!("Department {} disappeared before update was saved", id);
            DomainError::DepartmentNotFound
        })?;
        info!("Department updated: {} ({})", updated.department_name, updated.id);

        // Only the ids named in the patch are resynced, using the new name.
        if let Some(member_ids) = resync {
            self.resync_members(&member_ids, &updated.department_name).await?;
        }
        Ok(updated)
    }

    pub async fn delete_department(&self, id: &Uuid) -> Result<(), DomainError> {
        if !self.departments.delete(id).await? {
            return Err(DomainError::DepartmentNotFound);
        }
        info!("Department deleted: {}", id);
        Ok(())
    }

    async fn resync_members(&self, member_ids: &[Uuid], department_name: &str) -> Result<(), DomainError> {
        if member_ids.is_empty() {
            return Ok(());
        }
        let touched = self.users.set_department_name(member_ids, department_name).await?;
        if touched < member_ids.len() as u64 {
            warn!(
                "Member resync for '{}' skipped {} unknown ids",
                department_name,
                member_ids.len() as u64 - touched
            );
        }
        Ok(())
    }
}
