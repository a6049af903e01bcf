use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use workforce_core::domain::{Department, DepartmentFilter};
use workforce_core::error::DomainError;
use workforce_core::repositories::DepartmentRepository;

#[derive(Default)]
pub struct InMemoryDepartmentRepository {
    departments: RwLock<Vec<Department>>,
}

impl InMemoryDepartmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.departments.read().await.len() as u64)
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Department>, DomainError> {
        Ok(self
            .departments
            .read()
            .await
            .iter()
            .skip(to_usize(offset))
            .take(to_usize(limit))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Department>, DomainError> {
        Ok(self.departments.read().await.iter().find(|d| d.id == *id).cloned())
    }

    async fn search(&self, filter: &DepartmentFilter) -> Result<Vec<Department>, DomainError> {
        Ok(self
            .departments
            .read()
            .await
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    async fn create(&self, department: &Department) -> Result<Department, DomainError> {
        self.departments.write().await.push(department.clone());
        Ok(department.clone())
    }

    async fn update(&self, department: &Department) -> Result<Option<Department>, DomainError> {
        let mut departments = self.departments.write().await;
        match departments.iter_mut().find(|d| d.id == department.id) {
            Some(existing) => {
                *existing = department.clone();
                Ok(Some(department.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let mut departments = self.departments.write().await;
        let before = departments.len();
        departments.retain(|d| d.id != *id);
        Ok(departments.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn department(name: &str, location: &str) -> Department {
        Department {
            id: Uuid::new_v4(),
            department_name: name.into(),
            category_name: "Ops".into(),
            location: location.into(),
            salary: 1.0,
            employee_ids: vec![],
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    #[tokio::test]
    async fn list_pages_in_insertion_order() {
        let repo = InMemoryDepartmentRepository::new();
        for i in 0..7 {
            repo.create(&department(&format!("D{}", i), "Austin")).await.unwrap();
        }
        let second: Vec<_> = repo
            .list(5, 5)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.department_name)
            .collect();
        assert_eq!(second, vec!["D5", "D6"]);
        assert!(repo.list(10, 5).await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn search_applies_filter() {
        let repo = InMemoryDepartmentRepository::new();
        repo.create(&department("Eng", "Austin")).await.unwrap();
        repo.create(&department("Eng", "Boston")).await.unwrap();
        repo.create(&department("Ops", "austin")).await.unwrap();

        let filter = DepartmentFilter {
            department_name: Some("Eng".into()),
            location_prefix: Some("AUS".into()),
        };
        let found = repo.search(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].location, "Austin");
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let repo = InMemoryDepartmentRepository::new();
        let ghost = department("Ghost", "Nowhere");
        assert!(repo.update(&ghost).await.unwrap().is_none());
        assert!(!repo.delete(&ghost.id).await.unwrap());

        let kept = repo.create(&department("Eng", "Austin")).await.unwrap();
        assert!(repo.delete(&kept.id).await.unwrap());
        assert!(repo.find_by_id(&kept.id).await.unwrap().is_none());
    }
}
