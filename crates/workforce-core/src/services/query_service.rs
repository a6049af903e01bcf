// ============================================================================
// Workforce Core - Query Service
// File: crates/workforce-core/src/services/query_service.rs
// ============================================================================
//! Read side: paginated department listing, member search, employee roster

use std::collections::HashMap;
use std::sync::Arc;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use workforce_shared::constants::SORT_DESCENDING;
use workforce_shared::utils::non_blank;
use workforce_shared::{Page, Pagination};

use crate::domain::{Department, DepartmentFilter, DepartmentView, Role, User, UserInfo};
use crate::error::DomainError;
use crate::repositories::{DepartmentRepository, UserRepository};

/// Query string of the member search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearch {
    pub department_name: Option<String>,
    pub location_starts_with: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Anything other than `desc` sorts ascending.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some(SORT_DESCENDING) => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }
}

impl MemberSearch {
    pub fn filter(&self) -> DepartmentFilter {
        DepartmentFilter {
            department_name: non_blank(self.department_name.as_deref()).map(str::to_string),
            location_prefix: self
                .location_starts_with
                .as_deref()
                .filter(|prefix| !prefix.is_empty())
                .map(str::to_string),
        }
    }

    pub fn order(&self) -> SortOrder {
        SortOrder::from_query(self.sort_by.as_deref())
    }
}

/// Outcome of a member search. `NoDepartments` is a successful, empty answer.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Members(Vec<UserInfo>),
    NoDepartments,
}

pub struct QueryService<D, U>
where
    D: DepartmentRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    departments: Arc<D>,
    users: Arc<U>,
}

impl<D, U> QueryService<D, U>
where
    D: DepartmentRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub fn new(departments: Arc<D>, users: Arc<U>) -> Self {
        Self { departments, users }
    }

    /// One page of departments with members expanded. Out-of-range pages are
    /// empty but still report the real totals.
    pub async fn list_departments(&self, pagination: Pagination) -> Result<Page<DepartmentView>, DomainError> {
        let total = self.departments.count().await?;
        let departments = self
            .departments
            .list(pagination.offset(), pagination.limit())
            .await?;
        debug!(
            "Listing departments page {} ({} of {} total)",
            pagination.page,
            departments.len(),
            total
        );

        let members = self.load_members(&departments).await?;
        let results = departments
            .into_iter()
            .map(|department| {
                let employees = expand(&department.employee_ids, &members);
                DepartmentView::new(department, employees)
            })
            .collect();

        Ok(Page::new(pagination, total, results))
    }

    /// Members of every matching department, sorted by first name within each
    /// department and concatenated in department order. Not deduplicated.
    pub async fn search_members(&self, query: &MemberSearch) -> Result<SearchOutcome, DomainError> {
        let departments = self.departments.search(&query.filter()).await?;
        if departments.is_empty() {
            return Ok(SearchOutcome::NoDepartments);
        }

        let order = query.order();
        let members = self.load_members(&departments).await?;
        let employees = departments
            .iter()
            .flat_map(|department| {
                let mut group = expand(&department.employee_ids, &members);
                group.sort_by(|a, b| match order {
                    SortOrder::Ascending => a.first_name.cmp(&b.first_name),
                    SortOrder::Descending => b.first_name.cmp(&a.first_name),
                });
                group
            })
            .collect();

        Ok(SearchOutcome::Members(employees))
    }

    /// Every user with the employee role; managers are left out.
    pub async fn list_employees(&self) -> Result<Vec<UserInfo>, DomainError> {
        let employees = self.users.find_by_role(Role::Employee).await?;
        Ok(employees.iter().map(UserInfo::from).collect())
    }

    async fn load_members(&self, departments: &[Department]) -> Result<HashMap<Uuid, User>, DomainError> {
        let mut ids: Vec<Uuid> = departments
            .iter()
            .flat_map(|d| d.employee_ids.iter().copied())
            .collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        ids.sort_unstable();
        ids.dedup();

        let users = self.users.find_by_ids(&ids).await?;
        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}

/// Resolves member ids in list order, dropping ids with no user behind them.
fn expand(ids: &[Uuid], members: &HashMap<Uuid, User>) -> Vec<UserInfo> {
    ids.iter()
        .filter_map(|id| members.get(id))
        .map(UserInfo::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewUser;
    use crate::repositories::{MockDepartmentRepository, MockUserRepository};
    use chrono::Utc;

    fn user(first_name: &str, role: Role) -> User {
        let mut user = User::new(
            NewUser {
                first_name: first_name.into(),
                last_name: "Doe".into(),
                email: format!("{}@example.com", first_name.to_lowercase()),
                ..NewUser::default()
            },
            "hash".into(),
        );
        user.role = role;
        user
    }

    fn department(name: &str, location: &str, members: &[&User]) -> Department {
        Department {
            id: Uuid::new_v4(),
            department_name: name.into(),
            category_name: "Tech".into(),
            location: location.into(),
            salary: 1000.0,
            employee_ids: members.iter().map(|u| u.id).collect(),
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    fn users_returning(all: Vec<User>) -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_find_by_ids().returning(move |ids| {
            Ok(all.iter().filter(|u| ids.contains(&u.id)).cloned().collect())
        });
        users
    }

    fn service(
        departments: MockDepartmentRepository,
        users: MockUserRepository,
    ) -> QueryService<MockDepartmentRepository, MockUserRepository> {
        QueryService::new(Arc::new(departments), Arc::new(users))
    }

    #[tokio::test]
    async fn page_expands_members_in_list_order_and_drops_unknown_ids() {
        let bob = user("Bob", Role::Employee);
        let amy = user("Amy", Role::Employee);
        let mut eng = department("Eng", "Austin", &[&bob, &amy]);
        eng.employee_ids.push(Uuid::new_v4());

        let mut departments = MockDepartmentRepository::new();
        departments.expect_count().returning(|| Ok(1));
        departments
            .expect_list()
            .withf(|offset, limit| *offset == 0 && *limit == 5)
            .returning(move |_, _| Ok(vec![eng.clone()]));

        let page = service(departments, users_returning(vec![bob, amy]))
            .list_departments(Pagination::new(1, 5))
            .await
            .unwrap();

        assert_eq!(page.total_results, 1);
        assert_eq!(page.total_pages, 1);
        let names: Vec<_> = page.results[0].employees.iter().map(|u| u.first_name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Amy"]);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_with_real_totals() {
        let mut departments = MockDepartmentRepository::new();
        departments.expect_count().returning(|| Ok(7));
        departments
            .expect_list()
            .withf(|offset, _| *offset == 20)
            .returning(|_, _| Ok(vec![]));
        let mut users = MockUserRepository::new();
        users.expect_find_by_ids().never();

        let page = service(departments, users)
            .list_departments(Pagination::new(5, 5))
            .await
            .unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.current_page, 5);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.total_results, 7);
    }

    #[tokio::test]
    async fn search_with_no_department_is_soft_empty() {
        let mut departments = MockDepartmentRepository::new();
        departments.expect_search().returning(|_| Ok(vec![]));

        let outcome = service(departments, MockUserRepository::new())
            .search_members(&MemberSearch {
                department_name: Some("Nope".into()),
                ..MemberSearch::default()
            })
            .await
            .unwrap();
        assert_eq!(outcome, SearchOutcome::NoDepartments);
    }

    #[tokio::test]
    async fn search_sorts_within_department_and_flattens_without_dedup() {
        let cara = user("Cara", Role::Employee);
        let abe = user("Abe", Role::Employee);
        let bea = user("Bea", Role::Employee);
        let first = department("Eng", "Austin", &[&cara, &abe]);
        let second = department("Eng", "Atlanta", &[&bea, &abe]);

        let mut departments = MockDepartmentRepository::new();
        departments
            .expect_search()
            .withf(|filter| {
                filter.department_name.as_deref() == Some("Eng") && filter.location_prefix.as_deref() == Some("a")
            })
            .returning(move |_| Ok(vec![first.clone(), second.clone()]));

        let service = service(departments, users_returning(vec![cara, abe, bea]));
        let query = MemberSearch {
            department_name: Some("Eng".into()),
            location_starts_with: Some("a".into()),
            sort_by: None,
        };
        let SearchOutcome::Members(found) = service.search_members(&query).await.unwrap() else {
            panic!("expected members");
        };
        let names: Vec<_> = found.iter().map(|u| u.first_name.as_str()).collect();
        assert_eq!(names, vec!["Abe", "Cara", "Abe", "Bea"]);
    }

    #[tokio::test]
    async fn search_desc_reverses_member_order() {
        let abe = user("Abe", Role::Employee);
        let zed = user("Zed", Role::Employee);
        let eng = department("Eng", "Austin", &[&abe, &zed]);

        let mut departments = MockDepartmentRepository::new();
        departments.expect_search().returning(move |_| Ok(vec![eng.clone()]));

        let query = MemberSearch { sort_by: Some("desc".into()), ..MemberSearch::default() };
        let outcome = service(departments, users_returning(vec![abe, zed]))
            .search_members(&query)
            .await
            .unwrap();
        let SearchOutcome::Members(found) = outcome else {
            panic!("expected members");
        };
        assert_eq!(found[0].first_name, "Zed");
        assert_eq!(found[1].first_name, "Abe");
    }

    #[test]
    fn blank_criteria_become_no_filter() {
        let query = MemberSearch {
            department_name: Some("   ".into()),
            location_starts_with: Some(String::new()),
            sort_by: Some("asc".into()),
        };
        assert_eq!(query.filter(), DepartmentFilter::default());
        assert_eq!(query.order(), SortOrder::Ascending);
    }

    #[tokio::test]
    async fn roster_asks_for_employees_only() {
        let worker = user("Wes", Role::Employee);
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_role()
            .withf(|role| *role == Role::Employee)
            .returning(move |_| Ok(vec![worker.clone()]));

        let roster = service(MockDepartmentRepository::new(), users)
            .list_employees()
            .await
            .unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].role, Role::Employee);
    }
}
