// ============================================================================
// Workforce Infrastructure - PostgreSQL Department Repository
// File: crates/workforce-infrastructure/src/database/postgres/department_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use workforce_core::domain::{Department, DepartmentFilter};
use workforce_core::error::DomainError;
use workforce_core::repositories::DepartmentRepository;

use super::{db_error, to_i64};

const DEPARTMENT_COLUMNS: &str = r#"
    id, department_name, category_name, location, salary,
    employee_ids, created_at, modified_at
"#;

pub struct PgDepartmentRepository {
    pool: PgPool,
}

impl PgDepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DepartmentRow {
    pub id: Uuid,
    pub department_name: String,
    pub category_name: String,
    pub location: String,
    pub salary: f64,
    pub employee_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Department {
            id: row.id,
            department_name: row.department_name,
            category_name: row.category_name,
            location: row.location,
            salary: row.salary,
            employee_ids: row.employee_ids,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

/// Turns a literal prefix into an ILIKE pattern; `%`, `_` and `\` match themselves.
fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl DepartmentRepository for PgDepartmentRepository {
    async fn count(&self) -> Result<u64, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM departments")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("counting departments", e))?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Department>, DomainError> {
        let rows: Vec<DepartmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM departments ORDER BY created_at, id LIMIT $1 OFFSET $2",
            DEPARTMENT_COLUMNS
        ))
        .bind(to_i64(limit))
        .bind(to_i64(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing departments", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Department>, DomainError> {
        let row: Option<DepartmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM departments WHERE id = $1",
            DEPARTMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding department by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn search(&self, filter: &DepartmentFilter) -> Result<Vec<Department>, DomainError> {
        let rows: Vec<DepartmentRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM departments
            WHERE ($1::TEXT IS NULL OR department_name = $1)
              AND ($2::TEXT IS NULL OR location ILIKE $2 ESCAPE '\')
            ORDER BY created_at, id
            "#,
            DEPARTMENT_COLUMNS
        ))
        .bind(&filter.department_name)
        .bind(filter.location_prefix.as_deref().map(prefix_pattern))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("searching departments", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, department: &Department) -> Result<Department, DomainError> {
        let row: DepartmentRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO departments (
                id, department_name, category_name, location, salary,
                employee_ids, created_at, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            DEPARTMENT_COLUMNS
        ))
        .bind(department.id)
        .bind(&department.department_name)
        .bind(&department.category_name)
        .bind(&department.location)
        .bind(department.salary)
        .bind(&department.employee_ids)
        .bind(department.created_at)
        .bind(department.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating department", e))?;

        info!("Department row inserted: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, department: &Department) -> Result<Option<Department>, DomainError> {
        let row: Option<DepartmentRow> = sqlx::query_as(&format!(
            r#"
            UPDATE departments
            SET
                department_name = $2,
                category_name = $3,
                location = $4,
                salary = $5,
                employee_ids = $6,
                modified_at = $7
            WHERE id = $1
            RETURNING {}
            "#,
            DEPARTMENT_COLUMNS
        ))
        .bind(department.id)
        .bind(&department.department_name)
        .bind(&department.category_name)
        .bind(&department.location)
        .bind(department.salary)
        .bind(&department.employee_ids)
        .bind(department.modified_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating department", e))?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting department", e))?;

        Ok(result.rows_affected() > 0)
    }
}
