// ============================================================================
// Workforce API - Manager Handlers
// File: crates/workforce-api/src/handlers/manager.rs
// ============================================================================
//! Department management, member search and the employee roster.
//! Any authenticated caller may use these routes; roles are not checked.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use workforce_core::domain::{Department, DepartmentInput, DepartmentView, UserInfo};
use workforce_core::services::{MemberSearch, SearchOutcome};
use workforce_shared::constants::DEPARTMENT_PAGE_SIZE;
use workforce_shared::{parse_entity_id, Page, Pagination};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

fn department_id(raw: &str) -> Result<Uuid, ApiError> {
    parse_entity_id(raw).ok_or_else(|| ApiError::bad_request("Invalid department id"))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ApiError::validation(e.body_text()))
}

/// POST /api/manager/departments
pub async fn create_department(
    State(state): State<AppState>,
    payload: Result<Json<DepartmentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Department>), ApiError> {
    let input = json_body(payload)?;
    let created = state
        .directory
        .create_department(input)
        .await
        .map_err(ApiError::during("creating department"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/manager/departments?page=N
pub async fn list_departments(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<DepartmentView>>, ApiError> {
    // An unreadable query string is treated like a missing page.
    let page = query.map(|Query(q)| q.page).unwrap_or_default();
    let pagination = Pagination::from_query(page.as_deref(), DEPARTMENT_PAGE_SIZE);

    let page = state
        .queries
        .list_departments(pagination)
        .await
        .map_err(ApiError::during("fetching departments"))?;
    Ok(Json(page))
}

/// PUT /api/manager/departments/{id}
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<DepartmentInput>, JsonRejection>,
) -> Result<Json<Department>, ApiError> {
    let id = department_id(&id)?;
    let patch = json_body(payload)?;
    let updated = state
        .directory
        .update_department(&id, patch)
        .await
        .map_err(ApiError::during("updating department"))?;
    Ok(Json(updated))
}

/// DELETE /api/manager/departments/{id}
pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = department_id(&id)?;
    state
        .directory
        .delete_department(&id)
        .await
        .map_err(ApiError::during("deleting department"))?;
    Ok(Json(json!({ "message": "Department deleted successfully" })))
}

/// GET /api/manager/departmentsFind
pub async fn search_departments(
    State(state): State<AppState>,
    query: Result<Query<MemberSearch>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(search) = query.map_err(|e| ApiError::validation(e.body_text()))?;

    let outcome = state
        .queries
        .search_members(&search)
        .await
        .map_err(ApiError::during("fetching employees"))?;

    let response = match outcome {
        SearchOutcome::Members(employees) => Json(json!({ "employees": employees })).into_response(),
        SearchOutcome::NoDepartments => (
            StatusCode::PARTIAL_CONTENT,
            Json(json!({
                "message": "No departments found matching the criteria",
                "employees": Vec::<UserInfo>::new(),
            })),
        )
            .into_response(),
    };
    Ok(response)
}

/// GET /api/manager/employeeList
pub async fn employee_list(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let results = state
        .queries
        .list_employees()
        .await
        .map_err(ApiError::during("fetching employees"))?;
    Ok(Json(json!({ "results": results })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_department_id_is_bad_request() {
        assert!(matches!(department_id("not-a-uuid"), Err(ApiError::BadRequest { .. })));
        assert!(department_id(&Uuid::new_v4().to_string()).is_ok());
    }
}
