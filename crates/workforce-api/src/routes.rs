use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, employee, health, manager};
use crate::middleware::require_auth;
use crate::state::AppState;

/// Full application router. CORS is layered on by the binary, which owns the
/// allowed origin.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/employee/me", get(employee::me))
        .route(
            "/api/manager/departments",
            post(manager::create_department).get(manager::list_departments),
        )
        .route(
            "/api/manager/departments/{id}",
            put(manager::update_department).delete(manager::delete_department),
        )
        .route("/api/manager/departmentsFind", get(manager::search_departments))
        .route("/api/manager/employeeList", get(manager::employee_list))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
