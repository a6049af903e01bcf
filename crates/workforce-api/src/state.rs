use std::sync::Arc;

use workforce_core::repositories::{DepartmentRepository, UserRepository};
use workforce_core::services::{AuthService, DirectoryService, EmployeeService, QueryService};
use workforce_security::JwtService;

pub type Users = dyn UserRepository;
pub type Departments = dyn DepartmentRepository;

/// Services shared by every handler. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<Users>>,
    pub employees: Arc<EmployeeService<Users>>,
    pub directory: Arc<DirectoryService<Departments, Users>>,
    pub queries: Arc<QueryService<Departments, Users>>,
}

impl AppState {
    pub fn new(users: Arc<Users>, departments: Arc<Departments>, jwt: JwtService) -> Self {
        Self {
            auth: Arc::new(AuthService::new(users.clone(), jwt)),
            employees: Arc::new(EmployeeService::new(users.clone())),
            directory: Arc::new(DirectoryService::new(departments.clone(), users.clone())),
            queries: Arc::new(QueryService::new(departments, users)),
        }
    }
}
