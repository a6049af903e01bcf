//! Domain services (business logic)

pub mod auth_service;
pub mod employee_service;
pub mod directory_service;
pub mod query_service;

pub use auth_service::{AuthResult, AuthService};
pub use employee_service::EmployeeService;
pub use directory_service::DirectoryService;
pub use query_service::{MemberSearch, QueryService, SearchOutcome, SortOrder};
