//! # Workforce Core - Domain Module
//! 
//! Domain entities for the workforce directory.

pub mod user;
pub mod department;

pub use user::{Credentials, NewUser, Role, User, UserInfo};
pub use department::{Department, DepartmentFilter, DepartmentInput, DepartmentView, MemberIds, SalaryInput};
