//! Repository traits (ports)

pub mod user_repository;
pub mod department_repository;

pub use user_repository::UserRepository;
pub use department_repository::DepartmentRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use department_repository::MockDepartmentRepository;
