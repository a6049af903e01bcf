//! Application-wide constants

pub const DEPARTMENT_PAGE_SIZE: u32 = 5;
pub const DEFAULT_PORT: u16 = 5000;
pub const MEMORY_DATABASE_URL: &str = "memory://";
pub const SORT_DESCENDING: &str = "desc";
