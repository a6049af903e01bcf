//! # Workforce Security
//! 
//! Security utilities: bearer-token signing and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{JwtError, JwtService};
pub use password::{PasswordError, PasswordService};
