//! # Workforce API
//!
//! HTTP handlers, the bearer-token gate, error mapping and router assembly.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
