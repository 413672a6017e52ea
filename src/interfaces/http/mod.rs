//! HTTP REST API interfaces
//!
//! - `middleware`: JWT authentication and tenant scoping
//! - `modules`: DTOs and handlers per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;

pub use router::create_api_router;
pub use state::AppState;
