//! Tenant (customer) administration, superusers only

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
