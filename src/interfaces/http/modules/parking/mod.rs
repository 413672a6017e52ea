//! Check-in, check-out and the parking log

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
