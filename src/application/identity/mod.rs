//! Identity: staff accounts, superusers and login

pub mod service;

pub use service::{AuthResult, IdentityService, NewAdmin, NewUser};
