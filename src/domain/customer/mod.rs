//! Customer (tenant) aggregate
//!
//! A customer owns gates, staff users, tariffs, subscriptions and parking logs.

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateCustomerDto, UpdateCustomerDto};
pub use model::Customer;
pub use repository::CustomerRepository;
