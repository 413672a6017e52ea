//! Subscription aggregate
//!
//! Season passes bound to a plate number; covered stays are not charged.

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateSubscriptionDto, SubscriptionQuery, UpdateSubscriptionDto};
pub use model::Subscription;
pub use repository::SubscriptionRepository;
