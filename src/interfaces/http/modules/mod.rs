pub mod auth;
pub mod customers;
pub mod gates;
pub mod health;
pub mod parking;
pub mod reports;
pub mod subscriptions;
pub mod tariffs;
pub mod users;
