//! Database entities module

pub mod customer;
pub mod gate;
pub mod parking_log;
pub mod subscription;
pub mod tariff;
pub mod user;

pub use customer::Entity as Customer;
pub use gate::Entity as Gate;
pub use parking_log::Entity as ParkingLog;
pub use subscription::Entity as Subscription;
pub use tariff::Entity as Tariff;
pub use user::Entity as User;
