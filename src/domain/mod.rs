//! Domain layer
//!
//! One module per aggregate (model + repository trait + DTOs) and the
//! [`RepositoryProvider`] tying the repositories together.

pub mod customer;
pub mod gate;
pub mod parking_log;
pub mod repositories;
pub mod subscription;
pub mod tariff;
pub mod user;

pub use customer::{CreateCustomerDto, Customer, CustomerRepository, UpdateCustomerDto};
pub use gate::{CameraInfo, CreateGateDto, Gate, GateFlow, GateRepository, UpdateGateDto};
pub use parking_log::{
    humanize_duration, ParkingLog, ParkingLogQuery, ParkingLogRepository, ParkingStatus,
    RevenueTotals,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use subscription::{
    CreateSubscriptionDto, Subscription, SubscriptionQuery, SubscriptionRepository,
    UpdateSubscriptionDto,
};
pub use tariff::{
    billable_minutes, format_cost, CreateTariffDto, Tariff, TariffQuote, TariffRepository,
    TariffSchedule, TariffWarning, UpdateTariffDto,
};
pub use user::{
    CreateUserDto, GetUserDto, UpdateUserDto, User, UserChangePasswordDto, UserRepository,
    UserRole,
};

pub use crate::shared::DomainError;
