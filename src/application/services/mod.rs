//! Application services
//!
//! One service per use-case area; each holds the shared repository provider.

mod customer;
mod gate;
mod parking;
mod report;
mod subscription;
mod tariff;

pub use customer::CustomerService;
pub use gate::GateService;
pub use parking::{CheckIn, CheckOut, CheckOutReceipt, ParkingService, ParkingSettings};
pub use report::{Occupancy, RevenueReport, ReportService};
pub use subscription::SubscriptionService;
pub use tariff::TariffService;
