//! Parking log aggregate
//!
//! One row per vehicle visit, from check-in at an entry gate to check-out
//! at an exit gate with the amount charged.

pub mod model;
pub mod repository;

mod dto;

pub use dto::ParkingLogQuery;
pub use model::{humanize_duration, parse_local_datetime, ParkingLog, ParkingStatus, RevenueTotals};
pub use repository::ParkingLogRepository;
