//! Tariff aggregate
//!
//! Duration buckets mapped to flat costs, and the lookup that turns an
//! elapsed parking time into a charge.

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateTariffDto, UpdateTariffDto};
pub use model::{
    billable_minutes, format_cost, Tariff, TariffQuote, TariffSchedule, TariffWarning,
};
pub use repository::TariffRepository;
