//! Gate aggregate
//!
//! Entry/exit points of a parking lot with their cashier and camera metadata.

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateGateDto, UpdateGateDto};
pub use model::{CameraInfo, Gate, GateFlow};
pub use repository::GateRepository;
