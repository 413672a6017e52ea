use chrono::NaiveDate;

use super::ParkingStatus;
use crate::shared::PaginationParams;

#[derive(Debug, Clone, Default)]
pub struct ParkingLogQuery {
    pub customer_id: String,
    pub status: Option<ParkingStatus>,
    pub plate_number: Option<String>,
    /// Check-in date range, both ends inclusive
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub pagination: PaginationParams,
}
