use chrono::NaiveDate;

use crate::shared::PaginationParams;

#[derive(Debug, Clone)]
pub struct CreateSubscriptionDto {
    pub customer_id: String,
    pub plate_number: String,
    pub name: String,
    pub phone_number: String,
    pub office: String,
    pub parking_lot: String,
    pub subscription_type: String,
    pub amount: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSubscriptionDto {
    pub plate_number: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub office: Option<String>,
    pub parking_lot: Option<String>,
    pub subscription_type: Option<String>,
    pub amount: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct SubscriptionQuery {
    pub customer_id: String,
    pub plate_number: Option<String>,
    /// Only passes valid on this day
    pub active_on: Option<NaiveDate>,
    pub pagination: PaginationParams,
}
