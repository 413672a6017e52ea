//! Subscription DTOs

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Subscription, UpdateSubscriptionDto};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionDto {
    pub subscription_id: i32,
    pub customer_id: String,
    pub plate_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub subscription_type: String,
    /// Minor currency units
    pub amount: i64,
    pub name: String,
    pub phone_number: String,
    pub office: String,
    pub parking_lot: String,
    /// Days of validity left, today included
    pub days_remaining: i64,
}

impl From<Subscription> for SubscriptionDto {
    fn from(s: Subscription) -> Self {
        Self {
            days_remaining: s.days_remaining(Utc::now().date_naive()),
            subscription_id: s.subscription_id,
            customer_id: s.customer_id,
            plate_number: s.plate_number,
            start_date: s.start_date,
            end_date: s.end_date,
            subscription_type: s.subscription_type,
            amount: s.amount,
            name: s.name,
            phone_number: s.phone_number,
            office: s.office,
            parking_lot: s.parking_lot,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubscriptionRequest {
    #[validate(length(min = 1, max = 20, message = "plate number is required"))]
    pub plate_number: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub name: String,
    #[validate(length(max = 30))]
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub office: String,
    #[serde(default)]
    pub parking_lot: String,
    #[validate(length(min = 1, max = 50, message = "subscription type is required"))]
    pub subscription_type: String,
    #[validate(range(min = 0, message = "amount must be non-negative"))]
    pub amount: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSubscriptionRequest {
    #[validate(length(min = 1, max = 20))]
    pub plate_number: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub office: Option<String>,
    pub parking_lot: Option<String>,
    pub subscription_type: Option<String>,
    #[validate(range(min = 0))]
    pub amount: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<UpdateSubscriptionRequest> for UpdateSubscriptionDto {
    fn from(r: UpdateSubscriptionRequest) -> Self {
        Self {
            plate_number: r.plate_number,
            name: r.name,
            phone_number: r.phone_number,
            office: r.office,
            parking_lot: r.parking_lot,
            subscription_type: r.subscription_type,
            amount: r.amount,
            start_date: r.start_date,
            end_date: r.end_date,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListSubscriptionsParams {
    pub plate_number: Option<String>,
    /// Only passes valid on this day (`YYYY-MM-DD`)
    pub active_on: Option<NaiveDate>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ActiveSubscriptionParams {
    pub plate_number: String,
    /// Day to check (`YYYY-MM-DD`); today on the lot's clock when omitted
    pub date: Option<NaiveDate>,
}
