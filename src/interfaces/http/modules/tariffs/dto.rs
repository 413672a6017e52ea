//! Tariff DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{format_cost, Tariff, TariffQuote};

/// Duration bucket, inclusive minutes on both ends
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TariffDto {
    pub tariff_id: Uuid,
    pub customer_id: String,
    pub from_minutes: i64,
    pub to_minutes: i64,
    /// Minor currency units
    pub cost: i64,
    pub initiated_by: Option<String>,
    pub date: NaiveDate,
    pub last_update: Option<NaiveDate>,
    pub update_log: Option<String>,
}

impl From<Tariff> for TariffDto {
    fn from(t: Tariff) -> Self {
        Self {
            tariff_id: t.tariff_id,
            customer_id: t.customer_id,
            from_minutes: t.from_minutes,
            to_minutes: t.to_minutes,
            cost: t.cost,
            initiated_by: t.initiated_by,
            date: t.date,
            last_update: t.last_update,
            update_log: t.update_log,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTariffRequest {
    #[validate(range(min = 0, message = "from_minutes must be non-negative"))]
    pub from_minutes: i64,
    #[validate(range(min = 0, message = "to_minutes must be non-negative"))]
    pub to_minutes: i64,
    #[validate(range(min = 0, message = "cost must be non-negative"))]
    pub cost: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTariffRequest {
    #[validate(range(min = 0))]
    pub from_minutes: Option<i64>,
    #[validate(range(min = 0))]
    pub to_minutes: Option<i64>,
    #[validate(range(min = 0))]
    pub cost: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct QuoteParams {
    /// Length of the stay in seconds
    #[validate(range(min = 0, max = 31_622_400, message = "must be between 0 and one year"))]
    pub duration_seconds: i64,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct MatchParams {
    /// Length of the stay in whole minutes
    #[validate(range(min = 0, max = 527_040, message = "must be between 0 and one year"))]
    pub minutes: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TariffQuoteDto {
    pub duration_minutes: i64,
    pub tariff_id: Option<Uuid>,
    pub cost: i64,
    pub formatted_cost: String,
    /// `no_matching_tariff` or `ambiguous_tariff`
    pub warning: Option<String>,
    pub warning_message: Option<String>,
}

impl TariffQuoteDto {
    pub fn new(quote: TariffQuote, currency: &str) -> Self {
        Self {
            duration_minutes: quote.duration_minutes,
            tariff_id: quote.tariff_id,
            cost: quote.cost,
            formatted_cost: format_cost(quote.cost, currency),
            warning: quote.warning.as_ref().map(|w| w.code().to_string()),
            warning_message: quote.warning.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TariffOverlapDto {
    pub first: Uuid,
    pub second: Uuid,
}
