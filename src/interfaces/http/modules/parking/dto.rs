//! Parking session DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::application::{CheckOutReceipt, ParkingService};
use crate::domain::{format_cost, humanize_duration, ParkingLog};

#[derive(Debug, Serialize, ToSchema)]
pub struct ParkingLogDto {
    pub ticket_id: Uuid,
    pub customer_id: String,
    pub date: NaiveDate,
    pub plate_number: String,
    pub entry_gate: String,
    /// Unix seconds
    pub checkin_time: i64,
    /// `HH:MM:SS` on the lot's clock
    pub checkin_clock: String,
    pub checkout_time: Option<i64>,
    pub exit_gate: Option<String>,
    /// `parked` or `closed`
    pub status: String,
    pub duration_seconds: Option<i64>,
    /// Charged amount in minor currency units
    pub cash: Option<i64>,
    pub formatted_cash: Option<String>,
    pub subscription_id: Option<i32>,
    /// Time spent in the lot so far (or in total, once closed)
    pub elapsed_seconds: i64,
    pub elapsed: String,
}

impl ParkingLogDto {
    pub fn new(log: ParkingLog, parking: &ParkingService, now: i64) -> Self {
        let elapsed = log.elapsed(now);
        Self {
            checkin_clock: parking.format_checkin_time(&log),
            formatted_cash: log
                .cash
                .map(|c| format_cost(c, &parking.settings().currency)),
            elapsed: humanize_duration(elapsed),
            elapsed_seconds: elapsed,
            ticket_id: log.ticket_id,
            customer_id: log.customer_id,
            date: log.date,
            plate_number: log.plate_number,
            entry_gate: log.entry_gate,
            checkin_time: log.checkin_time,
            checkout_time: log.checkout_time,
            exit_gate: log.exit_gate,
            status: log.status.to_string(),
            duration_seconds: log.duration_seconds,
            cash: log.cash,
            subscription_id: log.subscription_id,
        }
    }
}

/// Vehicle arriving at an entry gate
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_local_time"))]
pub struct CheckInRequest {
    #[validate(length(min = 1, max = 20, message = "plate number is required"))]
    pub plate_number: String,
    /// Entry gate name; the lot default when omitted
    pub gate: Option<String>,
    /// `YYYY-MM-DD`, given together with `time`
    pub date: Option<String>,
    /// `HH:MM`, given together with `date`
    pub time: Option<String>,
}

fn validate_local_time(request: &CheckInRequest) -> Result<(), ValidationError> {
    if request.date.is_some() != request.time.is_some() {
        let mut err = ValidationError::new("local_time");
        err.message = Some("date and time must be given together".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CheckOutRequest {
    /// Exit gate name; the lot default when omitted
    #[serde(default)]
    pub gate: Option<String>,
    /// Unix seconds; now when omitted
    #[serde(default)]
    #[validate(range(min = 0))]
    pub checkout_time: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckOutReceiptDto {
    pub log: ParkingLogDto,
    pub duration_minutes: i64,
    pub tariff_id: Option<Uuid>,
    pub cost: i64,
    pub formatted_cost: String,
    pub formatted_duration: String,
    /// `no_matching_tariff` or `ambiguous_tariff`
    pub warning: Option<String>,
    pub warning_message: Option<String>,
}

impl CheckOutReceiptDto {
    pub fn new(receipt: CheckOutReceipt, parking: &ParkingService) -> Self {
        let now = receipt.log.checkout_time.unwrap_or(receipt.log.checkin_time);
        Self {
            duration_minutes: receipt.quote.duration_minutes,
            tariff_id: receipt.quote.tariff_id,
            cost: receipt.quote.cost,
            formatted_cost: receipt.formatted_cost,
            formatted_duration: receipt.formatted_duration,
            warning: receipt.warning.as_ref().map(|w| w.code().to_string()),
            warning_message: receipt.warning.as_ref().map(ToString::to_string),
            log: ParkingLogDto::new(receipt.log, parking, now),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListParkingLogsParams {
    /// `parked` or `closed`
    pub status: Option<String>,
    pub plate_number: Option<String>,
    /// First check-in day, inclusive
    pub from_date: Option<NaiveDate>,
    /// Last check-in day, inclusive
    pub to_date: Option<NaiveDate>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_without_time_is_rejected() {
        let request = CheckInRequest {
            plate_number: "KCA123A".into(),
            gate: None,
            date: Some("2024-03-01".into()),
            time: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn date_and_time_together_pass() {
        let request = CheckInRequest {
            plate_number: "KCA123A".into(),
            gate: Some("NorthGate".into()),
            date: Some("2024-03-01".into()),
            time: Some("08:15".into()),
        };
        assert!(request.validate().is_ok());
    }
}
