//! Report DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::{Occupancy, RevenueReport};

#[derive(Debug, Deserialize, IntoParams)]
pub struct RevenueParams {
    /// First check-in day, inclusive
    pub from: NaiveDate,
    /// Last check-in day, inclusive
    pub to: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueReportDto {
    pub customer_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Minor currency units
    pub revenue: i64,
    pub formatted_revenue: String,
    pub sessions: u64,
    /// Sessions covered by a subscription
    pub subscription_sessions: u64,
    pub total_duration_seconds: i64,
    pub average_duration_seconds: i64,
    pub formatted_average_duration: String,
}

impl From<RevenueReport> for RevenueReportDto {
    fn from(r: RevenueReport) -> Self {
        Self {
            customer_id: r.customer_id,
            from: r.from,
            to: r.to,
            revenue: r.totals.revenue,
            formatted_revenue: r.formatted_revenue,
            sessions: r.totals.sessions,
            subscription_sessions: r.totals.subscription_sessions,
            total_duration_seconds: r.totals.total_duration_seconds,
            average_duration_seconds: r.average_duration_seconds,
            formatted_average_duration: r.formatted_average_duration,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OccupancyDto {
    pub customer_id: String,
    /// Vehicles currently inside
    pub parked: u64,
    pub as_of: DateTime<Utc>,
}

impl From<Occupancy> for OccupancyDto {
    fn from(o: Occupancy) -> Self {
        Self {
            customer_id: o.customer_id,
            parked: o.parked,
            as_of: o.as_of,
        }
    }
}
