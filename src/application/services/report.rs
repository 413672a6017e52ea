//! Revenue and occupancy figures

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::domain::{
    format_cost, humanize_duration, DomainError, DomainResult, RepositoryProvider, RevenueTotals,
};

#[derive(Debug, Clone)]
pub struct RevenueReport {
    pub customer_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub totals: RevenueTotals,
    pub average_duration_seconds: i64,
    pub formatted_revenue: String,
    pub formatted_average_duration: String,
}

#[derive(Debug, Clone)]
pub struct Occupancy {
    pub customer_id: String,
    pub parked: u64,
    pub as_of: DateTime<Utc>,
}

pub struct ReportService {
    repos: Arc<dyn RepositoryProvider>,
    currency: String,
}

impl ReportService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, currency: impl Into<String>) -> Self {
        Self {
            repos,
            currency: currency.into(),
        }
    }

    /// Closed sessions with a check-in day in `from..=to`
    pub async fn revenue(
        &self,
        customer_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<RevenueReport> {
        if from > to {
            return Err(DomainError::Validation(format!(
                "report range is empty: {} > {}",
                from, to
            )));
        }
        let totals = self.repos.parking_logs().revenue(customer_id, from, to).await?;
        debug!(customer_id, %from, %to, sessions = totals.sessions, "Revenue report");

        let average = totals.average_duration_seconds();
        Ok(RevenueReport {
            customer_id: customer_id.to_string(),
            from,
            to,
            formatted_revenue: format_cost(totals.revenue, &self.currency),
            formatted_average_duration: humanize_duration(average),
            average_duration_seconds: average,
            totals,
        })
    }

    pub async fn occupancy(&self, customer_id: &str) -> DomainResult<Occupancy> {
        Ok(Occupancy {
            customer_id: customer_id.to_string(),
            parked: self.repos.parking_logs().count_open(customer_id).await?,
            as_of: Utc::now(),
        })
    }
}
