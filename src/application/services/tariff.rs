//! Tariff schedule management and pricing

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    billable_minutes, CreateTariffDto, DomainError, DomainResult, RepositoryProvider, Tariff,
    TariffQuote, TariffSchedule, UpdateTariffDto,
};

pub struct TariffService {
    repos: Arc<dyn RepositoryProvider>,
}

impl TariffService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Add a bucket. Overlaps are accepted and reported in the log.
    pub async fn add_tariff(&self, dto: CreateTariffDto) -> DomainResult<Tariff> {
        let tariff = Tariff::new(dto, Utc::now().date_naive())?;
        let created = self.repos.tariffs().create(tariff).await?;
        self.report_overlaps(&created.customer_id).await?;
        Ok(created)
    }

    pub async fn get(&self, customer_id: &str, tariff_id: Uuid) -> DomainResult<Tariff> {
        self.repos
            .tariffs()
            .find_by_id(customer_id, tariff_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Tariff", "tariff_id", tariff_id))
    }

    pub async fn list(&self, customer_id: &str) -> DomainResult<Vec<Tariff>> {
        self.repos.tariffs().find_all(customer_id).await
    }

    pub async fn update(
        &self,
        customer_id: &str,
        tariff_id: Uuid,
        dto: UpdateTariffDto,
    ) -> DomainResult<Tariff> {
        let mut tariff = self.get(customer_id, tariff_id).await?;
        tariff.apply(dto, Utc::now().date_naive())?;
        let updated = self.repos.tariffs().update(tariff).await?;
        self.report_overlaps(customer_id).await?;
        Ok(updated)
    }

    pub async fn remove_tariff(&self, customer_id: &str, tariff_id: Uuid) -> DomainResult<()> {
        self.repos.tariffs().delete(customer_id, tariff_id).await
    }

    /// Buckets covering a stay of `duration_minutes`
    pub async fn match_tariff(
        &self,
        customer_id: &str,
        duration_minutes: i64,
    ) -> DomainResult<Vec<Tariff>> {
        self.repos
            .tariffs()
            .find_matching(customer_id, duration_minutes)
            .await
    }

    /// Price a stay of `duration_seconds`; started minutes are billed.
    pub async fn quote(&self, customer_id: &str, duration_seconds: i64) -> DomainResult<TariffQuote> {
        let minutes = billable_minutes(duration_seconds);
        let matches = self.match_tariff(customer_id, minutes).await?;
        let quote = TariffQuote::from_matches(minutes, &matches);
        if let Some(ref warning) = quote.warning {
            warn!(customer_id, code = warning.code(), "{}", warning);
        }
        Ok(quote)
    }

    /// Overlapping bucket pairs of a tenant
    pub async fn overlaps(&self, customer_id: &str) -> DomainResult<Vec<(Uuid, Uuid)>> {
        let schedule = TariffSchedule::new(self.list(customer_id).await?);
        Ok(schedule.overlaps())
    }

    async fn report_overlaps(&self, customer_id: &str) -> DomainResult<()> {
        let overlaps = self.overlaps(customer_id).await?;
        if overlaps.is_empty() {
            info!(customer_id, "Tariff schedule updated");
        }
        for (a, b) in overlaps {
            warn!(customer_id, %a, %b, "Tariff buckets overlap");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::repos;
    use crate::domain::TariffWarning;

    fn bucket(from: i64, to: i64, cost: i64) -> CreateTariffDto {
        CreateTariffDto {
            customer_id: "EPMS-0001".into(),
            from_minutes: from,
            to_minutes: to,
            cost,
            initiated_by: None,
        }
    }

    async fn standard_schedule() -> TariffService {
        let svc = TariffService::new(repos().await);
        svc.add_tariff(bucket(0, 30, 0)).await.unwrap();
        svc.add_tariff(bucket(31, 120, 10000)).await.unwrap();
        svc.add_tariff(bucket(121, 1440, 20000)).await.unwrap();
        svc
    }

    #[tokio::test]
    async fn quote_rounds_up_to_started_minute() {
        let svc = standard_schedule().await;
        // 30 min exactly: free bucket
        let q = svc.quote("EPMS-0001", 30 * 60).await.unwrap();
        assert_eq!((q.duration_minutes, q.cost), (30, 0));
        // one more second starts minute 31
        let q = svc.quote("EPMS-0001", 30 * 60 + 1).await.unwrap();
        assert_eq!((q.duration_minutes, q.cost), (31, 10000));
        assert!(q.warning.is_none());
    }

    #[tokio::test]
    async fn uncovered_duration_is_free_with_warning() {
        let svc = standard_schedule().await;
        let q = svc.quote("EPMS-0001", 2000 * 60).await.unwrap();
        assert_eq!(q.cost, 0);
        assert_eq!(
            q.warning,
            Some(TariffWarning::NoMatchingTariff {
                duration_minutes: 2000
            })
        );
    }

    #[tokio::test]
    async fn overlap_is_accepted_and_flagged_at_quote() {
        let svc = standard_schedule().await;
        svc.add_tariff(bucket(100, 200, 15000)).await.unwrap();
        assert_eq!(svc.overlaps("EPMS-0001").await.unwrap().len(), 2);

        let q = svc.quote("EPMS-0001", 110 * 60).await.unwrap();
        assert_eq!(q.cost, 10000);
        assert!(matches!(
            q.warning,
            Some(TariffWarning::AmbiguousTariff { count: 2, .. })
        ));
    }

    #[tokio::test]
    async fn invalid_range_is_rejected() {
        let svc = TariffService::new(repos().await);
        assert!(matches!(
            svc.add_tariff(bucket(60, 30, 100)).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.add_tariff(bucket(0, 30, -1)).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn update_and_remove() {
        let svc = standard_schedule().await;
        let t = svc.match_tariff("EPMS-0001", 60).await.unwrap().remove(0);
        let updated = svc
            .update(
                "EPMS-0001",
                t.tariff_id,
                UpdateTariffDto {
                    cost: Some(12000),
                    updated_by: Some("admin".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.cost, 12000);
        assert!(updated.update_log.is_some());

        svc.remove_tariff("EPMS-0001", t.tariff_id).await.unwrap();
        assert!(svc.match_tariff("EPMS-0001", 60).await.unwrap().is_empty());
    }
}
