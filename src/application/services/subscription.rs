//! Season passes

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{
    CreateSubscriptionDto, DomainError, DomainResult, RepositoryProvider, Subscription,
    SubscriptionQuery, UpdateSubscriptionDto,
};
use crate::shared::PaginatedResult;

pub struct SubscriptionService {
    repos: Arc<dyn RepositoryProvider>,
}

impl SubscriptionService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn add_subscription(&self, dto: CreateSubscriptionDto) -> DomainResult<Subscription> {
        let subscription = Subscription::new(dto)?;
        let created = self.repos.subscriptions().create(subscription).await?;
        info!(
            customer_id = %created.customer_id,
            plate = %created.plate_number,
            until = %created.end_date,
            "Subscription added"
        );
        Ok(created)
    }

    pub async fn get(&self, customer_id: &str, subscription_id: i32) -> DomainResult<Subscription> {
        self.repos
            .subscriptions()
            .find_by_id(customer_id, subscription_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Subscription", "subscription_id", subscription_id))
    }

    pub async fn list(&self, query: SubscriptionQuery) -> DomainResult<PaginatedResult<Subscription>> {
        self.repos.subscriptions().list(query).await
    }

    pub async fn update(
        &self,
        customer_id: &str,
        subscription_id: i32,
        dto: UpdateSubscriptionDto,
    ) -> DomainResult<Subscription> {
        let mut subscription = self.get(customer_id, subscription_id).await?;
        subscription.apply(dto)?;
        self.repos.subscriptions().update(subscription).await
    }

    pub async fn delete(&self, customer_id: &str, subscription_id: i32) -> DomainResult<()> {
        self.repos
            .subscriptions()
            .delete(customer_id, subscription_id)
            .await
    }

    /// Pass covering `day` for the plate, if any
    pub async fn find_active(
        &self,
        customer_id: &str,
        plate_number: &str,
        day: NaiveDate,
    ) -> DomainResult<Option<Subscription>> {
        self.repos
            .subscriptions()
            .find_active(customer_id, plate_number, day)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::repos;
    use crate::shared::PaginationParams;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn monthly(plate: &str) -> CreateSubscriptionDto {
        CreateSubscriptionDto {
            customer_id: "EPMS-0001".into(),
            plate_number: plate.into(),
            name: "Wanjiru".into(),
            phone_number: "+254700000000".into(),
            office: "Block B".into(),
            parking_lot: "P1".into(),
            subscription_type: "monthly".into(),
            amount: 300_000,
            start_date: day(3, 1),
            end_date: day(3, 31),
        }
    }

    #[tokio::test]
    async fn add_and_find_active() {
        let svc = SubscriptionService::new(repos().await);
        svc.add_subscription(monthly("kca 123a")).await.unwrap();
        let active = svc
            .find_active("EPMS-0001", "KCA123A", day(3, 15))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.plate_number, "KCA123A");
        assert!(svc
            .find_active("EPMS-0001", "KCA123A", day(4, 1))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn reversed_dates_are_invalid() {
        let svc = SubscriptionService::new(repos().await);
        let mut dto = monthly("KCA123A");
        dto.end_date = day(2, 1);
        assert!(matches!(
            svc.add_subscription(dto).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn extend_pass() {
        let svc = SubscriptionService::new(repos().await);
        let s = svc.add_subscription(monthly("KCA123A")).await.unwrap();
        svc.update(
            "EPMS-0001",
            s.subscription_id,
            UpdateSubscriptionDto {
                end_date: Some(day(4, 30)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let listed = svc
            .list(SubscriptionQuery {
                customer_id: "EPMS-0001".into(),
                plate_number: None,
                active_on: Some(day(4, 15)),
                pagination: PaginationParams::default(),
            })
            .await
            .unwrap();
        assert_eq!(listed.total, 1);

        svc.delete("EPMS-0001", s.subscription_id).await.unwrap();
        assert!(matches!(
            svc.get("EPMS-0001", s.subscription_id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
