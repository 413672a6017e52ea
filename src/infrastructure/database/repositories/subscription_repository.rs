//! SeaORM implementation of SubscriptionRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;

use super::db_err;
use crate::domain::{
    DomainError, DomainResult, Subscription, SubscriptionQuery, SubscriptionRepository,
};
use crate::infrastructure::database::entities::subscription;
use crate::shared::{normalize_plate, PaginatedResult};

fn entity_to_domain(m: subscription::Model) -> Subscription {
    Subscription {
        subscription_id: m.subscription_id,
        customer_id: m.customer_id,
        plate_number: m.plate_number,
        start_date: m.start_date,
        end_date: m.end_date,
        subscription_type: m.subscription_type,
        amount: m.amount,
        name: m.name,
        phone_number: m.phone_number,
        office: m.office,
        parking_lot: m.parking_lot,
    }
}

fn domain_to_active(s: Subscription) -> subscription::ActiveModel {
    subscription::ActiveModel {
        subscription_id: if s.subscription_id == 0 {
            NotSet
        } else {
            Set(s.subscription_id)
        },
        customer_id: Set(s.customer_id),
        plate_number: Set(s.plate_number),
        start_date: Set(s.start_date),
        end_date: Set(s.end_date),
        subscription_type: Set(s.subscription_type),
        amount: Set(s.amount),
        name: Set(s.name),
        phone_number: Set(s.phone_number),
        office: Set(s.office),
        parking_lot: Set(s.parking_lot),
    }
}

pub struct SeaOrmSubscriptionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionRepository for SeaOrmSubscriptionRepository {
    async fn create(&self, subscription: Subscription) -> DomainResult<Subscription> {
        let model = domain_to_active(Subscription {
            subscription_id: 0,
            ..subscription
        })
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        info!(
            "Subscription {} created for {} ({} → {})",
            model.subscription_id, model.plate_number, model.start_date, model.end_date
        );
        Ok(entity_to_domain(model))
    }

    async fn find_by_id(
        &self,
        customer_id: &str,
        subscription_id: i32,
    ) -> DomainResult<Option<Subscription>> {
        let model = subscription::Entity::find_by_id(subscription_id)
            .filter(subscription::Column::CustomerId.eq(customer_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn list(&self, query: SubscriptionQuery) -> DomainResult<PaginatedResult<Subscription>> {
        let page = query.pagination;
        let mut select = subscription::Entity::find()
            .filter(subscription::Column::CustomerId.eq(query.customer_id.as_str()));

        if let Some(ref plate) = query.plate_number {
            select = select.filter(subscription::Column::PlateNumber.eq(normalize_plate(plate)));
        }
        if let Some(day) = query.active_on {
            select = select
                .filter(subscription::Column::StartDate.lte(day))
                .filter(subscription::Column::EndDate.gte(day));
        }
        select = select
            .order_by_desc(subscription::Column::EndDate)
            .order_by_asc(subscription::Column::SubscriptionId);

        let total = select.clone().count(&self.db).await.map_err(db_err)?;
        let models = select
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            models.into_iter().map(entity_to_domain).collect(),
            total,
            page.page,
            page.limit,
        ))
    }

    async fn find_active(
        &self,
        customer_id: &str,
        plate_number: &str,
        day: NaiveDate,
    ) -> DomainResult<Option<Subscription>> {
        let model = subscription::Entity::find()
            .filter(subscription::Column::CustomerId.eq(customer_id))
            .filter(subscription::Column::PlateNumber.eq(normalize_plate(plate_number)))
            .filter(subscription::Column::StartDate.lte(day))
            .filter(subscription::Column::EndDate.gte(day))
            .order_by_desc(subscription::Column::EndDate)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn update(&self, subscription: Subscription) -> DomainResult<Subscription> {
        let id = subscription.subscription_id;
        let exists = subscription::Entity::find_by_id(id)
            .filter(subscription::Column::CustomerId.eq(subscription.customer_id.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Subscription", "subscription_id", id));
        }

        let model = domain_to_active(subscription)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(entity_to_domain(model))
    }

    async fn delete(&self, customer_id: &str, subscription_id: i32) -> DomainResult<()> {
        let result = subscription::Entity::delete_many()
            .filter(subscription::Column::CustomerId.eq(customer_id))
            .filter(subscription::Column::SubscriptionId.eq(subscription_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found(
                "Subscription",
                "subscription_id",
                subscription_id,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreateSubscriptionDto;
    use crate::infrastructure::database::repositories::test_support::seed_customer;
    use crate::infrastructure::database::test_database;
    use crate::shared::PaginationParams;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn pass(plate: &str, start: NaiveDate, end: NaiveDate) -> Subscription {
        Subscription::new(CreateSubscriptionDto {
            customer_id: "EPMS-0001".into(),
            plate_number: plate.into(),
            name: "Wanjiru".into(),
            phone_number: "+254700000000".into(),
            office: "Block B".into(),
            parking_lot: "P1".into(),
            subscription_type: "monthly".into(),
            amount: 300_000,
            start_date: start,
            end_date: end,
        })
        .unwrap()
    }

    async fn repo() -> SeaOrmSubscriptionRepository {
        let db = test_database().await;
        seed_customer(&db, "EPMS-0001").await;
        SeaOrmSubscriptionRepository::new(db)
    }

    #[tokio::test]
    async fn find_active_covers_inclusive_range() {
        let repo = repo().await;
        repo.create(pass("kca 123a", day(3, 1), day(3, 31)))
            .await
            .unwrap();

        assert!(repo
            .find_active("EPMS-0001", "KCA123A", day(3, 1))
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .find_active("EPMS-0001", "kca 123a", day(3, 31))
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .find_active("EPMS-0001", "KCA123A", day(4, 1))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn find_active_prefers_latest_end() {
        let repo = repo().await;
        repo.create(pass("KCA123A", day(3, 1), day(3, 31)))
            .await
            .unwrap();
        let longer = repo
            .create(pass("KCA123A", day(3, 15), day(6, 30)))
            .await
            .unwrap();

        let active = repo
            .find_active("EPMS-0001", "KCA123A", day(3, 20))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.subscription_id, longer.subscription_id);
    }

    #[tokio::test]
    async fn list_filters_by_plate_and_day() {
        let repo = repo().await;
        repo.create(pass("KCA123A", day(1, 1), day(1, 31)))
            .await
            .unwrap();
        repo.create(pass("KCA123A", day(3, 1), day(3, 31)))
            .await
            .unwrap();
        repo.create(pass("KDD999Z", day(3, 1), day(3, 31)))
            .await
            .unwrap();

        let by_plate = repo
            .list(SubscriptionQuery {
                customer_id: "EPMS-0001".into(),
                plate_number: Some("kca123a".into()),
                active_on: None,
                pagination: PaginationParams::default(),
            })
            .await
            .unwrap();
        assert_eq!(by_plate.total, 2);
        assert_eq!(by_plate.items[0].end_date, day(3, 31));

        let in_march = repo
            .list(SubscriptionQuery {
                customer_id: "EPMS-0001".into(),
                plate_number: None,
                active_on: Some(day(3, 10)),
                pagination: PaginationParams::default(),
            })
            .await
            .unwrap();
        assert_eq!(in_march.total, 2);
    }

    #[tokio::test]
    async fn delete_then_missing() {
        let repo = repo().await;
        let s = repo
            .create(pass("KCA123A", day(3, 1), day(3, 31)))
            .await
            .unwrap();
        repo.delete("EPMS-0001", s.subscription_id).await.unwrap();
        let err = repo
            .delete("EPMS-0001", s.subscription_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
