//! SeaORM implementation of TariffRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use super::db_err;
use crate::domain::{DomainError, DomainResult, Tariff, TariffRepository};
use crate::infrastructure::database::entities::tariff;

// ── Conversion helpers ──────────────────────────────────────────

fn entity_to_domain(t: tariff::Model) -> Tariff {
    Tariff {
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

fn domain_to_active(t: Tariff) -> tariff::ActiveModel {
    tariff::ActiveModel {
        tariff_id: Set(t.tariff_id),
        customer_id: Set(t.customer_id),
        from_minutes: Set(t.from_minutes),
        to_minutes: Set(t.to_minutes),
        cost: Set(t.cost),
        initiated_by: Set(t.initiated_by),
        date: Set(t.date),
        last_update: Set(t.last_update),
        update_log: Set(t.update_log),
    }
}

// ── SeaOrmTariffRepository ──────────────────────────────────────

pub struct SeaOrmTariffRepository {
    db: DatabaseConnection,
}

impl SeaOrmTariffRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TariffRepository for SeaOrmTariffRepository {
    async fn create(&self, tariff: Tariff) -> DomainResult<Tariff> {
        let model = domain_to_active(tariff)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        info!(
            "Tariff created: {} [{}-{} min] = {}",
            model.tariff_id, model.from_minutes, model.to_minutes, model.cost
        );
        Ok(entity_to_domain(model))
    }

    async fn find_by_id(&self, customer_id: &str, tariff_id: Uuid) -> DomainResult<Option<Tariff>> {
        let model = tariff::Entity::find_by_id(tariff_id)
            .filter(tariff::Column::CustomerId.eq(customer_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self, customer_id: &str) -> DomainResult<Vec<Tariff>> {
        let models = tariff::Entity::find()
            .filter(tariff::Column::CustomerId.eq(customer_id))
            .order_by_asc(tariff::Column::FromMinutes)
            .order_by_asc(tariff::Column::ToMinutes)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn find_matching(&self, customer_id: &str, minutes: i64) -> DomainResult<Vec<Tariff>> {
        let models = tariff::Entity::find()
            .filter(tariff::Column::CustomerId.eq(customer_id))
            .filter(tariff::Column::FromMinutes.lte(minutes))
            .filter(tariff::Column::ToMinutes.gte(minutes))
            .order_by_asc(tariff::Column::FromMinutes)
            .order_by_asc(tariff::Column::ToMinutes)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn update(&self, tariff: Tariff) -> DomainResult<Tariff> {
        let tariff_id = tariff.tariff_id;
        let existing = tariff::Entity::find_by_id(tariff_id)
            .filter(tariff::Column::CustomerId.eq(tariff.customer_id.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Tariff", "tariff_id", tariff_id));
        }

        let model = domain_to_active(tariff)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(entity_to_domain(model))
    }

    async fn delete(&self, customer_id: &str, tariff_id: Uuid) -> DomainResult<()> {
        let result = tariff::Entity::delete_many()
            .filter(tariff::Column::CustomerId.eq(customer_id))
            .filter(tariff::Column::TariffId.eq(tariff_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Tariff", "tariff_id", tariff_id));
        }
        info!("Tariff removed: {}", tariff_id);
        Ok(())
    }
}
