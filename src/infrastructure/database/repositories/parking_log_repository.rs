//! SeaORM implementation of ParkingLogRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    sea_query::Expr, ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::{conflict_or_db_err, db_err};
use crate::domain::{
    DomainError, DomainResult, ParkingLog, ParkingLogQuery, ParkingLogRepository, ParkingStatus,
    RevenueTotals,
};
use crate::infrastructure::database::entities::parking_log;
use crate::shared::{normalize_plate, PaginatedResult};

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_entity(status: ParkingStatus) -> parking_log::ParkingStatus {
    match status {
        ParkingStatus::Parked => parking_log::ParkingStatus::Parked,
        ParkingStatus::Closed => parking_log::ParkingStatus::Closed,
    }
}

fn entity_to_domain(m: parking_log::Model) -> ParkingLog {
    ParkingLog {
        ticket_id: m.ticket_id,
        customer_id: m.customer_id,
        date: m.date,
        plate_number: m.plate_number,
        entry_gate: m.entry_gate,
        checkin_time: m.checkin_time,
        checkout_time: m.checkout_time,
        exit_gate: m.exit_gate,
        status: match m.status {
            parking_log::ParkingStatus::Parked => ParkingStatus::Parked,
            parking_log::ParkingStatus::Closed => ParkingStatus::Closed,
        },
        duration_seconds: m.duration_seconds,
        cash: m.cash,
        subscription_id: m.subscription_id,
    }
}

fn domain_to_active(l: ParkingLog) -> parking_log::ActiveModel {
    parking_log::ActiveModel {
        ticket_id: Set(l.ticket_id),
        customer_id: Set(l.customer_id),
        date: Set(l.date),
        plate_number: Set(l.plate_number),
        entry_gate: Set(l.entry_gate),
        checkin_time: Set(l.checkin_time),
        checkout_time: Set(l.checkout_time),
        exit_gate: Set(l.exit_gate),
        status: Set(status_to_entity(l.status)),
        duration_seconds: Set(l.duration_seconds),
        cash: Set(l.cash),
        subscription_id: Set(l.subscription_id),
    }
}

// ── SeaOrmParkingLogRepository ──────────────────────────────────

pub struct SeaOrmParkingLogRepository {
    db: DatabaseConnection,
}

impl SeaOrmParkingLogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn open_query(customer_id: &str) -> Select<parking_log::Entity> {
        parking_log::Entity::find()
            .filter(parking_log::Column::CustomerId.eq(customer_id))
            .filter(parking_log::Column::Status.eq(parking_log::ParkingStatus::Parked))
    }

    fn closed_in_period(customer_id: &str, from: NaiveDate, to: NaiveDate) -> Select<parking_log::Entity> {
        parking_log::Entity::find()
            .filter(parking_log::Column::CustomerId.eq(customer_id))
            .filter(parking_log::Column::Status.eq(parking_log::ParkingStatus::Closed))
            .filter(parking_log::Column::Date.gte(from))
            .filter(parking_log::Column::Date.lte(to))
    }
}

#[async_trait]
impl ParkingLogRepository for SeaOrmParkingLogRepository {
    async fn create(&self, log: ParkingLog) -> DomainResult<ParkingLog> {
        let plate = log.plate_number.clone();
        let model = domain_to_active(log)
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_db_err(e, || format!("{} is already parked", plate)))?;
        info!(
            "Check-in: ticket {} plate {} at {}",
            model.ticket_id, model.plate_number, model.entry_gate
        );
        Ok(entity_to_domain(model))
    }

    async fn find_by_id(
        &self,
        customer_id: &str,
        ticket_id: Uuid,
    ) -> DomainResult<Option<ParkingLog>> {
        let model = parking_log::Entity::find_by_id(ticket_id)
            .filter(parking_log::Column::CustomerId.eq(customer_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_open_by_plate(
        &self,
        customer_id: &str,
        plate_number: &str,
    ) -> DomainResult<Option<ParkingLog>> {
        let model = Self::open_query(customer_id)
            .filter(parking_log::Column::PlateNumber.eq(normalize_plate(plate_number)))
            .order_by_desc(parking_log::Column::CheckinTime)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn list(&self, query: ParkingLogQuery) -> DomainResult<PaginatedResult<ParkingLog>> {
        let page = query.pagination;
        let mut select = parking_log::Entity::find()
            .filter(parking_log::Column::CustomerId.eq(query.customer_id.as_str()));

        if let Some(status) = query.status {
            select = select.filter(parking_log::Column::Status.eq(status_to_entity(status)));
        }
        if let Some(ref plate) = query.plate_number {
            select = select.filter(parking_log::Column::PlateNumber.eq(normalize_plate(plate)));
        }
        if let Some(from) = query.from_date {
            select = select.filter(parking_log::Column::Date.gte(from));
        }
        if let Some(to) = query.to_date {
            select = select.filter(parking_log::Column::Date.lte(to));
        }
        select = select.order_by_desc(parking_log::Column::CheckinTime);

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

    async fn open_sessions(&self, customer_id: &str) -> DomainResult<Vec<ParkingLog>> {
        let models = Self::open_query(customer_id)
            .order_by_asc(parking_log::Column::CheckinTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn count_open(&self, customer_id: &str) -> DomainResult<u64> {
        Self::open_query(customer_id)
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn close(&self, log: ParkingLog) -> DomainResult<ParkingLog> {
        let ticket_id = log.ticket_id;
        let customer_id = log.customer_id.clone();
        let result = parking_log::Entity::update_many()
            .col_expr(parking_log::Column::CheckoutTime, Expr::value(log.checkout_time))
            .col_expr(parking_log::Column::ExitGate, Expr::value(log.exit_gate))
            .col_expr(
                parking_log::Column::Status,
                Expr::value(parking_log::ParkingStatus::Closed.to_value()),
            )
            .col_expr(
                parking_log::Column::DurationSeconds,
                Expr::value(log.duration_seconds),
            )
            .col_expr(parking_log::Column::Cash, Expr::value(log.cash))
            .col_expr(
                parking_log::Column::SubscriptionId,
                Expr::value(log.subscription_id),
            )
            .filter(parking_log::Column::TicketId.eq(ticket_id))
            .filter(parking_log::Column::CustomerId.eq(customer_id.as_str()))
            .filter(parking_log::Column::Status.eq(parking_log::ParkingStatus::Parked))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        let stored = self.find_by_id(&customer_id, ticket_id).await?;
        match (result.rows_affected, stored) {
            (_, None) => Err(DomainError::not_found("ParkingLog", "ticket_id", ticket_id)),
            (0, Some(_)) => Err(DomainError::Conflict(format!(
                "ticket {} is already closed",
                ticket_id
            ))),
            (_, Some(closed)) => Ok(closed),
        }
    }

    async fn delete(&self, customer_id: &str, ticket_id: Uuid) -> DomainResult<()> {
        let result = parking_log::Entity::delete_many()
            .filter(parking_log::Column::CustomerId.eq(customer_id))
            .filter(parking_log::Column::TicketId.eq(ticket_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("ParkingLog", "ticket_id", ticket_id));
        }
        info!("Parking log deleted: {}", ticket_id);
        Ok(())
    }

    async fn revenue(
        &self,
        customer_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<RevenueTotals> {
        let row = Self::closed_in_period(customer_id, from, to)
            .select_only()
            .column_as(Expr::col(parking_log::Column::Cash).sum(), "revenue")
            .column_as(
                Expr::col(parking_log::Column::DurationSeconds).sum(),
                "duration",
            )
            .column_as(Expr::col(parking_log::Column::TicketId).count(), "sessions")
            .into_tuple::<(Option<i64>, Option<i64>, i64)>()
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let (revenue, duration, sessions) = row.unwrap_or((None, None, 0));

        let subscription_sessions = Self::closed_in_period(customer_id, from, to)
            .filter(parking_log::Column::SubscriptionId.is_not_null())
            .count(&self.db)
            .await
            .map_err(db_err)?;

        debug!(
            "Revenue {} {}..{}: {:?} over {} sessions",
            customer_id, from, to, revenue, sessions
        );

        Ok(RevenueTotals {
            revenue: revenue.unwrap_or(0),
            sessions: sessions.max(0) as u64,
            subscription_sessions,
            total_duration_seconds: duration.unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;
    use crate::infrastructure::database::repositories::test_support::seed_customer;
    use crate::infrastructure::database::test_database;
    use crate::shared::PaginationParams;

    fn at(day: u32, hour: u32, minute: u32) -> chrono::DateTime<FixedOffset> {
        FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, day, hour, minute, 0)
            .unwrap()
    }

    async fn repo() -> SeaOrmParkingLogRepository {
        let db = test_database().await;
        seed_customer(&db, "EPMS-0001").await;
        seed_customer(&db, "EPMS-0002").await;
        SeaOrmParkingLogRepository::new(db)
    }

    async fn closed(
        repo: &SeaOrmParkingLogRepository,
        plate: &str,
        day: u32,
        minutes: i64,
        cash: i64,
        subscription_id: Option<i32>,
    ) -> ParkingLog {
        let mut log = ParkingLog::open("EPMS-0001", plate, "SouthGate", at(day, 8, 0)).unwrap();
        log = repo.create(log).await.unwrap();
        let checkout = log.checkin_time + minutes * 60;
        log.close(checkout, "NorthGate", cash, subscription_id).unwrap();
        repo.close(log).await.unwrap()
    }

    #[tokio::test]
    async fn open_session_lookup_by_plate() {
        let repo = repo().await;
        let log = ParkingLog::open("EPMS-0001", "kca 123a", "SouthGate", at(1, 9, 0)).unwrap();
        repo.create(log.clone()).await.unwrap();

        let open = repo
            .find_open_by_plate("EPMS-0001", "KCA123A")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(open.ticket_id, log.ticket_id);
        assert!(repo
            .find_open_by_plate("EPMS-0002", "KCA123A")
            .await
            .unwrap()
            .is_none());
        assert_eq!(repo.count_open("EPMS-0001").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn closing_removes_from_open_sessions() {
        let repo = repo().await;
        let log = closed(&repo, "KCA123A", 1, 90, 10000, None).await;
        assert_eq!(log.status, ParkingStatus::Closed);
        assert_eq!(log.duration_seconds, Some(5400));
        assert!(repo.open_sessions("EPMS-0001").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn revenue_sums_closed_sessions_in_range() {
        let repo = repo().await;
        closed(&repo, "KCA123A", 1, 60, 5000, None).await;
        closed(&repo, "KDD999Z", 2, 120, 10000, None).await;
        closed(&repo, "KBB111B", 2, 30, 0, Some(7)).await;
        closed(&repo, "KCC222C", 20, 60, 5000, None).await;
        // still parked, not counted
        repo.create(ParkingLog::open("EPMS-0001", "KEE333E", "SouthGate", at(2, 10, 0)).unwrap())
            .await
            .unwrap();

        let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        let totals = repo.revenue("EPMS-0001", day(1), day(2)).await.unwrap();
        assert_eq!(totals.revenue, 15000);
        assert_eq!(totals.sessions, 3);
        assert_eq!(totals.subscription_sessions, 1);
        assert_eq!(totals.total_duration_seconds, 210 * 60);
        assert_eq!(totals.average_duration_seconds(), 70 * 60);
    }

    #[tokio::test]
    async fn revenue_of_empty_period_is_zero() {
        let repo = repo().await;
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let totals = repo.revenue("EPMS-0001", day, day).await.unwrap();
        assert_eq!(totals, RevenueTotals::default());
    }

    #[tokio::test]
    async fn list_filters_status_and_plate() {
        let repo = repo().await;
        closed(&repo, "KCA123A", 1, 60, 5000, None).await;
        repo.create(ParkingLog::open("EPMS-0001", "KCA123A", "SouthGate", at(3, 10, 0)).unwrap())
            .await
            .unwrap();
        repo.create(ParkingLog::open("EPMS-0001", "KDD999Z", "SouthGate", at(3, 11, 0)).unwrap())
            .await
            .unwrap();

        let parked = repo
            .list(ParkingLogQuery {
                customer_id: "EPMS-0001".into(),
                status: Some(ParkingStatus::Parked),
                pagination: PaginationParams::default(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(parked.total, 2);
        // newest first
        assert_eq!(parked.items[0].plate_number, "KDD999Z");

        let plate = repo
            .list(ParkingLogQuery {
                customer_id: "EPMS-0001".into(),
                plate_number: Some("kca123a".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(plate.total, 2);
    }

    #[tokio::test]
    async fn delete_is_scoped_to_tenant() {
        let repo = repo().await;
        let log = repo
            .create(ParkingLog::open("EPMS-0001", "KCA123A", "SouthGate", at(1, 9, 0)).unwrap())
            .await
            .unwrap();
        assert!(repo.delete("EPMS-0002", log.ticket_id).await.is_err());
        repo.delete("EPMS-0001", log.ticket_id).await.unwrap();
        assert!(repo
            .find_by_id("EPMS-0001", log.ticket_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn stale_close_does_not_overwrite() {
        let repo = repo().await;
        let log = repo
            .create(ParkingLog::open("EPMS-0001", "KCA123A", "SouthGate", at(1, 9, 0)).unwrap())
            .await
            .unwrap();

        // two cashiers read the same open ticket
        let mut first = log.clone();
        let mut second = log.clone();
        first
            .close(log.checkin_time + 60, "NorthGate", 0, None)
            .unwrap();
        second
            .close(log.checkin_time + 300 * 60, "EastGate", 20000, None)
            .unwrap();

        let closed = repo.close(first).await.unwrap();
        assert_eq!(closed.status, ParkingStatus::Closed);
        assert_eq!(closed.cash, Some(0));

        let err = repo.close(second).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)), "{:?}", err);

        let stored = repo.find_by_id("EPMS-0001", log.ticket_id).await.unwrap().unwrap();
        assert_eq!(stored.cash, Some(0));
        assert_eq!(stored.duration_seconds, Some(60));
        assert_eq!(stored.exit_gate.as_deref(), Some("NorthGate"));
    }

    #[tokio::test]
    async fn closing_unknown_ticket_is_not_found() {
        let repo = repo().await;
        let mut log = ParkingLog::open("EPMS-0001", "KCA123A", "SouthGate", at(1, 9, 0)).unwrap();
        log.close(log.checkin_time + 60, "NorthGate", 0, None).unwrap();
        assert!(matches!(
            repo.close(log).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn second_open_session_for_plate_conflicts() {
        let repo = repo().await;
        repo.create(ParkingLog::open("EPMS-0001", "KCA123A", "SouthGate", at(1, 9, 0)).unwrap())
            .await
            .unwrap();

        let err = repo
            .create(ParkingLog::open("EPMS-0001", "kca 123a", "SouthGate", at(1, 9, 5)).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)), "{:?}", err);

        // other tenants and closed sessions are unaffected
        repo.create(ParkingLog::open("EPMS-0002", "KCA123A", "SouthGate", at(1, 9, 5)).unwrap())
            .await
            .unwrap();
        closed(&repo, "KDD999Z", 1, 30, 0, None).await;
        repo.create(ParkingLog::open("EPMS-0001", "KDD999Z", "SouthGate", at(2, 9, 0)).unwrap())
            .await
            .unwrap();
    }
}
