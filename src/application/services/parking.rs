//! Parking sessions: check-in, check-out and pricing
//!
//! A session opens at an entry gate and closes at an exit gate. On close the
//! stay is either covered by an active subscription (free) or priced from the
//! tenant's tariff buckets.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::parking_log::parse_local_datetime;
use crate::domain::{
    billable_minutes, format_cost, humanize_duration, DomainError, DomainResult, Gate,
    ParkingLog, ParkingLogQuery, RepositoryProvider, TariffQuote, TariffWarning,
};
use crate::shared::PaginatedResult;

/// Lot-wide display and default settings
#[derive(Debug, Clone)]
pub struct ParkingSettings {
    pub currency: String,
    /// Offset of the lot's wall clock from UTC
    pub utc_offset: FixedOffset,
    pub default_entry_gate: String,
    pub default_exit_gate: String,
}

impl Default for ParkingSettings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            utc_offset: Utc.fix(),
            default_entry_gate: "SouthGate".to_string(),
            default_exit_gate: "SouthGate".to_string(),
        }
    }
}

/// Where and when a vehicle enters
#[derive(Debug, Clone)]
pub struct CheckIn {
    pub customer_id: String,
    pub plate_number: String,
    pub gate: Option<String>,
    /// Wall-clock date and time typed at the gate (`YYYY-MM-DD`, `HH:MM`);
    /// the current time when absent
    pub local_time: Option<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct CheckOut {
    pub customer_id: String,
    pub ticket_id: Uuid,
    pub gate: Option<String>,
    /// Unix seconds; now when absent
    pub at: Option<i64>,
}

/// Closed session with its pricing
#[derive(Debug, Clone)]
pub struct CheckOutReceipt {
    pub log: ParkingLog,
    pub quote: TariffQuote,
    pub warning: Option<TariffWarning>,
    pub formatted_cost: String,
    pub formatted_duration: String,
}

pub struct ParkingService {
    repos: Arc<dyn RepositoryProvider>,
    settings: ParkingSettings,
}

impl ParkingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, settings: ParkingSettings) -> Self {
        Self { repos, settings }
    }

    pub fn settings(&self) -> &ParkingSettings {
        &self.settings
    }

    /// Open a session. A plate can only be parked once per tenant.
    pub async fn check_in(&self, request: CheckIn) -> DomainResult<ParkingLog> {
        let at = match request.local_time {
            Some((ref date, ref time)) => parse_local_datetime(date, time, &self.settings.utc_offset)?,
            None => self.now(),
        };
        let gate_name = request
            .gate
            .clone()
            .unwrap_or_else(|| self.settings.default_entry_gate.clone());
        let gate = self.resolve_gate(&request.customer_id, &gate_name).await?;
        if let Some(ref gate) = gate {
            if !gate.flow.allows_entry() {
                return Err(DomainError::Validation(format!(
                    "gate {} does not allow entry",
                    gate.name
                )));
            }
        }
        let entry_gate = gate.map(|g| g.name).unwrap_or(gate_name);

        let log = ParkingLog::open(&request.customer_id, &request.plate_number, entry_gate, at)?;
        if let Some(open) = self
            .repos
            .parking_logs()
            .find_open_by_plate(&log.customer_id, &log.plate_number)
            .await?
        {
            return Err(DomainError::Conflict(format!(
                "{} is already parked (ticket {})",
                open.plate_number, open.ticket_id
            )));
        }

        self.repos.parking_logs().create(log).await
    }

    /// Close a session, pricing the stay.
    pub async fn check_out(&self, request: CheckOut) -> DomainResult<CheckOutReceipt> {
        let mut log = self.get(&request.customer_id, request.ticket_id).await?;
        let checkout_time = request.at.unwrap_or_else(|| Utc::now().timestamp());
        let stay = log.stay_seconds(checkout_time)?;

        let gate_name = request
            .gate
            .clone()
            .unwrap_or_else(|| self.settings.default_exit_gate.clone());
        let gate = self.resolve_gate(&request.customer_id, &gate_name).await?;
        if let Some(ref gate) = gate {
            if !gate.flow.allows_exit() {
                return Err(DomainError::Validation(format!(
                    "gate {} does not allow exit",
                    gate.name
                )));
            }
        }
        let exit_gate = gate.map(|g| g.name).unwrap_or(gate_name);

        let checkout_day = self.local(checkout_time).date_naive();
        let subscription = self
            .repos
            .subscriptions()
            .find_active(&log.customer_id, &log.plate_number, checkout_day)
            .await?;

        let minutes = billable_minutes(stay);
        let quote = if subscription.is_some() {
            TariffQuote::free(minutes)
        } else {
            let matches = self
                .repos
                .tariffs()
                .find_matching(&log.customer_id, minutes)
                .await?;
            TariffQuote::from_matches(minutes, &matches)
        };
        if let Some(ref warning) = quote.warning {
            warn!(
                customer_id = %log.customer_id,
                ticket = %log.ticket_id,
                code = warning.code(),
                "{}",
                warning
            );
        }

        log.close(
            checkout_time,
            exit_gate,
            quote.cost,
            subscription.map(|s| s.subscription_id),
        )?;
        let log = self.repos.parking_logs().close(log).await?;

        info!(
            ticket = %log.ticket_id,
            plate = %log.plate_number,
            duration = stay,
            cash = quote.cost,
            "Check-out"
        );
        Ok(CheckOutReceipt {
            formatted_cost: format_cost(quote.cost, &self.settings.currency),
            formatted_duration: humanize_duration(stay),
            warning: quote.warning.clone(),
            quote,
            log,
        })
    }

    pub async fn get(&self, customer_id: &str, ticket_id: Uuid) -> DomainResult<ParkingLog> {
        self.repos
            .parking_logs()
            .find_by_id(customer_id, ticket_id)
            .await?
            .ok_or_else(|| DomainError::not_found("ParkingLog", "ticket_id", ticket_id))
    }

    pub async fn delete(&self, customer_id: &str, ticket_id: Uuid) -> DomainResult<()> {
        self.repos.parking_logs().delete(customer_id, ticket_id).await
    }

    pub async fn list(&self, query: ParkingLogQuery) -> DomainResult<PaginatedResult<ParkingLog>> {
        self.repos.parking_logs().list(query).await
    }

    /// Vehicles currently inside, longest stay first
    pub async fn open_sessions(&self, customer_id: &str) -> DomainResult<Vec<ParkingLog>> {
        self.repos.parking_logs().open_sessions(customer_id).await
    }

    /// Check-in time of a session on the lot's wall clock
    pub fn format_checkin_time(&self, log: &ParkingLog) -> String {
        log.format_checkin_time(&self.settings.utc_offset)
    }

    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.settings.utc_offset)
    }

    fn local(&self, timestamp: i64) -> DateTime<FixedOffset> {
        DateTime::from_timestamp(timestamp, 0)
            .unwrap_or_default()
            .with_timezone(&self.settings.utc_offset)
    }

    /// Registered gate by name. Tenants without any gates accept free-form names.
    async fn resolve_gate(&self, customer_id: &str, name: &str) -> DomainResult<Option<Gate>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("gate name is required".into()));
        }
        if let Some(gate) = self.repos.gates().find_by_name(customer_id, name).await? {
            return Ok(Some(gate));
        }
        if self.repos.gates().find_all(customer_id).await?.is_empty() {
            return Ok(None);
        }
        Err(DomainError::not_found("Gate", "name", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::repos;
    use crate::domain::{
        CameraInfo, CreateGateDto, CreateSubscriptionDto, CreateTariffDto, GateFlow,
        ParkingStatus, Tariff,
    };

    const EAT: i32 = 3 * 3600;

    fn settings() -> ParkingSettings {
        ParkingSettings {
            currency: "KES".into(),
            utc_offset: FixedOffset::east_opt(EAT).unwrap(),
            ..Default::default()
        }
    }

    async fn service() -> ParkingService {
        let repos = repos().await;
        for (from, to, cost) in [(0, 30, 0), (31, 120, 10000), (121, 1440, 20000)] {
            let tariff = Tariff::new(
                CreateTariffDto {
                    customer_id: "EPMS-0001".into(),
                    from_minutes: from,
                    to_minutes: to,
                    cost,
                    initiated_by: None,
                },
                chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            )
            .unwrap();
            repos.tariffs().create(tariff).await.unwrap();
        }
        ParkingService::new(repos, settings())
    }

    fn arrive(plate: &str, date: &str, time: &str) -> CheckIn {
        CheckIn {
            customer_id: "EPMS-0001".into(),
            plate_number: plate.into(),
            gate: None,
            local_time: Some((date.into(), time.into())),
        }
    }

    fn leave(ticket_id: Uuid, at: i64) -> CheckOut {
        CheckOut {
            customer_id: "EPMS-0001".into(),
            ticket_id,
            gate: None,
            at: Some(at),
        }
    }

    #[tokio::test]
    async fn check_in_uses_local_wall_clock() {
        let svc = service().await;
        let log = svc
            .check_in(arrive("kca 123a", "2024-03-01", "08:15"))
            .await
            .unwrap();
        assert_eq!(log.plate_number, "KCA123A");
        assert_eq!(log.entry_gate, "SouthGate");
        assert_eq!(svc.format_checkin_time(&log), "08:15:00");
        assert_eq!(log.date.to_string(), "2024-03-01");
    }

    #[tokio::test]
    async fn second_check_in_of_parked_plate_conflicts() {
        let svc = service().await;
        svc.check_in(arrive("KCA123A", "2024-03-01", "08:15"))
            .await
            .unwrap();
        let err = svc
            .check_in(arrive("kca123a", "2024-03-01", "09:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn check_out_prices_from_tariff() {
        let svc = service().await;
        let log = svc
            .check_in(arrive("KCA123A", "2024-03-01", "08:00"))
            .await
            .unwrap();
        let receipt = svc
            .check_out(leave(log.ticket_id, log.checkin_time + 45 * 60 + 10))
            .await
            .unwrap();

        assert_eq!(receipt.log.status, ParkingStatus::Closed);
        assert_eq!(receipt.log.cash, Some(10000));
        assert_eq!(receipt.quote.duration_minutes, 46);
        assert_eq!(receipt.formatted_cost, "100.00 KES");
        assert_eq!(receipt.formatted_duration, "45m");
        assert!(receipt.warning.is_none());
        assert!(svc.open_sessions("EPMS-0001").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn subscription_makes_stay_free() {
        let svc = service().await;
        let sub = svc
            .repos
            .subscriptions()
            .create(
                crate::domain::Subscription::new(CreateSubscriptionDto {
                    customer_id: "EPMS-0001".into(),
                    plate_number: "KCA123A".into(),
                    name: "Wanjiru".into(),
                    phone_number: "+254700000000".into(),
                    office: "Block B".into(),
                    parking_lot: "P1".into(),
                    subscription_type: "monthly".into(),
                    amount: 300_000,
                    start_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                    end_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
                })
                .unwrap(),
            )
            .await
            .unwrap();

        let log = svc
            .check_in(arrive("KCA123A", "2024-03-10", "08:00"))
            .await
            .unwrap();
        let receipt = svc
            .check_out(leave(log.ticket_id, log.checkin_time + 5 * 3600))
            .await
            .unwrap();
        assert_eq!(receipt.log.cash, Some(0));
        assert_eq!(receipt.log.subscription_id, Some(sub.subscription_id));
        assert!(receipt.warning.is_none());
    }

    #[tokio::test]
    async fn uncovered_stay_closes_with_warning() {
        let svc = service().await;
        let log = svc
            .check_in(arrive("KCA123A", "2024-03-01", "08:00"))
            .await
            .unwrap();
        let receipt = svc
            .check_out(leave(log.ticket_id, log.checkin_time + 2 * 86_400))
            .await
            .unwrap();
        assert_eq!(receipt.log.cash, Some(0));
        assert!(matches!(
            receipt.warning,
            Some(TariffWarning::NoMatchingTariff { .. })
        ));
        assert_eq!(receipt.formatted_duration, "2d 0h 0m");
    }

    #[tokio::test]
    async fn closing_twice_conflicts_and_early_checkout_is_invalid() {
        let svc = service().await;
        let log = svc
            .check_in(arrive("KCA123A", "2024-03-01", "08:00"))
            .await
            .unwrap();
        assert!(matches!(
            svc.check_out(leave(log.ticket_id, log.checkin_time - 1)).await,
            Err(DomainError::Validation(_))
        ));
        svc.check_out(leave(log.ticket_id, log.checkin_time + 60))
            .await
            .unwrap();
        assert!(matches!(
            svc.check_out(leave(log.ticket_id, log.checkin_time + 120)).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn registered_gates_enforce_direction() {
        let svc = service().await;
        for (name, flow) in [("SouthGate", GateFlow::Entry), ("NorthGate", GateFlow::Exit)] {
            svc.repos
                .gates()
                .create(CreateGateDto {
                    customer_id: "EPMS-0001".into(),
                    name: name.into(),
                    flow,
                    description: None,
                    cashier_name: None,
                    camera: CameraInfo::default(),
                })
                .await
                .unwrap();
        }

        let mut wrong_way = arrive("KCA123A", "2024-03-01", "08:00");
        wrong_way.gate = Some("NorthGate".into());
        assert!(matches!(
            svc.check_in(wrong_way).await,
            Err(DomainError::Validation(_))
        ));

        let mut unknown = arrive("KCA123A", "2024-03-01", "08:00");
        unknown.gate = Some("EastGate".into());
        assert!(matches!(
            svc.check_in(unknown).await,
            Err(DomainError::NotFound { .. })
        ));

        let log = svc
            .check_in(arrive("KCA123A", "2024-03-01", "08:00"))
            .await
            .unwrap();
        // default exit gate is SouthGate, entry only
        assert!(matches!(
            svc.check_out(leave(log.ticket_id, log.checkin_time + 60)).await,
            Err(DomainError::Validation(_))
        ));
        let mut out = leave(log.ticket_id, log.checkin_time + 60);
        out.gate = Some("NorthGate".into());
        let receipt = svc.check_out(out).await.unwrap();
        assert_eq!(receipt.log.exit_gate.as_deref(), Some("NorthGate"));
    }

    #[tokio::test]
    async fn bad_local_time_is_invalid() {
        let svc = service().await;
        assert!(matches!(
            svc.check_in(arrive("KCA123A", "2024-03-01", "25:99")).await,
            Err(DomainError::Validation(_))
        ));
    }
}
