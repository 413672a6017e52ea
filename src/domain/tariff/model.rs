//! Tariff domain entity

use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use super::{CreateTariffDto, UpdateTariffDto};
use crate::shared::DomainError;

/// Longest update-log note kept on a tariff row
const UPDATE_LOG_MAX: usize = 50;

/// Duration bucket: a stay of `from_minutes..=to_minutes` costs `cost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tariff {
    pub tariff_id: Uuid,
    pub customer_id: String,
    pub from_minutes: i64,
    pub to_minutes: i64,
    /// Flat cost in minor currency units
    pub cost: i64,
    pub initiated_by: Option<String>,
    pub date: NaiveDate,
    pub last_update: Option<NaiveDate>,
    pub update_log: Option<String>,
}

impl Tariff {
    pub fn new(dto: CreateTariffDto, today: NaiveDate) -> Result<Self, DomainError> {
        validate_bucket(dto.from_minutes, dto.to_minutes, dto.cost)?;
        Ok(Self {
            tariff_id: Uuid::new_v4(),
            customer_id: dto.customer_id,
            from_minutes: dto.from_minutes,
            to_minutes: dto.to_minutes,
            cost: dto.cost,
            initiated_by: dto.initiated_by,
            date: today,
            last_update: None,
            update_log: None,
        })
    }

    /// Apply a change, stamping `last_update` and a short note of what moved.
    pub fn apply(&mut self, dto: UpdateTariffDto, today: NaiveDate) -> Result<(), DomainError> {
        let from = dto.from_minutes.unwrap_or(self.from_minutes);
        let to = dto.to_minutes.unwrap_or(self.to_minutes);
        let cost = dto.cost.unwrap_or(self.cost);
        validate_bucket(from, to, cost)?;

        let mut changes = Vec::new();
        if from != self.from_minutes || to != self.to_minutes {
            changes.push(format!(
                "range {}-{}>{}-{}",
                self.from_minutes, self.to_minutes, from, to
            ));
        }
        if cost != self.cost {
            changes.push(format!("cost {}>{}", self.cost, cost));
        }
        if let Some(by) = dto.updated_by {
            changes.push(format!("by {}", by));
        }

        self.from_minutes = from;
        self.to_minutes = to;
        self.cost = cost;
        self.last_update = Some(today);
        if !changes.is_empty() {
            let mut note = changes.join("; ");
            if note.chars().count() > UPDATE_LOG_MAX {
                note = note.chars().take(UPDATE_LOG_MAX).collect();
            }
            self.update_log = Some(note);
        }
        Ok(())
    }

    pub fn covers(&self, minutes: i64) -> bool {
        self.from_minutes <= minutes && minutes <= self.to_minutes
    }

    /// Both ranges are inclusive, so touching endpoints overlap.
    pub fn overlaps(&self, other: &Tariff) -> bool {
        self.from_minutes <= other.to_minutes && other.from_minutes <= self.to_minutes
    }
}

fn validate_bucket(from: i64, to: i64, cost: i64) -> Result<(), DomainError> {
    if from < 0 || to < 0 {
        return Err(DomainError::Validation(
            "tariff bounds must be non-negative".into(),
        ));
    }
    if from > to {
        return Err(DomainError::Validation(format!(
            "tariff range is empty: from {} > to {}",
            from, to
        )));
    }
    if cost < 0 {
        return Err(DomainError::Validation("tariff cost must be non-negative".into()));
    }
    Ok(())
}

/// Data-quality problem found while pricing a stay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TariffWarning {
    /// No bucket covers the duration; the stay is charged 0
    NoMatchingTariff { duration_minutes: i64 },
    /// Several buckets cover the duration; the first one was applied
    AmbiguousTariff { duration_minutes: i64, count: usize },
}

impl TariffWarning {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoMatchingTariff { .. } => "no_matching_tariff",
            Self::AmbiguousTariff { .. } => "ambiguous_tariff",
        }
    }
}

impl fmt::Display for TariffWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatchingTariff { duration_minutes } => write!(
                f,
                "no tariff covers a stay of {} min, charged 0",
                duration_minutes
            ),
            Self::AmbiguousTariff {
                duration_minutes,
                count,
            } => write!(
                f,
                "{} tariffs cover a stay of {} min, applied the first",
                count, duration_minutes
            ),
        }
    }
}

/// Price of a stay of a given length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TariffQuote {
    pub duration_minutes: i64,
    pub tariff_id: Option<Uuid>,
    pub cost: i64,
    pub warning: Option<TariffWarning>,
}

impl TariffQuote {
    /// Build a quote from the buckets covering the duration, lowest `from_minutes` first.
    pub fn from_matches(duration_minutes: i64, matches: &[Tariff]) -> Self {
        match matches {
            [] => Self {
                duration_minutes,
                tariff_id: None,
                cost: 0,
                warning: Some(TariffWarning::NoMatchingTariff { duration_minutes }),
            },
            [only] => Self {
                duration_minutes,
                tariff_id: Some(only.tariff_id),
                cost: only.cost,
                warning: None,
            },
            [first, ..] => Self {
                duration_minutes,
                tariff_id: Some(first.tariff_id),
                cost: first.cost,
                warning: Some(TariffWarning::AmbiguousTariff {
                    duration_minutes,
                    count: matches.len(),
                }),
            },
        }
    }

    /// Stay covered by a subscription
    pub fn free(duration_minutes: i64) -> Self {
        Self {
            duration_minutes,
            tariff_id: None,
            cost: 0,
            warning: None,
        }
    }
}

/// A tenant's buckets held in memory, ordered by `from_minutes`.
#[derive(Debug, Clone, Default)]
pub struct TariffSchedule {
    tariffs: Vec<Tariff>,
}

impl TariffSchedule {
    pub fn new(mut tariffs: Vec<Tariff>) -> Self {
        tariffs.sort_by_key(|t| (t.from_minutes, t.to_minutes));
        Self { tariffs }
    }

    pub fn tariffs(&self) -> &[Tariff] {
        &self.tariffs
    }

    pub fn matching(&self, minutes: i64) -> Vec<Tariff> {
        self.tariffs
            .iter()
            .filter(|t| t.covers(minutes))
            .cloned()
            .collect()
    }

    pub fn quote(&self, minutes: i64) -> TariffQuote {
        TariffQuote::from_matches(minutes, &self.matching(minutes))
    }

    /// Pairs of buckets whose ranges intersect
    pub fn overlaps(&self) -> Vec<(Uuid, Uuid)> {
        let mut pairs = Vec::new();
        for (i, a) in self.tariffs.iter().enumerate() {
            for b in &self.tariffs[i + 1..] {
                if b.from_minutes > a.to_minutes {
                    break;
                }
                if a.overlaps(b) {
                    pairs.push((a.tariff_id, b.tariff_id));
                }
            }
        }
        pairs
    }
}

/// Whole minutes charged for a stay; a started minute counts.
pub fn billable_minutes(duration_seconds: i64) -> i64 {
    if duration_seconds <= 0 {
        return 0;
    }
    duration_seconds.div_euclid(60) + i64::from(duration_seconds.rem_euclid(60) != 0)
}

/// Format an amount in minor units, e.g. `1250` → `"12.50 USD"`
pub fn format_cost(amount: i64, currency: &str) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{}{}.{:02} {}", sign, abs / 100, abs % 100, currency)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn bucket(from: i64, to: i64, cost: i64) -> Tariff {
        Tariff::new(
            CreateTariffDto {
                customer_id: "EPMS-0001".into(),
                from_minutes: from,
                to_minutes: to,
                cost,
                initiated_by: None,
            },
            today(),
        )
        .unwrap()
    }

    fn schedule() -> TariffSchedule {
        TariffSchedule::new(vec![bucket(61, 180, 500), bucket(0, 60, 200), bucket(181, 1440, 1500)])
    }

    #[test]
    fn new_rejects_inverted_range() {
        let err = Tariff::new(
            CreateTariffDto {
                customer_id: "EPMS-0001".into(),
                from_minutes: 90,
                to_minutes: 30,
                cost: 100,
                initiated_by: None,
            },
            today(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn new_rejects_negative_cost() {
        let err = Tariff::new(
            CreateTariffDto {
                customer_id: "EPMS-0001".into(),
                from_minutes: 0,
                to_minutes: 30,
                cost: -1,
                initiated_by: None,
            },
            today(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let t = bucket(0, 60, 200);
        assert!(t.covers(0));
        assert!(t.covers(60));
        assert!(!t.covers(61));
    }

    #[test]
    fn quote_single_match() {
        let q = schedule().quote(90);
        assert_eq!(q.cost, 500);
        assert!(q.tariff_id.is_some());
        assert_eq!(q.warning, None);
    }

    #[test]
    fn quote_without_match_is_free_with_warning() {
        let q = schedule().quote(2000);
        assert_eq!(q.cost, 0);
        assert_eq!(q.tariff_id, None);
        assert_eq!(
            q.warning,
            Some(TariffWarning::NoMatchingTariff { duration_minutes: 2000 })
        );
    }

    #[test]
    fn quote_with_overlap_applies_lowest_bucket_and_warns() {
        let s = TariffSchedule::new(vec![bucket(60, 120, 400), bucket(0, 60, 200)]);
        let q = s.quote(60);
        assert_eq!(q.cost, 200);
        assert_eq!(
            q.warning,
            Some(TariffWarning::AmbiguousTariff { duration_minutes: 60, count: 2 })
        );
        assert_eq!(q.warning.unwrap().code(), "ambiguous_tariff");
    }

    #[test]
    fn overlaps_reports_touching_buckets() {
        let a = bucket(0, 60, 200);
        let b = bucket(60, 120, 400);
        let c = bucket(121, 200, 600);
        let s = TariffSchedule::new(vec![c, b.clone(), a.clone()]);
        assert_eq!(s.overlaps(), vec![(a.tariff_id, b.tariff_id)]);
        assert!(schedule().overlaps().is_empty());
    }

    #[test]
    fn apply_records_update_log() {
        let mut t = bucket(0, 60, 200);
        let later = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        t.apply(
            UpdateTariffDto {
                cost: Some(250),
                updated_by: Some("ops".into()),
                ..Default::default()
            },
            later,
        )
        .unwrap();
        assert_eq!(t.cost, 250);
        assert_eq!(t.last_update, Some(later));
        assert_eq!(t.update_log.as_deref(), Some("cost 200>250; by ops"));
    }

    #[test]
    fn apply_truncates_long_log() {
        let mut t = bucket(0, 60, 200);
        t.apply(
            UpdateTariffDto {
                from_minutes: Some(1),
                to_minutes: Some(59),
                cost: Some(9999),
                updated_by: Some("a-very-long-operator-name@example.com".into()),
            },
            today(),
        )
        .unwrap();
        assert_eq!(t.update_log.unwrap().chars().count(), 50);
    }

    #[test]
    fn apply_rejects_invalid_range_and_keeps_state() {
        let mut t = bucket(0, 60, 200);
        assert!(t
            .apply(
                UpdateTariffDto {
                    from_minutes: Some(100),
                    ..Default::default()
                },
                today()
            )
            .is_err());
        assert_eq!(t.from_minutes, 0);
        assert_eq!(t.last_update, None);
    }

    #[test]
    fn billable_minutes_rounds_up() {
        assert_eq!(billable_minutes(-5), 0);
        assert_eq!(billable_minutes(0), 0);
        assert_eq!(billable_minutes(1), 1);
        assert_eq!(billable_minutes(60), 1);
        assert_eq!(billable_minutes(61), 2);
        assert_eq!(billable_minutes(i64::MAX), i64::MAX / 60 + 1);
    }

    #[test]
    fn format_cost_helper() {
        assert_eq!(format_cost(12345, "USD"), "123.45 USD");
        assert_eq!(format_cost(0, "USD"), "0.00 USD");
        assert_eq!(format_cost(-250, "KES"), "-2.50 KES");
    }
}
