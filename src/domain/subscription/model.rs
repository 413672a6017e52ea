//! Subscription domain entity

use chrono::NaiveDate;

use super::{CreateSubscriptionDto, UpdateSubscriptionDto};
use crate::shared::{normalize_plate, DomainError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub subscription_id: i32,
    pub customer_id: String,
    pub plate_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub subscription_type: String,
    /// Price paid for the pass, minor currency units
    pub amount: i64,
    pub name: String,
    pub phone_number: String,
    pub office: String,
    pub parking_lot: String,
}

impl Subscription {
    /// Validated, not yet persisted (`subscription_id` is 0)
    pub fn new(dto: CreateSubscriptionDto) -> Result<Self, DomainError> {
        let sub = Self {
            subscription_id: 0,
            customer_id: dto.customer_id,
            plate_number: normalize_plate(&dto.plate_number),
            start_date: dto.start_date,
            end_date: dto.end_date,
            subscription_type: dto.subscription_type,
            amount: dto.amount,
            name: dto.name,
            phone_number: dto.phone_number,
            office: dto.office,
            parking_lot: dto.parking_lot,
        };
        sub.validate()?;
        Ok(sub)
    }

    pub fn apply(&mut self, dto: UpdateSubscriptionDto) -> Result<(), DomainError> {
        let mut next = self.clone();
        if let Some(v) = dto.plate_number {
            next.plate_number = normalize_plate(&v);
        }
        if let Some(v) = dto.name {
            next.name = v;
        }
        if let Some(v) = dto.phone_number {
            next.phone_number = v;
        }
        if let Some(v) = dto.office {
            next.office = v;
        }
        if let Some(v) = dto.parking_lot {
            next.parking_lot = v;
        }
        if let Some(v) = dto.subscription_type {
            next.subscription_type = v;
        }
        if let Some(v) = dto.amount {
            next.amount = v;
        }
        if let Some(v) = dto.start_date {
            next.start_date = v;
        }
        if let Some(v) = dto.end_date {
            next.end_date = v;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.plate_number.is_empty() {
            return Err(DomainError::Validation("plate number is required".into()));
        }
        if self.end_date < self.start_date {
            return Err(DomainError::Validation(format!(
                "subscription ends ({}) before it starts ({})",
                self.end_date, self.start_date
            )));
        }
        if self.amount < 0 {
            return Err(DomainError::Validation(
                "subscription amount must be non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Valid on `day`, both ends inclusive
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// Days left including `day`; 0 once expired
    pub fn days_remaining(&self, day: NaiveDate) -> i64 {
        if day > self.end_date {
            return 0;
        }
        let from = day.max(self.start_date);
        (self.end_date - from).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn dto() -> CreateSubscriptionDto {
        CreateSubscriptionDto {
            customer_id: "EPMS-0001".into(),
            plate_number: "kcb 123a".into(),
            name: "J. Otieno".into(),
            phone_number: "0700000000".into(),
            office: "4th floor".into(),
            parking_lot: "Basement".into(),
            subscription_type: "monthly".into(),
            amount: 500_000,
            start_date: d(2024, 1, 1),
            end_date: d(2024, 1, 31),
        }
    }

    #[test]
    fn new_normalizes_plate() {
        let s = Subscription::new(dto()).unwrap();
        assert_eq!(s.plate_number, "KCB123A");
    }

    #[test]
    fn new_rejects_reversed_dates() {
        let mut bad = dto();
        bad.end_date = d(2023, 12, 31);
        assert!(matches!(
            Subscription::new(bad),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn active_window_is_inclusive() {
        let s = Subscription::new(dto()).unwrap();
        assert!(s.is_active_on(d(2024, 1, 1)));
        assert!(s.is_active_on(d(2024, 1, 31)));
        assert!(!s.is_active_on(d(2024, 2, 1)));
        assert!(!s.is_active_on(d(2023, 12, 31)));
    }

    #[test]
    fn days_remaining_counts_today() {
        let s = Subscription::new(dto()).unwrap();
        assert_eq!(s.days_remaining(d(2024, 1, 31)), 1);
        assert_eq!(s.days_remaining(d(2023, 12, 1)), 31);
        assert_eq!(s.days_remaining(d(2024, 2, 1)), 0);
    }

    #[test]
    fn apply_validates_before_mutating() {
        let mut s = Subscription::new(dto()).unwrap();
        let err = s.apply(UpdateSubscriptionDto {
            start_date: Some(d(2024, 3, 1)),
            ..Default::default()
        });
        assert!(err.is_err());
        assert_eq!(s.start_date, d(2024, 1, 1));

        s.apply(UpdateSubscriptionDto {
            end_date: Some(d(2024, 12, 31)),
            plate_number: Some("kcb 999z".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(s.end_date, d(2024, 12, 31));
        assert_eq!(s.plate_number, "KCB999Z");
    }
}
