//! Parking session domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use uuid::Uuid;

use crate::shared::{normalize_plate, DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParkingStatus {
    /// Vehicle is inside the lot
    #[default]
    Parked,
    /// Vehicle left and the stay was charged
    Closed,
}

impl ParkingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parked => "parked",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ParkingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParkingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parked" => Ok(Self::Parked),
            "closed" => Ok(Self::Closed),
            other => Err(DomainError::Validation(format!(
                "Unknown parking status: {}",
                other
            ))),
        }
    }
}

/// A single vehicle visit. Times are unix seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingLog {
    pub ticket_id: Uuid,
    pub customer_id: String,
    /// Check-in day in the lot's local time
    pub date: NaiveDate,
    pub plate_number: String,
    pub entry_gate: String,
    pub checkin_time: i64,
    pub checkout_time: Option<i64>,
    pub exit_gate: Option<String>,
    pub status: ParkingStatus,
    pub duration_seconds: Option<i64>,
    /// Amount charged at check-out, minor currency units
    pub cash: Option<i64>,
    pub subscription_id: Option<i32>,
}

impl ParkingLog {
    /// New open session with a fresh ticket
    pub fn open(
        customer_id: impl Into<String>,
        plate_number: &str,
        entry_gate: impl Into<String>,
        at: DateTime<FixedOffset>,
    ) -> Result<Self, DomainError> {
        let plate_number = normalize_plate(plate_number);
        if plate_number.is_empty() {
            return Err(DomainError::Validation("plate number is required".into()));
        }
        Ok(Self {
            ticket_id: Uuid::new_v4(),
            customer_id: customer_id.into(),
            date: at.date_naive(),
            plate_number,
            entry_gate: entry_gate.into(),
            checkin_time: at.timestamp(),
            checkout_time: None,
            exit_gate: None,
            status: ParkingStatus::Parked,
            duration_seconds: None,
            cash: None,
            subscription_id: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.status == ParkingStatus::Parked
    }

    /// Seconds the vehicle stays if it leaves at `checkout_time`
    pub fn stay_seconds(&self, checkout_time: i64) -> Result<i64, DomainError> {
        if !self.is_open() {
            return Err(DomainError::Conflict(format!(
                "ticket {} is already closed",
                self.ticket_id
            )));
        }
        if checkout_time < self.checkin_time {
            return Err(DomainError::Validation(format!(
                "check-out ({}) precedes check-in ({})",
                checkout_time, self.checkin_time
            )));
        }
        Ok(checkout_time - self.checkin_time)
    }

    /// Close the session with the amount charged
    pub fn close(
        &mut self,
        checkout_time: i64,
        exit_gate: impl Into<String>,
        cost: i64,
        subscription_id: Option<i32>,
    ) -> Result<(), DomainError> {
        let duration = self.stay_seconds(checkout_time)?;
        self.checkout_time = Some(checkout_time);
        self.exit_gate = Some(exit_gate.into());
        self.duration_seconds = Some(duration);
        self.cash = Some(cost);
        self.subscription_id = subscription_id;
        self.status = ParkingStatus::Closed;
        Ok(())
    }

    /// Seconds since check-in, or the full stay once closed
    pub fn elapsed(&self, now: i64) -> i64 {
        (self.checkout_time.unwrap_or(now) - self.checkin_time).max(0)
    }

    /// Check-in wall-clock time, `HH:MM:SS`
    pub fn format_checkin_time(&self, offset: &FixedOffset) -> String {
        match offset.timestamp_opt(self.checkin_time, 0).single() {
            Some(t) => t.format("%H:%M:%S").to_string(),
            None => "--:--:--".to_string(),
        }
    }
}

/// Parse `YYYY-MM-DD` + `HH:MM` entered at a gate in the lot's local time.
pub fn parse_local_datetime(
    date: &str,
    time: &str,
    offset: &FixedOffset,
) -> Result<DateTime<FixedOffset>, DomainError> {
    let raw = format!("{} {}", date.trim(), time.trim());
    let naive = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M")
        .map_err(|e| DomainError::Validation(format!("invalid check-in time '{}': {}", raw, e)))?;
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| DomainError::Validation(format!("ambiguous local time '{}'", raw)))
}

/// Compact human form of a duration: `45s`, `12m`, `2h 05m`, `3d 4h 10m`
pub fn humanize_duration(seconds: i64) -> String {
    let s = seconds.max(0);
    let (days, rem) = (s / 86_400, s % 86_400);
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let (minutes, secs) = (rem / 60, rem % 60);

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", secs)
    }
}

/// Sum/count over closed sessions of a period
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevenueTotals {
    pub revenue: i64,
    pub sessions: u64,
    pub subscription_sessions: u64,
    pub total_duration_seconds: i64,
}

impl RevenueTotals {
    pub fn average_duration_seconds(&self) -> i64 {
        if self.sessions == 0 {
            0
        } else {
            self.total_duration_seconds / self.sessions as i64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn opened() -> ParkingLog {
        let at = parse_local_datetime("2024-05-10", "08:30", &utc()).unwrap();
        ParkingLog::open("EPMS-0001", " kdd 100x", "SouthGate", at).unwrap()
    }

    #[test]
    fn open_sets_parked_state() {
        let log = opened();
        assert!(log.is_open());
        assert_eq!(log.plate_number, "KDD100X");
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert_eq!(log.checkout_time, None);
    }

    #[test]
    fn open_requires_plate() {
        let at = parse_local_datetime("2024-05-10", "08:30", &utc()).unwrap();
        assert!(ParkingLog::open("EPMS-0001", "  ", "SouthGate", at).is_err());
    }

    #[test]
    fn local_date_follows_offset() {
        let nairobi = FixedOffset::east_opt(3 * 3600).unwrap();
        let at = parse_local_datetime("2024-05-10", "01:15", &nairobi).unwrap();
        let log = ParkingLog::open("EPMS-0001", "A1", "North", at).unwrap();
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert_eq!(log.format_checkin_time(&nairobi), "01:15:00");
        assert_eq!(log.format_checkin_time(&utc()), "22:15:00");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_local_datetime("10/05/2024", "08:30", &utc()).is_err());
        assert!(parse_local_datetime("2024-05-10", "8h30", &utc()).is_err());
    }

    #[test]
    fn close_records_stay() {
        let mut log = opened();
        let out = log.checkin_time + 5_400;
        log.close(out, "NorthGate", 500, None).unwrap();
        assert_eq!(log.status, ParkingStatus::Closed);
        assert_eq!(log.duration_seconds, Some(5_400));
        assert_eq!(log.cash, Some(500));
        assert_eq!(log.exit_gate.as_deref(), Some("NorthGate"));
        assert_eq!(log.elapsed(out + 10_000), 5_400);
    }

    #[test]
    fn close_twice_conflicts() {
        let mut log = opened();
        let out = log.checkin_time + 60;
        log.close(out, "NorthGate", 0, Some(3)).unwrap();
        assert!(matches!(
            log.close(out + 60, "NorthGate", 0, None),
            Err(DomainError::Conflict(_))
        ));
        assert_eq!(log.subscription_id, Some(3));
    }

    #[test]
    fn checkout_before_checkin_is_invalid() {
        let log = opened();
        assert!(matches!(
            log.stay_seconds(log.checkin_time - 1),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn elapsed_never_negative() {
        let log = opened();
        assert_eq!(log.elapsed(log.checkin_time - 100), 0);
        assert_eq!(log.elapsed(log.checkin_time + 42), 42);
    }

    #[test]
    fn humanize() {
        assert_eq!(humanize_duration(-3), "0s");
        assert_eq!(humanize_duration(45), "45s");
        assert_eq!(humanize_duration(12 * 60 + 30), "12m");
        assert_eq!(humanize_duration(2 * 3600 + 5 * 60), "2h 05m");
        assert_eq!(humanize_duration(3 * 86_400 + 4 * 3600 + 10 * 60), "3d 4h 10m");
    }

    #[test]
    fn status_parses() {
        assert_eq!("Parked".parse::<ParkingStatus>().unwrap(), ParkingStatus::Parked);
        assert_eq!(ParkingStatus::Closed.to_string(), "closed");
        assert!("gone".parse::<ParkingStatus>().is_err());
    }

    #[test]
    fn average_duration() {
        let t = RevenueTotals {
            revenue: 1000,
            sessions: 4,
            subscription_sessions: 1,
            total_duration_seconds: 3600,
        };
        assert_eq!(t.average_duration_seconds(), 900);
        assert_eq!(RevenueTotals::default().average_duration_seconds(), 0);
    }
}
