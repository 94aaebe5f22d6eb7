//! Bounds for time-window selection.
//!
//! A bound is either an exact instant or a whole calendar day. Day bounds
//! follow the usual partial-date slicing convention: as a start they mean
//! midnight, as a stop they cover every instant of that day.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use polars::prelude::TimeUnit;

use crate::error::AnalysisError;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Inclusive bound of a time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeKey {
    /// Exact timestamp (UTC).
    Instant(NaiveDateTime),
    /// Whole calendar day (UTC).
    Day(NaiveDate),
}

impl TimeKey {
    /// Earliest instant covered by this key.
    pub fn first_instant(&self) -> NaiveDateTime {
        match self {
            TimeKey::Instant(dt) => *dt,
            TimeKey::Day(day) => day.and_time(NaiveTime::MIN),
        }
    }

    /// Latest instant covered by this key.
    pub fn last_instant(&self) -> NaiveDateTime {
        match self {
            TimeKey::Instant(dt) => *dt,
            TimeKey::Day(day) => day
                .succ_opt()
                .map(|next| next.and_time(NaiveTime::MIN) - TimeDelta::nanoseconds(1))
                .unwrap_or(NaiveDateTime::MAX),
        }
    }

    /// Lower bound as a physical timestamp in `unit`.
    pub(crate) fn lower_physical(&self, unit: TimeUnit) -> i64 {
        to_physical(self.first_instant(), unit)
    }

    /// Upper bound as a physical timestamp in `unit`.
    pub(crate) fn upper_physical(&self, unit: TimeUnit) -> i64 {
        to_physical(self.last_instant(), unit)
    }
}

fn to_physical(instant: NaiveDateTime, unit: TimeUnit) -> i64 {
    let utc = instant.and_utc();
    match unit {
        TimeUnit::Milliseconds => utc.timestamp_millis(),
        TimeUnit::Microseconds => utc.timestamp_micros(),
        // Outside the nanosecond range every stored value lies on one side.
        TimeUnit::Nanoseconds => utc.timestamp_nanos_opt().unwrap_or(if utc.timestamp() < 0 {
            i64::MIN
        } else {
            i64::MAX
        }),
    }
}

impl From<NaiveDateTime> for TimeKey {
    fn from(value: NaiveDateTime) -> Self {
        TimeKey::Instant(value)
    }
}

impl From<NaiveDate> for TimeKey {
    fn from(value: NaiveDate) -> Self {
        TimeKey::Day(value)
    }
}

impl FromStr for TimeKey {
    type Err = AnalysisError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(TimeKey::Instant(dt.naive_utc()));
        }
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Ok(TimeKey::Instant(dt));
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(day) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Ok(TimeKey::Day(day));
            }
        }

        Err(AnalysisError::InvalidTimeKey {
            value: value.to_string(),
        })
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeKey::Instant(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            TimeKey::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
        }
    }
}
