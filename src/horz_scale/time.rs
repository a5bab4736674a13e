use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Calendar day without a time-of-day component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BusinessDay {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl BusinessDay {
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn to_naive_date(self) -> ChartResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| {
            ChartError::InvalidTime(format!(
                "{:04}-{:02}-{:02} is not a calendar date",
                self.year, self.month, self.day
            ))
        })
    }

    /// UTC midnight of this day, in seconds.
    pub fn utc_midnight_seconds(self) -> ChartResult<i64> {
        let date = self.to_naive_date()?;
        Ok(date
            .and_hms_opt(0, 0, 0)
            .map_or(0, |dt| dt.and_utc().timestamp()))
    }
}

/// Raw horizontal value as supplied by series data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Time {
    /// UTC timestamp in seconds.
    Timestamp(f64),
    BusinessDay(BusinessDay),
    /// ISO `YYYY-MM-DD`; normalized to `BusinessDay` during preprocessing.
    IsoDate(String),
}

impl Time {
    #[must_use]
    pub(crate) fn shape_name(&self) -> &'static str {
        match self {
            Self::Timestamp(_) => "timestamp",
            Self::BusinessDay(_) | Self::IsoDate(_) => "business day",
        }
    }
}

impl From<BusinessDay> for Time {
    fn from(day: BusinessDay) -> Self {
        Self::BusinessDay(day)
    }
}

impl From<f64> for Time {
    fn from(timestamp: f64) -> Self {
        Self::Timestamp(timestamp)
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(time: DateTime<Utc>) -> Self {
        Self::Timestamp(time.timestamp_millis() as f64 / 1000.0)
    }
}

/// Canonical internal time value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// UTC seconds; UTC midnight for business days.
    pub timestamp: f64,
    pub business_day: Option<BusinessDay>,
}

impl TimePoint {
    #[must_use]
    pub fn timestamp_millis(self) -> i64 {
        (self.timestamp * 1000.0).round() as i64
    }

    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp_millis())
    }
}

/// Parses a strict `YYYY-MM-DD` string.
pub fn string_to_business_day(value: &str) -> ChartResult<BusinessDay> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(index, byte)| index == 4 || index == 7 || byte.is_ascii_digit());
    if !well_formed {
        return Err(ChartError::InvalidTime(format!(
            "`{value}` is not an ISO 8601 date such as 2018-12-27"
        )));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| ChartError::InvalidTime(format!("`{value}`: {err}")))?;
    Ok(BusinessDay::new(date.year(), date.month(), date.day()))
}

/// Rejects timestamps that are not finite or fall outside the calendar range.
pub(crate) fn check_timestamp(timestamp: f64) -> ChartResult<()> {
    if !timestamp.is_finite() {
        return Err(ChartError::InvalidTime(
            "timestamp must be finite".to_owned(),
        ));
    }
    let millis = (timestamp * 1000.0).round();
    let in_range = millis.abs() < i64::MAX as f64
        && DateTime::<Utc>::from_timestamp_millis(millis as i64).is_some();
    if !in_range {
        return Err(ChartError::InvalidTime(format!(
            "timestamp {timestamp} is outside the supported calendar range"
        )));
    }
    Ok(())
}

pub fn timestamp_converter(time: &Time) -> ChartResult<TimePoint> {
    match time {
        Time::Timestamp(timestamp) => {
            check_timestamp(*timestamp)?;
            Ok(TimePoint {
                timestamp: *timestamp,
                business_day: None,
            })
        }
        other => Err(ChartError::InvalidTime(format!(
            "expected a timestamp, got a {}",
            other.shape_name()
        ))),
    }
}

pub fn business_day_converter(time: &Time) -> ChartResult<TimePoint> {
    let day = match time {
        Time::BusinessDay(day) => *day,
        Time::IsoDate(value) => string_to_business_day(value)?,
        Time::Timestamp(_) => {
            return Err(ChartError::InvalidTime(
                "expected a business day, got a timestamp".to_owned(),
            ));
        }
    };
    Ok(TimePoint {
        timestamp: day.utc_midnight_seconds()? as f64,
        business_day: Some(day),
    })
}

#[cfg(test)]
mod tests {
    use super::{
        BusinessDay, Time, business_day_converter, string_to_business_day, timestamp_converter,
    };

    #[test]
    fn iso_strings_parse_strictly() {
        assert_eq!(
            string_to_business_day("2018-12-27").expect("valid date"),
            BusinessDay::new(2018, 12, 27)
        );
        assert!(string_to_business_day("2018-2-27").is_err());
        assert!(string_to_business_day("2018-02-30").is_err());
        assert!(string_to_business_day("2018/12/27").is_err());
    }

    #[test]
    fn business_day_converts_to_utc_midnight() {
        let point = business_day_converter(&Time::BusinessDay(BusinessDay::new(2024, 1, 2)))
            .expect("convert");
        assert_eq!(point.timestamp, 1_704_153_600.0);
        assert_eq!(point.business_day, Some(BusinessDay::new(2024, 1, 2)));
    }

    #[test]
    fn timestamps_outside_calendar_range_are_rejected() {
        assert!(timestamp_converter(&Time::Timestamp(1_704_067_200.0)).is_ok());
        assert!(timestamp_converter(&Time::Timestamp(1e17)).is_err());
        assert!(timestamp_converter(&Time::Timestamp(-1e17)).is_err());
        assert!(timestamp_converter(&Time::Timestamp(f64::INFINITY)).is_err());
    }
}
