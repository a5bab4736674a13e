use chrono::{DateTime, Datelike, Timelike, Utc};

use super::TickMarkType;

pub const DEFAULT_DATE_FORMAT: &str = "dd MMM 'yy";
const DATE_TIME_SEPARATOR: &str = "   ";

const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const FULL_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn month_name(names: &'static [&'static str; 12], month: u32) -> &'static str {
    names[(month.clamp(1, 12) - 1) as usize]
}

/// Expands the date tokens `yyyy`, `yy`, `MMMM`, `MMM`, `MM` and `dd`.
///
/// Tokens are replaced in that order, so `yyyy` never leaks a `yy` match and a
/// full month name is never re-read as `MMM`.
#[must_use]
pub fn format_date(date: DateTime<Utc>, format: &str) -> String {
    format
        .replace("yyyy", &format!("{:04}", date.year()))
        .replace("yy", &format!("{:02}", date.year().rem_euclid(100)))
        .replace("MMMM", month_name(&FULL_MONTHS, date.month()))
        .replace("MMM", month_name(&SHORT_MONTHS, date.month()))
        .replace("MM", &format!("{:02}", date.month()))
        .replace("dd", &format!("{:02}", date.day()))
}

/// Expands `%h`, `%m` and `%s`.
#[must_use]
pub fn format_time(date: DateTime<Utc>, format: &str) -> String {
    format
        .replace("%h", &format!("{:02}", date.hour()))
        .replace("%m", &format!("{:02}", date.minute()))
        .replace("%s", &format!("{:02}", date.second()))
}

/// Formatter behind `format_horz_item`; rebuilt whenever visibility flags or
/// the date format change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormatter {
    date_format: String,
    time_format: Option<&'static str>,
}

impl DateTimeFormatter {
    #[must_use]
    pub fn new(date_format: &str, time_visible: bool, seconds_visible: bool) -> Self {
        let time_format = time_visible.then_some(if seconds_visible {
            "%h:%m:%s"
        } else {
            "%h:%m"
        });
        Self {
            date_format: date_format.to_owned(),
            time_format,
        }
    }

    #[must_use]
    pub fn format(&self, date: DateTime<Utc>) -> String {
        let date_part = format_date(date, &self.date_format);
        match self.time_format {
            Some(time_format) => {
                format!("{date_part}{DATE_TIME_SEPARATOR}{}", format_time(date, time_format))
            }
            None => date_part,
        }
    }
}

impl Default for DateTimeFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT, false, false)
    }
}

/// Built-in tick label, interpreted in UTC.
#[must_use]
pub fn default_tick_mark_formatter(date: DateTime<Utc>, tick_mark_type: TickMarkType) -> String {
    match tick_mark_type {
        TickMarkType::Year => date.year().to_string(),
        TickMarkType::Month => month_name(&SHORT_MONTHS, date.month()).to_owned(),
        TickMarkType::DayOfMonth => date.day().to_string(),
        TickMarkType::Time => format_time(date, "%h:%m"),
        TickMarkType::TimeWithSeconds => format_time(date, "%h:%m:%s"),
    }
}
