use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Significance tier of a timeline position.
///
/// Discriminants leave gaps so intraday bands stay grouped: everything in
/// `20..=22` is a minute band and everything in `30..=33` an hour band.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum TickMarkWeight {
    #[default]
    LessThanSecond = 0,
    Second = 10,
    Minute1 = 20,
    Minute5 = 21,
    Minute30 = 22,
    Hour1 = 30,
    Hour3 = 31,
    Hour6 = 32,
    Hour12 = 33,
    Day = 50,
    Month = 60,
    Year = 70,
}

impl TickMarkWeight {
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// Label flavour chosen for a tick mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickMarkType {
    Year,
    Month,
    DayOfMonth,
    Time,
    TimeWithSeconds,
}

#[must_use]
pub fn weight_to_tick_mark_type(
    weight: TickMarkWeight,
    time_visible: bool,
    seconds_visible: bool,
) -> TickMarkType {
    match weight {
        TickMarkWeight::LessThanSecond | TickMarkWeight::Second => {
            if !time_visible {
                TickMarkType::DayOfMonth
            } else if seconds_visible {
                TickMarkType::TimeWithSeconds
            } else {
                TickMarkType::Time
            }
        }
        TickMarkWeight::Minute1
        | TickMarkWeight::Minute5
        | TickMarkWeight::Minute30
        | TickMarkWeight::Hour1
        | TickMarkWeight::Hour3
        | TickMarkWeight::Hour6
        | TickMarkWeight::Hour12 => {
            if time_visible {
                TickMarkType::Time
            } else {
                TickMarkType::DayOfMonth
            }
        }
        TickMarkWeight::Day => TickMarkType::DayOfMonth,
        TickMarkWeight::Month => TickMarkType::Month,
        TickMarkWeight::Year => TickMarkType::Year,
    }
}

/// Maximum weight of a set of marks.
///
/// A bold 15:00 next to a regular 14:00 reads as noise, so anything strictly
/// between `Hour1` and `Day` is reported as `Hour1`.
#[must_use]
pub fn max_weight<I>(weights: I) -> TickMarkWeight
where
    I: IntoIterator<Item = TickMarkWeight>,
{
    let max = weights
        .into_iter()
        .max()
        .unwrap_or(TickMarkWeight::LessThanSecond);
    if max > TickMarkWeight::Hour1 && max < TickMarkWeight::Day {
        TickMarkWeight::Hour1
    } else {
        max
    }
}

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;

// Coarsest first.
const INTRADAY_DIVISORS: [(i64, TickMarkWeight); 8] = [
    (12 * HOUR_MS, TickMarkWeight::Hour12),
    (6 * HOUR_MS, TickMarkWeight::Hour6),
    (3 * HOUR_MS, TickMarkWeight::Hour3),
    (HOUR_MS, TickMarkWeight::Hour1),
    (30 * MINUTE_MS, TickMarkWeight::Minute30),
    (5 * MINUTE_MS, TickMarkWeight::Minute5),
    (MINUTE_MS, TickMarkWeight::Minute1),
    (SECOND_MS, TickMarkWeight::Second),
];

/// Weight of `current_ms` relative to its predecessor `previous_ms` (UTC milliseconds).
#[must_use]
pub fn weight_by_time(current_ms: i64, previous_ms: i64) -> TickMarkWeight {
    if let (Some(current), Some(previous)) = (
        DateTime::<Utc>::from_timestamp_millis(current_ms),
        DateTime::<Utc>::from_timestamp_millis(previous_ms),
    ) {
        if current.year() != previous.year() {
            return TickMarkWeight::Year;
        }
        if current.month() != previous.month() {
            return TickMarkWeight::Month;
        }
        if current.day() != previous.day() {
            return TickMarkWeight::Day;
        }
    }

    INTRADAY_DIVISORS
        .iter()
        .find(|(divisor, _)| {
            previous_ms.div_euclid(*divisor) != current_ms.div_euclid(*divisor)
        })
        .map_or(TickMarkWeight::LessThanSecond, |(_, weight)| *weight)
}

/// Assigns weights to `weights[start_index..]` from the matching UTC millisecond
/// timestamps. Entries before `start_index` are only read.
pub fn fill_weights_from_millis(
    millis: &[i64],
    weights: &mut [TickMarkWeight],
    start_index: usize,
) {
    let len = millis.len().min(weights.len());
    if len == 0 || start_index >= len {
        return;
    }

    let mut previous = start_index.checked_sub(1).map(|index| millis[index]);
    let mut total_diff: i128 = 0;
    for index in start_index..len {
        let current = millis[index];
        if let Some(previous) = previous {
            weights[index] = weight_by_time(current, previous);
            total_diff += i128::from(current) - i128::from(previous);
        }
        previous = Some(current);
    }

    if start_index == 0 && len > 1 {
        let steps = i128::try_from(len - 1).unwrap_or(i128::MAX);
        // Rounds the average step up, as the first point has no real predecessor.
        let average = (total_diff + steps - 1).div_euclid(steps);
        let before_first = i128::from(millis[0]) - average;
        let before_first = i64::try_from(before_first).unwrap_or(if before_first < 0 {
            i64::MIN
        } else {
            i64::MAX
        });
        weights[0] = weight_by_time(millis[0], before_first);
    }
}

#[cfg(test)]
mod tests {
    use super::{
        TickMarkType, TickMarkWeight, fill_weights_from_millis, max_weight, weight_by_time,
        weight_to_tick_mark_type,
    };

    const DAY_MS: i64 = 86_400_000;

    #[test]
    fn max_weight_clamps_sub_day_hour_bands_to_hour1() {
        let weights = [
            TickMarkWeight::Minute5,
            TickMarkWeight::Hour6,
            TickMarkWeight::Hour1,
        ];
        assert_eq!(max_weight(weights), TickMarkWeight::Hour1);
        assert_eq!(
            max_weight([TickMarkWeight::Hour12, TickMarkWeight::Day]),
            TickMarkWeight::Day
        );
        assert_eq!(max_weight([]), TickMarkWeight::LessThanSecond);
    }

    #[test]
    fn weight_by_time_detects_calendar_boundaries() {
        // 2024-01-31T00:00:00Z -> 2024-02-01T00:00:00Z
        let jan31 = 1_706_659_200_000;
        assert_eq!(weight_by_time(jan31 + DAY_MS, jan31), TickMarkWeight::Month);
        assert_eq!(weight_by_time(jan31, jan31 - DAY_MS), TickMarkWeight::Day);
        assert_eq!(
            weight_by_time(jan31 + 3 * 3_600_000, jan31 + 2 * 3_600_000),
            TickMarkWeight::Hour3
        );
        assert_eq!(weight_by_time(jan31 + 500, jan31 + 100), TickMarkWeight::LessThanSecond);
    }

    #[test]
    fn fill_weights_keeps_prefix_untouched() {
        let millis: Vec<i64> = (0..4).map(|i| i * 60_000).collect();
        let mut weights = vec![TickMarkWeight::Year; 4];
        fill_weights_from_millis(&millis, &mut weights, 2);
        assert_eq!(weights[0], TickMarkWeight::Year);
        assert_eq!(weights[1], TickMarkWeight::Year);
        assert_eq!(weights[2], TickMarkWeight::Minute1);
        assert_eq!(weights[3], TickMarkWeight::Minute1);
    }

    #[test]
    fn weight_type_mapping_follows_visibility_flags() {
        assert_eq!(
            weight_to_tick_mark_type(TickMarkWeight::Second, true, true),
            TickMarkType::TimeWithSeconds
        );
        assert_eq!(
            weight_to_tick_mark_type(TickMarkWeight::Second, true, false),
            TickMarkType::Time
        );
        assert_eq!(
            weight_to_tick_mark_type(TickMarkWeight::Hour3, false, false),
            TickMarkType::DayOfMonth
        );
        assert_eq!(
            weight_to_tick_mark_type(TickMarkWeight::Year, true, true),
            TickMarkType::Year
        );
    }

    #[test]
    fn fill_weights_survives_extreme_millis() {
        let millis = [i64::MIN, i64::MAX];
        let mut weights = [TickMarkWeight::LessThanSecond; 2];
        fill_weights_from_millis(&millis, &mut weights, 0);
        assert_eq!(weights[1], TickMarkWeight::Hour12);
    }
}
