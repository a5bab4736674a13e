use std::fmt;

use tracing::debug;

use crate::config::{LocalizationOptions, TimeScaleLabelOptions};
use crate::error::{ChartError, ChartResult};

use super::time::{business_day_converter, check_timestamp, timestamp_converter};
use super::{
    DateTimeFormatter, HorzItemConverter, HorzItemFormatterFn, HorzItemKey, HorzScaleBehavior,
    TickMark, TickMarkFormatterFn, TickMarkWeight, Time, TimePoint, TimeScalePoint, TimedData,
    default_tick_mark_formatter, fill_weights_from_millis, string_to_business_day,
    weight_to_tick_mark_type,
};

const DAY_MS: i64 = 86_400_000;

/// Built-in behavior for UTC timestamps and business days.
#[derive(Clone, Default)]
pub struct TimeHorzScaleBehavior {
    options: TimeScaleLabelOptions,
    localization: LocalizationOptions,
    formatter: DateTimeFormatter,
    tick_mark_formatter: Option<TickMarkFormatterFn<Time>>,
    time_formatter: Option<HorzItemFormatterFn<Time>>,
}

impl fmt::Debug for TimeHorzScaleBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeHorzScaleBehavior")
            .field("options", &self.options)
            .field("localization", &self.localization)
            .field("tick_mark_formatter", &self.tick_mark_formatter.is_some())
            .field("time_formatter", &self.time_formatter.is_some())
            .finish()
    }
}

impl TimeHorzScaleBehavior {
    #[must_use]
    pub fn new(options: TimeScaleLabelOptions, localization: LocalizationOptions) -> Self {
        let mut behavior = Self::default();
        behavior.apply_options(options, localization);
        behavior
    }

    pub fn apply_options(
        &mut self,
        options: TimeScaleLabelOptions,
        localization: LocalizationOptions,
    ) {
        self.formatter = DateTimeFormatter::new(
            &localization.date_format,
            options.time_visible,
            options.seconds_visible,
        );
        self.options = options;
        self.localization = localization;
    }

    #[must_use]
    pub fn options(&self) -> TimeScaleLabelOptions {
        self.options
    }

    #[must_use]
    pub fn localization(&self) -> &LocalizationOptions {
        &self.localization
    }

    #[must_use]
    pub fn with_tick_mark_formatter(mut self, formatter: TickMarkFormatterFn<Time>) -> Self {
        self.tick_mark_formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_time_formatter(mut self, formatter: HorzItemFormatterFn<Time>) -> Self {
        self.time_formatter = Some(formatter);
        self
    }

    pub fn clear_formatters(&mut self) {
        self.tick_mark_formatter = None;
        self.time_formatter = None;
    }

    fn original_time(item: &TimePoint) -> Time {
        match item.business_day {
            Some(day) => Time::BusinessDay(day),
            None => Time::Timestamp(item.timestamp),
        }
    }
}

fn normalize_time(time: &mut Time) -> ChartResult<()> {
    match time {
        Time::IsoDate(value) => {
            let day = string_to_business_day(value)?;
            *time = Time::BusinessDay(day);
        }
        Time::BusinessDay(day) => {
            day.to_naive_date()?;
        }
        Time::Timestamp(timestamp) => check_timestamp(*timestamp)?,
    }
    Ok(())
}

impl HorzScaleBehavior for TimeHorzScaleBehavior {
    type Item = Time;
    type Internal = TimePoint;

    fn preprocess_data<D>(&self, data: &mut [D]) -> ChartResult<()>
    where
        D: TimedData<Time = Time>,
    {
        let mut expected: Option<&'static str> = None;
        for (index, item) in data.iter_mut().enumerate() {
            let time = item.time_mut();
            normalize_time(time).inspect_err(|err| {
                debug!(index, error = %err, "rejecting malformed time value");
            })?;
            let found = time.shape_name();
            match expected {
                None => expected = Some(found),
                Some(expected) if expected != found => {
                    return Err(ChartError::MixedTimeShapes {
                        index,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn create_converter_to_internal_obj<D>(
        &self,
        data: &[D],
    ) -> ChartResult<HorzItemConverter<Time, TimePoint>>
    where
        D: TimedData<Time = Time>,
    {
        let first = data.first().ok_or(ChartError::NoTimeConverter)?;
        Ok(match first.time() {
            Time::Timestamp(_) => timestamp_converter,
            Time::BusinessDay(_) | Time::IsoDate(_) => business_day_converter,
        })
    }

    fn convert_horz_item_to_internal(&self, item: &Time) -> ChartResult<TimePoint> {
        match item {
            Time::Timestamp(_) => timestamp_converter(item),
            Time::BusinessDay(_) | Time::IsoDate(_) => business_day_converter(item),
        }
    }

    fn key(&self, item: &TimePoint) -> HorzItemKey {
        match item.business_day {
            Some(day) => day
                .utc_midnight_seconds()
                .map_or(item.timestamp * 1000.0, |seconds| seconds as f64 * 1000.0),
            None => item.timestamp * 1000.0,
        }
    }

    fn cache_key(&self, item: &TimePoint) -> i64 {
        match item.business_day {
            Some(day) => day
                .utc_midnight_seconds()
                .map_or(item.timestamp_millis(), |seconds| seconds * 1000),
            None => item.timestamp_millis().div_euclid(DAY_MS) * DAY_MS,
        }
    }

    fn format_horz_item(&self, item: &TimePoint) -> String {
        if let Some(formatter) = &self.time_formatter
            && let Some(text) = formatter(&Self::original_time(item))
        {
            return text;
        }
        item.to_datetime()
            .map_or_else(|| item.timestamp.to_string(), |date| self.formatter.format(date))
    }

    fn format_tickmark(
        &self,
        tick_mark: &TickMark<Time, TimePoint>,
        localization: &LocalizationOptions,
    ) -> String {
        let tick_mark_type = weight_to_tick_mark_type(
            tick_mark.weight,
            self.options.time_visible,
            self.options.seconds_visible,
        );
        if let Some(formatter) = &self.tick_mark_formatter
            && let Some(text) = formatter(&tick_mark.original_time, tick_mark_type, &localization.locale)
        {
            return text;
        }
        tick_mark.time.to_datetime().map_or_else(
            || tick_mark.time.timestamp.to_string(),
            |date| default_tick_mark_formatter(date, tick_mark_type),
        )
    }

    fn fill_weights_for_points(
        &self,
        points: &mut [TimeScalePoint<Time, TimePoint>],
        start_index: usize,
    ) {
        if start_index >= points.len() {
            return;
        }
        let millis: Vec<i64> = points
            .iter()
            .map(|point| point.time.timestamp_millis())
            .collect();
        let mut weights: Vec<TickMarkWeight> =
            points.iter().map(|point| point.time_weight).collect();
        fill_weights_from_millis(&millis, &mut weights, start_index);
        for (point, weight) in points.iter_mut().zip(weights).skip(start_index) {
            point.time_weight = weight;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::TimeHorzScaleBehavior;
    use crate::config::{LocalizationOptions, TimeScaleLabelOptions};
    use crate::horz_scale::{
        BusinessDay, HorzScaleBehavior, TickMark, TickMarkType, TickMarkWeight, Time,
        TimePoint, WhitespaceData,
    };

    #[test]
    fn preprocess_normalizes_iso_strings() {
        let behavior = TimeHorzScaleBehavior::default();
        let mut data = vec![
            WhitespaceData {
                time: Time::IsoDate("2024-01-02".to_owned()),
            },
            WhitespaceData {
                time: Time::BusinessDay(BusinessDay::new(2024, 1, 3)),
            },
        ];
        behavior.preprocess_data(&mut data).expect("preprocess");
        assert_eq!(data[0].time, Time::BusinessDay(BusinessDay::new(2024, 1, 2)));
    }

    #[test]
    fn tick_mark_formatter_can_veto_default() {
        let behavior = TimeHorzScaleBehavior::new(
            TimeScaleLabelOptions {
                time_visible: true,
                seconds_visible: false,
            },
            LocalizationOptions::default(),
        )
        .with_tick_mark_formatter(Arc::new(|_: &Time, kind: TickMarkType, locale: &str| {
            (kind == TickMarkType::Year).then(|| format!("Y/{locale}"))
        }));
        let year_mark = TickMark {
            index: 0,
            time: TimePoint {
                timestamp: 1_704_067_200.0,
                business_day: None,
            },
            original_time: Time::Timestamp(1_704_067_200.0),
            weight: TickMarkWeight::Year,
        };
        let localization = LocalizationOptions::default();
        assert_eq!(behavior.format_tickmark(&year_mark, &localization), "Y/en-US");

        let hour_mark = TickMark {
            weight: TickMarkWeight::Hour1,
            ..year_mark
        };
        assert_eq!(behavior.format_tickmark(&hour_mark, &localization), "00:00");
    }
}
