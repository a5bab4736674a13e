use std::sync::Arc;

use chart_timeline::config::{LocalizationOptions, TimeScaleLabelOptions};
use chart_timeline::horz_scale::{
    BusinessDay, HorzItemConverter, HorzScaleBehavior, SingleValueData, TickMark, TickMarkType,
    TickMarkWeight, Time, TimeHorzScaleBehavior, TimePoint, TimeScalePoint, TimedData, Timeline,
    WhitespaceData,
};
use chart_timeline::{ChartError, ChartResult};

const JAN_1_2024: f64 = 1_704_067_200.0;

fn behavior() -> TimeHorzScaleBehavior {
    TimeHorzScaleBehavior::new(
        TimeScaleLabelOptions::default(),
        LocalizationOptions::default(),
    )
}

fn value(time: Time, value: f64) -> SingleValueData {
    SingleValueData { time, value }
}

#[test]
fn iso_strings_are_normalized_to_business_days() {
    let mut data = vec![
        value(Time::IsoDate("2024-01-02".to_owned()), 1.0),
        value(BusinessDay::new(2024, 1, 3).into(), 2.0),
    ];
    behavior().preprocess_data(&mut data).expect("preprocess");
    assert_eq!(data[0].time, Time::BusinessDay(BusinessDay::new(2024, 1, 2)));
}

#[test]
fn mixed_time_shapes_fail_fast() {
    let mut data = vec![
        value(Time::Timestamp(JAN_1_2024), 1.0),
        value(BusinessDay::new(2024, 1, 3).into(), 2.0),
    ];
    let err = behavior()
        .preprocess_data(&mut data)
        .expect_err("mixed shapes must be rejected");
    assert!(matches!(err, ChartError::MixedTimeShapes { index: 1, .. }));
}

#[test]
fn malformed_values_are_rejected() {
    for bad in ["2024-1-02", "2024-02-30", "yesterday"] {
        let mut data = vec![WhitespaceData {
            time: Time::IsoDate(bad.to_owned()),
        }];
        assert!(
            matches!(
                behavior().preprocess_data(&mut data),
                Err(ChartError::InvalidTime(_))
            ),
            "{bad} should not parse"
        );
    }
}

#[test]
fn converter_selection_needs_data() {
    let empty: Vec<WhitespaceData> = Vec::new();
    assert!(matches!(
        behavior().create_converter_to_internal_obj(&empty),
        Err(ChartError::NoTimeConverter)
    ));
}

#[test]
fn business_day_and_midnight_timestamp_share_a_key() {
    let behavior = behavior();
    let day = behavior
        .convert_horz_item_to_internal(&BusinessDay::new(2024, 1, 1).into())
        .expect("business day");
    let stamp = behavior
        .convert_horz_item_to_internal(&Time::Timestamp(JAN_1_2024))
        .expect("timestamp");
    assert_eq!(behavior.key(&day), behavior.key(&stamp));
    assert_eq!(behavior.key(&stamp), JAN_1_2024 * 1000.0);
}

#[test]
fn cache_key_collapses_a_day() {
    let behavior = behavior();
    let morning = TimePoint {
        timestamp: JAN_1_2024 + 3_600.0,
        business_day: None,
    };
    let evening = TimePoint {
        timestamp: JAN_1_2024 + 20.0 * 3_600.0,
        business_day: None,
    };
    assert_eq!(behavior.cache_key(&morning), behavior.cache_key(&evening));
    assert_ne!(behavior.key(&morning), behavior.key(&evening));
}

#[test]
fn timeline_assigns_intraday_weights() {
    let behavior = behavior();
    let minutes = [0.0, 1.0, 5.0, 60.0, 24.0 * 60.0];
    let data: Vec<WhitespaceData> = minutes
        .iter()
        .map(|minute| WhitespaceData {
            time: Time::Timestamp(JAN_1_2024 + minute * 60.0),
        })
        .collect();

    let mut timeline = Timeline::new();
    timeline.rebuild(&behavior, &[data.as_slice()]).expect("rebuild");
    let weights: Vec<TickMarkWeight> = timeline
        .points()
        .iter()
        .map(|point| point.time_weight)
        .skip(1)
        .collect();
    assert_eq!(
        weights,
        vec![
            TickMarkWeight::Minute1,
            TickMarkWeight::Minute5,
            TickMarkWeight::Hour1,
            TickMarkWeight::Day,
        ]
    );
}

#[test]
fn timeline_merges_series_and_drops_duplicates() {
    let behavior = behavior();
    let a = vec![
        WhitespaceData {
            time: Time::Timestamp(JAN_1_2024 + 120.0),
        },
        WhitespaceData {
            time: Time::Timestamp(JAN_1_2024),
        },
    ];
    let b = vec![WhitespaceData {
        time: Time::Timestamp(JAN_1_2024 + 120.0),
    }];

    let mut timeline = Timeline::new();
    timeline.rebuild(&behavior, &[a.as_slice(), b.as_slice()]).expect("rebuild");
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline.index_of_key(JAN_1_2024 * 1000.0), Some(0));
    assert_eq!(timeline.key_at(1), Some((JAN_1_2024 + 120.0) * 1000.0));
}

#[test]
fn appending_before_the_end_is_an_error() {
    let behavior = behavior();
    let initial = vec![WhitespaceData {
        time: Time::Timestamp(JAN_1_2024 + 60.0),
    }];
    let mut timeline = Timeline::new();
    timeline.rebuild(&behavior, &[initial.as_slice()]).expect("rebuild");

    let late = vec![WhitespaceData {
        time: Time::Timestamp(JAN_1_2024),
    }];
    assert!(timeline.append(&behavior, &late).is_err());

    let next = vec![WhitespaceData {
        time: Time::Timestamp(JAN_1_2024 + 120.0),
    }];
    assert_eq!(timeline.append(&behavior, &next).expect("append"), 1);
    assert_eq!(timeline.points()[1].time_weight, TickMarkWeight::Minute1);
}

fn tick(
    behavior: &TimeHorzScaleBehavior,
    weight: TickMarkWeight,
    time: Time,
) -> TickMark<Time, TimePoint> {
    TickMark {
        index: 0,
        time: behavior.convert_horz_item_to_internal(&time).expect("convert"),
        original_time: time,
        weight,
    }
}

#[test]
fn tick_labels_follow_weight() {
    let behavior = behavior();
    let localization = LocalizationOptions::default();
    let noon = Time::Timestamp(JAN_1_2024 + 12.0 * 3_600.0 + 30.0 * 60.0);

    let year = tick(&behavior, TickMarkWeight::Year, noon.clone());
    let month = tick(&behavior, TickMarkWeight::Month, noon.clone());
    let day = tick(&behavior, TickMarkWeight::Day, noon.clone());
    let time = tick(&behavior, TickMarkWeight::Minute30, noon);

    assert_eq!(behavior.format_tickmark(&year, &localization), "2024");
    assert_eq!(behavior.format_tickmark(&month, &localization), "Jan");
    assert_eq!(behavior.format_tickmark(&day, &localization), "1");
    // Intraday weights fall back to the day while time is hidden.
    assert_eq!(behavior.format_tickmark(&time, &localization), "1");

    let with_time = TimeHorzScaleBehavior::new(
        TimeScaleLabelOptions {
            time_visible: true,
            seconds_visible: false,
        },
        localization.clone(),
    );
    assert_eq!(with_time.format_tickmark(&time, &localization), "12:30");
}

#[test]
fn user_tick_formatter_can_defer_to_builtin() {
    let behavior = behavior().with_tick_mark_formatter(Arc::new(
        |_: &Time, kind: TickMarkType, locale: &str| {
            (kind == TickMarkType::Year).then(|| format!("Y[{locale}]"))
        },
    ));
    let localization = LocalizationOptions {
        locale: "de-DE".to_owned(),
        ..LocalizationOptions::default()
    };
    let time = Time::Timestamp(JAN_1_2024);
    let year = tick(&behavior, TickMarkWeight::Year, time.clone());
    let month = tick(&behavior, TickMarkWeight::Month, time);
    assert_eq!(behavior.format_tickmark(&year, &localization), "Y[de-DE]");
    assert_eq!(behavior.format_tickmark(&month, &localization), "Jan");
}

#[test]
fn max_weight_clamps_intraday_hours() {
    let behavior = behavior();
    let time = Time::Timestamp(JAN_1_2024);
    let marks = vec![
        tick(&behavior, TickMarkWeight::Minute30, time.clone()),
        tick(&behavior, TickMarkWeight::Hour6, time.clone()),
    ];
    assert_eq!(behavior.max_tick_mark_weight(&marks), TickMarkWeight::Hour1);

    let with_day = vec![
        tick(&behavior, TickMarkWeight::Hour12, time.clone()),
        tick(&behavior, TickMarkWeight::Day, time),
    ];
    assert_eq!(behavior.max_tick_mark_weight(&with_day), TickMarkWeight::Day);
    assert_eq!(behavior.max_tick_mark_weight(&[]), TickMarkWeight::LessThanSecond);
}

/// Build-revision axis: raw values like `" R12 "`, internally the revision number.
/// Every tenth revision is a milestone and carries a day weight.
#[derive(Debug, Default)]
struct RevisionBehavior;

#[allow(clippy::ptr_arg)]
fn parse_revision(raw: &String) -> ChartResult<u32> {
    raw.strip_prefix('r')
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| ChartError::InvalidTime(format!("`{raw}` is not a revision")))
}

impl HorzScaleBehavior for RevisionBehavior {
    type Item = String;
    type Internal = u32;

    fn preprocess_data<D>(&self, data: &mut [D]) -> ChartResult<()>
    where
        D: TimedData<Time = String>,
    {
        for item in data.iter_mut() {
            let normalized = item.time().trim().to_lowercase();
            parse_revision(&normalized)?;
            *item.time_mut() = normalized;
        }
        Ok(())
    }

    fn create_converter_to_internal_obj<D>(
        &self,
        data: &[D],
    ) -> ChartResult<HorzItemConverter<String, u32>>
    where
        D: TimedData<Time = String>,
    {
        if data.is_empty() {
            return Err(ChartError::NoTimeConverter);
        }
        let convert: HorzItemConverter<String, u32> = parse_revision;
        Ok(convert)
    }

    fn convert_horz_item_to_internal(&self, item: &String) -> ChartResult<u32> {
        parse_revision(item)
    }

    fn key(&self, item: &u32) -> f64 {
        f64::from(*item)
    }

    fn cache_key(&self, item: &u32) -> i64 {
        i64::from(*item / 10)
    }

    fn format_horz_item(&self, item: &u32) -> String {
        format!("r{item}")
    }

    fn format_tickmark(
        &self,
        tick_mark: &TickMark<String, u32>,
        _localization: &LocalizationOptions,
    ) -> String {
        if tick_mark.weight >= TickMarkWeight::Day {
            format!("milestone r{}", tick_mark.time)
        } else {
            format!("r{}", tick_mark.time)
        }
    }

    fn fill_weights_for_points(
        &self,
        points: &mut [TimeScalePoint<String, u32>],
        start_index: usize,
    ) {
        for point in points.iter_mut().skip(start_index) {
            point.time_weight = if point.time % 10 == 0 {
                TickMarkWeight::Day
            } else {
                TickMarkWeight::Hour3
            };
        }
    }
}

fn revision(raw: &str) -> WhitespaceData<String> {
    WhitespaceData {
        time: raw.to_owned(),
    }
}

#[test]
fn custom_domain_flows_through_the_timeline() {
    let behavior = RevisionBehavior;
    let mut first = vec![revision(" R12 "), revision("r10")];
    let mut second = vec![revision("r11"), revision("R12")];
    behavior.preprocess_data(&mut first).expect("preprocess");
    behavior.preprocess_data(&mut second).expect("preprocess");
    assert_eq!(first[0].time, "r12");

    let convert = behavior
        .create_converter_to_internal_obj(&first)
        .expect("converter");
    assert_eq!(convert(&first[1].time).expect("convert"), 10);
    assert!(matches!(
        behavior.create_converter_to_internal_obj::<WhitespaceData<String>>(&[]),
        Err(ChartError::NoTimeConverter)
    ));

    let mut timeline = Timeline::new();
    timeline
        .rebuild(&behavior, &[first.as_slice(), second.as_slice()])
        .expect("rebuild");
    let revisions: Vec<u32> = timeline.points().iter().map(|p| p.time).collect();
    assert_eq!(revisions, vec![10, 11, 12]);
    assert_eq!(timeline.index_of_key(11.0), Some(1));

    let from = timeline
        .append(&behavior, &[revision("r12"), revision("r20")])
        .expect("append");
    assert_eq!(from, 3);
    assert_eq!(timeline.len(), 4);
    assert!(timeline.append(&behavior, &[revision("r5")]).is_err());
    assert!(timeline.append(&behavior, &[revision("v21")]).is_err());
    assert_eq!(timeline.len(), 4);

    let marks: Vec<TickMark<String, u32>> = timeline
        .points()
        .iter()
        .enumerate()
        .map(|(index, point)| TickMark {
            index: index as i64,
            time: point.time,
            original_time: point.original_time.clone(),
            weight: point.time_weight,
        })
        .collect();
    assert_eq!(behavior.max_tick_mark_weight(&marks), TickMarkWeight::Day);
    assert_eq!(
        behavior.max_tick_mark_weight(&marks[1..3]),
        TickMarkWeight::Hour1
    );

    let localization = LocalizationOptions::default();
    assert_eq!(
        behavior.format_tickmark(&marks[3], &localization),
        "milestone r20"
    );
    assert_eq!(behavior.format_tickmark(&marks[1], &localization), "r11");
    assert_eq!(behavior.format_horz_item(&marks[2].time), "r12");
}
