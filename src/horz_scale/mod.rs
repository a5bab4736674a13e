//! Horizontal scale behaviors.
//!
//! A behavior turns raw horizontal values (timestamps, business days, or a
//! custom ordered domain) into an internal representation the rest of the
//! pipeline can sort, index and label without knowing what "time" means.

mod date_format;
mod time;
mod time_behavior;
mod timeline;
mod weight;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::LocalizationOptions;
use crate::core::TimePointIndex;
use crate::error::ChartResult;

pub use date_format::{
    DEFAULT_DATE_FORMAT, DateTimeFormatter, default_tick_mark_formatter, format_date, format_time,
};
pub use time::{BusinessDay, Time, TimePoint, string_to_business_day};
pub use time_behavior::TimeHorzScaleBehavior;
pub use timeline::Timeline;
pub use weight::{
    TickMarkType, TickMarkWeight, fill_weights_from_millis, max_weight, weight_by_time,
    weight_to_tick_mark_type,
};

/// Sortable key of an internal horizontal item.
pub type HorzItemKey = f64;

/// Pure conversion from a raw item to its internal form.
pub type HorzItemConverter<H, I> = fn(&H) -> ChartResult<I>;

/// Caller hook for tick labels; `None` defers to the built-in formatter.
pub type TickMarkFormatterFn<H> =
    Arc<dyn Fn(&H, TickMarkType, &str) -> Option<String> + Send + Sync + 'static>;

/// Caller hook for crosshair/axis item labels; `None` defers to the built-in formatter.
pub type HorzItemFormatterFn<H> = Arc<dyn Fn(&H) -> Option<String> + Send + Sync + 'static>;

/// Series item exposing its horizontal value.
pub trait TimedData {
    type Time;

    fn time(&self) -> &Self::Time;
    fn time_mut(&mut self) -> &mut Self::Time;
}

/// Item that only occupies a slot on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhitespaceData<H = Time> {
    pub time: H,
}

/// Item carrying one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleValueData<H = Time> {
    pub time: H,
    pub value: f64,
}

impl<H> TimedData for WhitespaceData<H> {
    type Time = H;

    fn time(&self) -> &H {
        &self.time
    }

    fn time_mut(&mut self) -> &mut H {
        &mut self.time
    }
}

impl<H> TimedData for SingleValueData<H> {
    type Time = H;

    fn time(&self) -> &H {
        &self.time
    }

    fn time_mut(&mut self) -> &mut H {
        &mut self.time
    }
}

/// One position of the merged timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScalePoint<H, I> {
    pub time: I,
    pub original_time: H,
    pub time_weight: TickMarkWeight,
}

/// Tick mark selected by the time scale for labelling.
#[derive(Debug, Clone, PartialEq)]
pub struct TickMark<H, I> {
    pub index: TimePointIndex,
    pub time: I,
    pub original_time: H,
    pub weight: TickMarkWeight,
}

/// Contract between raw horizontal values and the ordered internal timeline.
pub trait HorzScaleBehavior {
    type Item: Clone + fmt::Debug;
    type Internal: Clone + fmt::Debug;

    /// Normalizes every item's horizontal value in place.
    ///
    /// Errors on malformed values or when shapes that cannot share one timeline
    /// are mixed.
    fn preprocess_data<D>(&self, data: &mut [D]) -> ChartResult<()>
    where
        D: TimedData<Time = Self::Item>;

    /// Picks the converter matching the shape of the first item.
    fn create_converter_to_internal_obj<D>(
        &self,
        data: &[D],
    ) -> ChartResult<HorzItemConverter<Self::Item, Self::Internal>>
    where
        D: TimedData<Time = Self::Item>;

    fn convert_horz_item_to_internal(&self, item: &Self::Item) -> ChartResult<Self::Internal>;

    /// Sortable key; equal only for values on the same position.
    fn key(&self, item: &Self::Internal) -> HorzItemKey;

    /// Coarse key used by label caches. Not a substitute for [`Self::key`].
    fn cache_key(&self, item: &Self::Internal) -> i64;

    fn format_horz_item(&self, item: &Self::Internal) -> String;

    fn format_tickmark(
        &self,
        tick_mark: &TickMark<Self::Item, Self::Internal>,
        localization: &LocalizationOptions,
    ) -> String;

    fn max_tick_mark_weight(
        &self,
        tick_marks: &[TickMark<Self::Item, Self::Internal>],
    ) -> TickMarkWeight {
        max_weight(tick_marks.iter().map(|mark| mark.weight))
    }

    /// Assigns weights to `points[start_index..]`; earlier points are only read.
    fn fill_weights_for_points(
        &self,
        points: &mut [TimeScalePoint<Self::Item, Self::Internal>],
        start_index: usize,
    );
}
