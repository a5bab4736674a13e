use ordered_float::OrderedFloat;
use tracing::trace;

use crate::core::TimePointIndex;
use crate::error::{ChartError, ChartResult};

use super::{HorzScaleBehavior, TickMarkWeight, TimeScalePoint, TimedData};

/// Merged, de-duplicated horizontal timeline shared by every series.
///
/// Indices are contiguous `0..len` and points are strictly ordered by
/// [`HorzScaleBehavior::key`].
#[derive(Debug, Clone)]
pub struct Timeline<B: HorzScaleBehavior> {
    points: Vec<TimeScalePoint<B::Item, B::Internal>>,
    keys: Vec<OrderedFloat<f64>>,
}

impl<B: HorzScaleBehavior> Default for Timeline<B> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            keys: Vec::new(),
        }
    }
}

impl<B: HorzScaleBehavior> Timeline<B> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn points(&self) -> &[TimeScalePoint<B::Item, B::Internal>] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn key_at(&self, index: TimePointIndex) -> Option<f64> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.keys.get(index))
            .map(|key| key.into_inner())
    }

    /// Index of the point whose key equals `key`.
    #[must_use]
    pub fn index_of_key(&self, key: f64) -> Option<TimePointIndex> {
        self.keys
            .binary_search(&OrderedFloat(key))
            .ok()
            .and_then(|index| TimePointIndex::try_from(index).ok())
    }

    /// Rebuilds the timeline from already preprocessed series data.
    pub fn rebuild<D>(&mut self, behavior: &B, series: &[&[D]]) -> ChartResult<()>
    where
        D: TimedData<Time = B::Item>,
    {
        let mut entries = Vec::with_capacity(series.iter().map(|items| items.len()).sum());
        for items in series.iter().filter(|items| !items.is_empty()) {
            let convert = behavior.create_converter_to_internal_obj(items)?;
            for item in items.iter() {
                let original = item.time().clone();
                let internal = convert(&original)?;
                let key = behavior.key(&internal);
                if key.is_nan() {
                    return Err(ChartError::InvalidTime(format!(
                        "{original:?} produced a NaN key"
                    )));
                }
                entries.push((OrderedFloat(key), internal, original));
            }
        }
        entries.sort_by_key(|(key, _, _)| *key);
        entries.dedup_by_key(|(key, _, _)| *key);

        self.points.clear();
        self.keys.clear();
        for (key, time, original_time) in entries {
            self.keys.push(key);
            self.points.push(TimeScalePoint {
                time,
                original_time,
                time_weight: TickMarkWeight::default(),
            });
        }
        behavior.fill_weights_for_points(&mut self.points, 0);
        trace!(points = self.points.len(), "timeline rebuilt");
        Ok(())
    }

    /// Appends realtime items at the end of the timeline.
    ///
    /// An item whose key equals the last key replaces that point. Returns the
    /// first index whose weight was recomputed. The batch is validated before
    /// anything is committed, so a failed call leaves the timeline untouched.
    pub fn append<D>(&mut self, behavior: &B, items: &[D]) -> ChartResult<usize>
    where
        D: TimedData<Time = B::Item>,
    {
        let mut staged: Vec<(OrderedFloat<f64>, B::Internal, B::Item)> =
            Vec::with_capacity(items.len());
        for item in items {
            let original = item.time().clone();
            let internal = behavior.convert_horz_item_to_internal(&original)?;
            let key = behavior.key(&internal);
            if key.is_nan() {
                return Err(ChartError::InvalidTime(format!(
                    "{original:?} produced a NaN key"
                )));
            }
            let key = OrderedFloat(key);
            let last = staged.last().map(|(key, _, _)| key).or(self.keys.last());
            if let Some(last) = last
                && key < *last
            {
                return Err(ChartError::InvalidData(format!(
                    "appended item {original:?} precedes the end of the timeline"
                )));
            }
            staged.push((key, internal, original));
        }

        let old_len = self.points.len();
        for (key, time, original_time) in staged {
            if self.keys.last() == Some(&key) {
                // Same key: the weight stays valid.
                if let Some(point) = self.points.last_mut() {
                    point.time = time;
                    point.original_time = original_time;
                }
                continue;
            }
            self.keys.push(key);
            self.points.push(TimeScalePoint {
                time,
                original_time,
                time_weight: TickMarkWeight::default(),
            });
        }
        behavior.fill_weights_for_points(&mut self.points, old_len);
        trace!(points = self.points.len(), "timeline appended");
        Ok(old_len.min(self.points.len()))
    }
}
