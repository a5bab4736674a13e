use serde::{Deserialize, Serialize};

/// Ordinal position on the merged timeline.
pub type TimePointIndex = i64;

/// Fractional bar-index range used by structural time-scale requests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogicalRange {
    pub from: f64,
    pub to: f64,
}

impl LogicalRange {
    #[must_use]
    pub const fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.from
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.to
    }
}

/// Half-open `[from, to)` range of item indices handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexRange {
    pub from: usize,
    pub to: usize,
}

impl IndexRange {
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.to.saturating_sub(self.from)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.to <= self.from
    }
}
