use serde::{Deserialize, Serialize};

use crate::horz_scale::TickMarkWeight;

/// Horizontal grid/axis mark produced by the external time scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeMark {
    pub coord: f64,
    pub label: String,
    pub weight: TickMarkWeight,
    pub need_align_coordinate: bool,
}

/// Vertical grid/axis mark produced by the external price scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceMark {
    pub coord: f64,
    pub label: String,
}
