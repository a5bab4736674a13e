//! chart-timeline: time-axis coordinate model and invalidation-driven
//! rendering pipeline for financial charts.
//!
//! The crate keeps a strict split between the horizontal-scale behavior that
//! orders heterogeneous time inputs, the invalidation model that decides what
//! must be repainted, and the coordinate-space renderers that draw it.

pub mod config;
pub mod core;
pub mod error;
pub mod gpu;
pub mod horz_scale;
pub mod model;
pub mod render;
pub mod telemetry;
pub mod views;

pub use config::ChartOptions;
pub use error::{ChartError, ChartResult};
