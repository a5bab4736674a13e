use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid time value: {0}")]
    InvalidTime(String),

    #[error("mixed time shapes: item {index} is {found}, expected {expected}")]
    MixedTimeShapes {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("cannot select a time converter for empty data")]
    NoTimeConverter,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("render backend failure: {0}")]
    Backend(String),

    #[error("gpu resource failure in `{series}`: {reason}")]
    GpuResource { series: String, reason: String },
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
