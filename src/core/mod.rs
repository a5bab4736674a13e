pub mod marks;
pub mod range;
pub mod types;

pub use marks::{PriceMark, TimeMark};
pub use range::{IndexRange, LogicalRange, TimePointIndex};
pub use types::{PixelRect, Point, Size};
