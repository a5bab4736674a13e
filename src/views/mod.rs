//! Pane views: own one renderer each and rebuild its data lazily.
//!
//! Model changes only flip a dirty flag through `update()`; the renderer data
//! is refreshed in place on the next `renderer()` call.

mod crosshair;
mod grid;

pub use crosshair::{CrosshairPaneView, CrosshairSource};
pub use grid::{GridPaneView, MarksSource};
