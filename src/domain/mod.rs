// Domain types and value objects
mod data_point;
mod view_mode;
mod zoom;

// Re-export commonly used types to the world
pub use data_point::{DataPoint, IndexedPoint, ModelKey, SeriesKey, indexed};
pub use view_mode::ViewMode;
pub use zoom::{Bound, ZoomRange};
