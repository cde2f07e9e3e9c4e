pub mod axis;
pub mod geometry;
pub mod series;

// Re-export everything for compatibility
pub use axis::*;
pub use geometry::*;
pub use series::*;
