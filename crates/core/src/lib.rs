pub mod error;
pub mod geometry;
pub mod measure;

pub use error::{LayoutError, Result};
pub use geometry::{Bounds, Size};
pub use measure::{CellMeasure, Measure};
