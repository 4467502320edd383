pub mod color;
pub mod document;
pub mod geometry;

pub use color::Color;
pub use document::{DocumentInfo, OutlineEntry};
pub use geometry::{Rect, Size};
