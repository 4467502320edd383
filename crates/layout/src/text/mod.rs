//! Greedy line breaking over measured words.

mod wrapper;

pub use wrapper::{Line, LineBreaker};
