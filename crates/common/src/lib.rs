//! Shared value types for the neuropath maze crates.

mod types;

pub use types::{BoundingBox, Direction, GridCoord};
