//! Maze core: grid model, incremental DFS generation, path resolution and
//! collision geometry.
//!
//! # Invariants
//! - The grid is the only owner of cell storage; the DFS stack and parent
//!   links hold indices into it.
//! - Walls are only ever cleared, never re-added.
//! - Generation state moves forward only: `NotStarted → InProgress → Completed`.
//! - Path and geometry exist only once generation has completed and never change after.

pub mod config;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod path;
pub mod rng;

pub use config::{ConfigError, GeometryConfig, MazeConfig, MazeSettings};
pub use generator::{GenerationState, MazeEvent, MazeGenerator, StepOutcome};
pub use geometry::{MazeGeometry, WallBox};
pub use grid::{Cell, CellIndex, Grid, MazeError};
pub use path::{Path, PathError};
pub use rng::{RandomSource, SplitMix64};

pub fn crate_info() -> &'static str {
    "neuropath-maze v0.1.0"
}
