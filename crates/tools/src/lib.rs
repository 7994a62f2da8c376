//! Developer tooling: maze inspector and topology verification.
//!
//! # Invariants
//! - Tools only read maze state.

mod inspector;

pub use inspector::{MazeInspector, MazeSummary, TopologyError};

pub fn crate_info() -> &'static str {
    "neuropath-tools v0.1.0"
}
