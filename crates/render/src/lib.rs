//! Presentation adapter: frame-paced animation and renderer-agnostic drawing.
//!
//! # Invariants
//! - Renderers read maze state; only the animator steps the generator.
//! - Animation pacing lives outside the maze core.

mod animator;
mod renderer;

pub use animator::{FrameUpdate, MazeAnimator};
pub use renderer::{AsciiRenderer, MazeView, Renderer};

pub fn crate_info() -> &'static str {
    "neuropath-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
