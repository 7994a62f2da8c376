use neuropath_common::GridCoord;
use neuropath_maze::{GenerationState, MazeGenerator, RandomSource, StepOutcome};

use crate::renderer::MazeView;

/// What happened on one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameUpdate {
    /// Between paced frames, or nothing left to animate.
    Idle,
    /// Generation has not been started yet.
    Waiting,
    /// The generator advanced one step.
    Stepped(StepOutcome),
    /// One more path cell became visible; carries the visible count.
    Revealed(usize),
}

/// Frame-paced driver for a maze generator.
///
/// Every `frames_per_step` frames it performs one generation step while the
/// maze is in progress, then reveals the solved path one cell at a time.
#[derive(Debug, Clone)]
pub struct MazeAnimator {
    frames_per_step: u32,
    frame: u64,
    revealed: usize,
}

impl MazeAnimator {
    /// `frames_per_step` of zero is treated as one.
    pub fn new(frames_per_step: u32) -> Self {
        Self {
            frames_per_step: frames_per_step.max(1),
            frame: 0,
            revealed: 0,
        }
    }

    /// Frames between generation steps.
    pub fn frames_per_step(&self) -> u32 {
        self.frames_per_step
    }

    /// Frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame, stepping or revealing on paced frames only.
    pub fn tick<R: RandomSource>(&mut self, maze: &mut MazeGenerator<R>) -> FrameUpdate {
        self.frame += 1;
        if self.frame % u64::from(self.frames_per_step) != 0 {
            return FrameUpdate::Idle;
        }

        match maze.state() {
            GenerationState::NotStarted => FrameUpdate::Waiting,
            GenerationState::InProgress => FrameUpdate::Stepped(maze.generate()),
            GenerationState::Completed if self.revealed < maze.path().len() => {
                self.revealed += 1;
                tracing::trace!(revealed = self.revealed, "path reveal");
                FrameUpdate::Revealed(self.revealed)
            }
            GenerationState::Completed | GenerationState::Failed => FrameUpdate::Idle,
        }
    }

    /// True once the maze is finished and its whole path is visible.
    pub fn is_finished<R: RandomSource>(&self, maze: &MazeGenerator<R>) -> bool {
        match maze.state() {
            GenerationState::Completed => self.revealed >= maze.path().len(),
            GenerationState::Failed => true,
            _ => false,
        }
    }

    /// The visible prefix of the solved path.
    pub fn revealed_path<'a, R: RandomSource>(&self, maze: &'a MazeGenerator<R>) -> &'a [GridCoord] {
        let path = maze.path();
        &path[..self.revealed.min(path.len())]
    }

    /// Render view matching the current reveal progress.
    pub fn view(&self) -> MazeView {
        MazeView {
            revealed_path: self.revealed,
            show_visited: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuropath_maze::MazeConfig;

    fn maze(cols: u32, rows: u32) -> MazeGenerator {
        MazeGenerator::with_seed(MazeConfig::cells(cols, rows), 3).unwrap()
    }

    #[test]
    fn waits_until_started() {
        let mut m = maze(2, 2);
        let mut animator = MazeAnimator::new(1);
        assert_eq!(animator.tick(&mut m), FrameUpdate::Waiting);
        assert_eq!(m.state(), GenerationState::NotStarted);
    }

    #[test]
    fn steps_only_on_paced_frames() {
        let mut m = maze(3, 3);
        m.start_generation();
        let mut animator = MazeAnimator::new(3);
        assert_eq!(animator.tick(&mut m), FrameUpdate::Idle);
        assert_eq!(animator.tick(&mut m), FrameUpdate::Idle);
        assert!(matches!(
            animator.tick(&mut m),
            FrameUpdate::Stepped(StepOutcome::Advanced { .. })
        ));
        assert_eq!(m.steps(), 1);
        assert_eq!(animator.frame(), 3);
    }

    #[test]
    fn generates_then_reveals_path() {
        let mut m = maze(2, 2);
        m.start_generation();
        let mut animator = MazeAnimator::new(2);

        // 4 cells need 7 steps at 2 frames each.
        for _ in 0..14 {
            animator.tick(&mut m);
        }
        assert_eq!(m.state(), GenerationState::Completed);
        assert!(animator.revealed_path(&m).is_empty());
        assert!(!animator.is_finished(&m));

        let path_len = m.path().len();
        let mut reveals = 0;
        while !animator.is_finished(&m) {
            if let FrameUpdate::Revealed(n) = animator.tick(&mut m) {
                reveals += 1;
                assert_eq!(n, reveals);
            }
        }
        assert_eq!(reveals, path_len);
        assert_eq!(animator.revealed_path(&m), m.path());
        assert_eq!(animator.tick(&mut m), FrameUpdate::Idle);
    }

    #[test]
    fn zero_pacing_is_every_frame() {
        let animator = MazeAnimator::new(0);
        assert_eq!(animator.frames_per_step(), 1);
    }

    #[test]
    fn view_tracks_reveal() {
        let mut m = maze(1, 1);
        m.generate_to_completion();
        let mut animator = MazeAnimator::new(1);
        assert_eq!(animator.view().revealed_path, 0);
        animator.tick(&mut m);
        assert_eq!(animator.view().revealed_path, 1);
    }
}
