use neuropath_common::{BoundingBox, Direction, GridCoord};
use rand::SeedableRng;

use crate::config::{GeometryConfig, MazeConfig};
use crate::geometry::MazeGeometry;
use crate::grid::{CellIndex, Grid, MazeError};
use crate::path::{Path, PathError};
use crate::rng::{RandomSource, SplitMix64};

/// Lifecycle of one maze. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationState {
    NotStarted,
    InProgress,
    Completed,
    /// Completion hit a broken invariant. Not reachable in normal operation.
    Failed,
}

/// What a single `generate` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not in progress; nothing happened.
    Idle,
    /// Carved into a fresh cell and pushed it.
    Advanced { from: GridCoord, to: GridCoord },
    /// Popped a dead end off the stack.
    Backtracked { cell: GridCoord },
    /// The stack emptied and completion ran.
    Completed,
}

/// Record of every state-changing operation, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeEvent {
    Started { cols: u32, rows: u32 },
    Advanced { from: GridCoord, to: GridCoord },
    Backtracked { cell: GridCoord },
    Completed { path_len: usize },
    Failed { reason: PathError },
}

/// Phase data. The DFS stack only exists while in progress, and path and
/// geometry only once completed.
#[derive(Debug, Clone)]
enum Phase {
    NotStarted,
    InProgress { stack: Vec<CellIndex> },
    Completed { path: Path, geometry: MazeGeometry },
    Failed,
}

/// Incremental randomized depth-first maze generator.
///
/// Owns the grid, the random source and the generation phase. Each call to
/// [`generate`](Self::generate) does at most one advance or backtrack, so a
/// frame loop can animate construction; [`generate_to_completion`](Self::generate_to_completion)
/// runs the same steps eagerly.
///
/// Given the same seed and grid size, two generators carve identical mazes.
#[derive(Debug, Clone)]
pub struct MazeGenerator<R: RandomSource = SplitMix64> {
    grid: Grid,
    rng: R,
    geometry_config: GeometryConfig,
    phase: Phase,
    steps: u64,
    /// Append-only log of transitions, drained by presentation layers.
    event_log: Vec<MazeEvent>,
}

impl MazeGenerator<SplitMix64> {
    /// Generator with a process-seeded random source.
    pub fn new(config: MazeConfig) -> Result<Self, MazeError> {
        Self::with_rng(config, SplitMix64::from_entropy())
    }

    /// Generator with a fixed seed for replayable mazes.
    pub fn with_seed(config: MazeConfig, seed: u64) -> Result<Self, MazeError> {
        Self::with_rng(config, SplitMix64::new(seed))
    }
}

impl<R: RandomSource> MazeGenerator<R> {
    /// Generator driven by the given random source.
    pub fn with_rng(config: MazeConfig, rng: R) -> Result<Self, MazeError> {
        Ok(Self {
            grid: Grid::new(config)?,
            rng,
            geometry_config: GeometryConfig::default(),
            phase: Phase::NotStarted,
            steps: 0,
            event_log: Vec::new(),
        })
    }

    /// Override the dimensions used for collision geometry.
    pub fn with_geometry(mut self, geometry: GeometryConfig) -> Self {
        self.geometry_config = geometry;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GenerationState {
        match self.phase {
            Phase::NotStarted => GenerationState::NotStarted,
            Phase::InProgress { .. } => GenerationState::InProgress,
            Phase::Completed { .. } => GenerationState::Completed,
            Phase::Failed => GenerationState::Failed,
        }
    }

    /// True once path and geometry are available.
    pub fn is_completed(&self) -> bool {
        matches!(self.phase, Phase::Completed { .. })
    }

    /// Read-only access to the cell grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Grid width in cells.
    pub fn cols(&self) -> u32 {
        self.grid.cols()
    }

    /// Grid height in cells.
    pub fn rows(&self) -> u32 {
        self.grid.rows()
    }

    /// Cell edge length in pixels.
    pub fn cell_size(&self) -> u32 {
        self.grid.cell_size()
    }

    pub fn geometry_config(&self) -> &GeometryConfig {
        &self.geometry_config
    }

    /// Number of `generate` calls that did work.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Cell on top of the DFS stack, while in progress.
    pub fn current(&self) -> Option<GridCoord> {
        match &self.phase {
            Phase::InProgress { stack } => stack.last().map(|i| self.grid.coord_of(*i)),
            _ => None,
        }
    }

    /// Number of cells on the DFS stack; zero outside `InProgress`.
    pub fn stack_depth(&self) -> usize {
        match &self.phase {
            Phase::InProgress { stack } => stack.len(),
            _ => 0,
        }
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[MazeEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<MazeEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Begin generation from the top-left cell.
    ///
    /// Opens the entrance (origin's left wall) and the exit (terminal cell's
    /// right wall). Does nothing unless the maze has not started yet.
    pub fn start_generation(&mut self) {
        if !matches!(self.phase, Phase::NotStarted) {
            return;
        }

        let origin = self.grid.origin();
        let terminal = self.grid.terminal();
        self.grid.cell_mut(origin).visited = true;
        self.grid.cell_mut(origin).walls[Direction::Left.index()] = false;
        self.grid.cell_mut(terminal).walls[Direction::Right.index()] = false;

        self.phase = Phase::InProgress {
            stack: vec![origin],
        };
        self.event_log.push(MazeEvent::Started {
            cols: self.grid.cols(),
            rows: self.grid.rows(),
        });
        tracing::info!(
            cols = self.grid.cols(),
            rows = self.grid.rows(),
            "maze generation started"
        );
    }

    /// Perform one DFS step: advance into a random unvisited neighbor, or
    /// backtrack when there is none.
    ///
    /// The step that pops the last cell also completes the maze, so a grid of
    /// `n` cells completes after exactly `2n - 1` calls.
    pub fn generate(&mut self) -> StepOutcome {
        let Phase::InProgress { stack } = &mut self.phase else {
            return StepOutcome::Idle;
        };

        let Some(&current) = stack.last() else {
            self.finish();
            return StepOutcome::Completed;
        };

        let candidates: Vec<CellIndex> = self
            .grid
            .neighbors(current)
            .map(|(_, n)| n)
            .filter(|n| !self.grid.cell(*n).visited)
            .collect();

        self.steps += 1;
        if candidates.is_empty() {
            stack.pop();
            let cell = self.grid.coord_of(current);
            tracing::debug!(%cell, depth = stack.len(), "backtrack");
            self.event_log.push(MazeEvent::Backtracked { cell });
            if stack.is_empty() {
                self.finish();
                return StepOutcome::Completed;
            }
            return StepOutcome::Backtracked { cell };
        }

        let next = *self.rng.pick(&candidates);
        self.grid.remove_wall_between(current, next);
        let cell = self.grid.cell_mut(next);
        cell.parent = Some(current);
        cell.visited = true;
        stack.push(next);

        let from = self.grid.coord_of(current);
        let to = self.grid.coord_of(next);
        tracing::trace!(%from, %to, "advance");
        self.event_log.push(MazeEvent::Advanced { from, to });
        StepOutcome::Advanced { from, to }
    }

    /// Start if needed and step until the maze leaves `InProgress`.
    /// Returns the number of steps taken by this call.
    pub fn generate_to_completion(&mut self) -> u64 {
        let _span = tracing::info_span!("generate_to_completion").entered();
        self.start_generation();
        let before = self.steps;
        while matches!(self.phase, Phase::InProgress { .. }) {
            self.generate();
        }
        self.steps - before
    }

    /// Resolve the path and derive geometry, exactly once.
    fn finish(&mut self) {
        match Path::resolve(&self.grid) {
            Ok(path) => {
                let geometry = MazeGeometry::derive(&self.grid, self.geometry_config);
                tracing::info!(
                    path_len = path.len(),
                    floors = geometry.floor_boxes().len(),
                    walls = geometry.wall_boxes().len(),
                    steps = self.steps,
                    "maze generation completed"
                );
                self.event_log.push(MazeEvent::Completed {
                    path_len: path.len(),
                });
                self.phase = Phase::Completed { path, geometry };
            }
            Err(reason) => {
                tracing::error!(%reason, "maze completion failed");
                self.event_log.push(MazeEvent::Failed {
                    reason: reason.clone(),
                });
                self.phase = Phase::Failed;
                debug_assert!(false, "path resolution failed: {reason}");
            }
        }
    }

    /// The start-to-end path, or `NotCompleted` before generation finishes.
    pub fn resolve_path(&self) -> Result<&Path, PathError> {
        match &self.phase {
            Phase::Completed { path, .. } => Ok(path),
            _ => Err(PathError::NotCompleted),
        }
    }

    /// Path coordinates from `(0, 0)` to `(cols - 1, rows - 1)`; empty until completed.
    pub fn path(&self) -> &[GridCoord] {
        match &self.phase {
            Phase::Completed { path, .. } => path.coords(),
            _ => &[],
        }
    }

    /// Path as grid indices; empty until completed.
    pub fn path_cells(&self) -> &[CellIndex] {
        match &self.phase {
            Phase::Completed { path, .. } => path.cells(),
            _ => &[],
        }
    }

    /// Derived collision geometry, once completed.
    pub fn geometry(&self) -> Option<&MazeGeometry> {
        match &self.phase {
            Phase::Completed { geometry, .. } => Some(geometry),
            _ => None,
        }
    }

    /// One box per floor tile; empty until completed.
    pub fn floor_boxes(&self) -> &[BoundingBox] {
        self.geometry().map(|g| g.floor_boxes()).unwrap_or(&[])
    }

    /// One box per standing wall flag; empty until completed.
    ///
    /// An interior wall that survived carving appears twice, once for each
    /// adjoining cell. Use [`MazeGeometry::unique_wall_boxes`] when each
    /// physical wall must be counted once.
    pub fn wall_boxes(&self) -> &[BoundingBox] {
        self.geometry().map(|g| g.wall_boxes()).unwrap_or(&[])
    }
}
