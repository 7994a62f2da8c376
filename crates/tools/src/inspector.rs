use std::collections::VecDeque;

use neuropath_common::{Direction, GridCoord};
use neuropath_maze::{CellIndex, GenerationState, MazeGenerator, RandomSource};

/// Ways a maze can fail verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("maze is {0:?}, expected Completed")]
    NotCompleted(GenerationState),
    #[error("cell {0} was never visited")]
    Unvisited(GridCoord),
    #[error("wall between {a} and {b} is open on one side only")]
    AsymmetricWall { a: GridCoord, b: GridCoord },
    #[error("boundary wall {side:?} of {cell} is wrong")]
    Boundary { cell: GridCoord, side: Direction },
    #[error("expected {expected} passages, found {found}")]
    PassageCount { expected: usize, found: usize },
    #[error("cell {0} is unreachable from the origin")]
    Disconnected(GridCoord),
    #[error("path is broken between {from} and {to}")]
    BrokenPath { from: GridCoord, to: GridCoord },
    #[error("path endpoints are wrong")]
    PathEndpoints,
    #[error("geometry has {floors} floors and {walls} walls, expected {expected_floors} and {expected_walls}")]
    Geometry {
        floors: usize,
        walls: usize,
        expected_floors: usize,
        expected_walls: usize,
    },
}

/// Read-only queries against a maze for debugging and tooling.
pub struct MazeInspector;

impl MazeInspector {
    pub fn summary<R: RandomSource>(maze: &MazeGenerator<R>) -> MazeSummary {
        let grid = maze.grid();
        MazeSummary {
            state: maze.state(),
            cols: grid.cols(),
            rows: grid.rows(),
            steps: maze.steps(),
            visited: grid.visited_count(),
            stack_depth: maze.stack_depth(),
            passages: grid.passage_count(),
            path_len: maze.path().len(),
            floor_boxes: maze.floor_boxes().len(),
            wall_boxes: maze.wall_boxes().len(),
        }
    }

    /// Per-cell wall bitmask in row-major order (top = 1, right = 2, bottom = 4, left = 8).
    pub fn wall_masks<R: RandomSource>(maze: &MazeGenerator<R>) -> Vec<u8> {
        maze.grid().cells().iter().map(|c| c.wall_mask()).collect()
    }

    /// Check that a completed maze is perfect and its outputs agree with the grid.
    pub fn verify<R: RandomSource>(maze: &MazeGenerator<R>) -> Result<(), TopologyError> {
        let state = maze.state();
        if state != GenerationState::Completed {
            return Err(TopologyError::NotCompleted(state));
        }
        let grid = maze.grid();

        for (i, cell) in grid.cells().iter().enumerate() {
            if !cell.visited {
                return Err(TopologyError::Unvisited(cell.coord));
            }
            for side in Direction::ALL {
                match grid.neighbor(CellIndex(i), side) {
                    Some(n) => {
                        let other = grid.cell(n);
                        if cell.has_wall(side) != other.has_wall(side.opposite()) {
                            return Err(TopologyError::AsymmetricWall {
                                a: cell.coord,
                                b: other.coord,
                            });
                        }
                    }
                    None => {
                        let opening = (CellIndex(i) == grid.origin() && side == Direction::Left)
                            || (CellIndex(i) == grid.terminal() && side == Direction::Right);
                        if cell.has_wall(side) == opening {
                            return Err(TopologyError::Boundary {
                                cell: cell.coord,
                                side,
                            });
                        }
                    }
                }
            }
        }

        let expected = grid.len() - 1;
        let found = grid.passage_count();
        if found != expected {
            return Err(TopologyError::PassageCount { expected, found });
        }

        let mut seen = vec![false; grid.len()];
        let mut queue = VecDeque::from([grid.origin()]);
        seen[grid.origin().0] = true;
        while let Some(index) = queue.pop_front() {
            for (_, n) in grid.neighbors(index) {
                if !seen[n.0] && grid.is_open_between(index, n) {
                    seen[n.0] = true;
                    queue.push_back(n);
                }
            }
        }
        if let Some(i) = seen.iter().position(|s| !s) {
            return Err(TopologyError::Disconnected(grid.coord_of(CellIndex(i))));
        }

        let path = maze.path_cells();
        if path.first() != Some(&grid.origin()) || path.last() != Some(&grid.terminal()) {
            return Err(TopologyError::PathEndpoints);
        }
        for pair in path.windows(2) {
            if !grid.is_open_between(pair[0], pair[1]) {
                return Err(TopologyError::BrokenPath {
                    from: grid.coord_of(pair[0]),
                    to: grid.coord_of(pair[1]),
                });
            }
        }

        let expected_walls: usize = grid
            .cells()
            .iter()
            .map(|c| c.walls.iter().filter(|w| **w).count())
            .sum();
        let floors = maze.floor_boxes().len();
        let walls = maze.wall_boxes().len();
        if floors != grid.len() || walls != expected_walls {
            return Err(TopologyError::Geometry {
                floors,
                walls,
                expected_floors: grid.len(),
                expected_walls,
            });
        }

        tracing::debug!(cells = grid.len(), path_len = path.len(), "maze verified");
        Ok(())
    }
}

/// Snapshot of a maze's progress and outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeSummary {
    pub state: GenerationState,
    pub cols: u32,
    pub rows: u32,
    pub steps: u64,
    pub visited: usize,
    pub stack_depth: usize,
    pub passages: usize,
    pub path_len: usize,
    pub floor_boxes: usize,
    pub wall_boxes: usize,
}

impl std::fmt::Display for MazeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Maze: {}x{} state={:?} steps={} visited={} stack={} passages={} path={} floors={} walls={}",
            self.cols,
            self.rows,
            self.state,
            self.steps,
            self.visited,
            self.stack_depth,
            self.passages,
            self.path_len,
            self.floor_boxes,
            self.wall_boxes,
        )
    }
}
