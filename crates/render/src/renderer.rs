use neuropath_common::{Direction, GridCoord};
use neuropath_maze::{GenerationState, MazeGenerator, RandomSource};

/// What part of the maze state a frame should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeView {
    /// How many path cells (from the start) to highlight once completed.
    pub revealed_path: usize,
    /// Shade visited cells while generation is in progress.
    pub show_visited: bool,
}

impl Default for MazeView {
    fn default() -> Self {
        Self {
            revealed_path: usize::MAX,
            show_visited: true,
        }
    }
}

/// Renderer-agnostic interface for drawing a maze.
///
/// Renderers only read generator state; they never step or mutate it.
pub trait Renderer {
    type Output;

    fn render<R: RandomSource>(&self, maze: &MazeGenerator<R>, view: &MazeView) -> Self::Output;
}

/// Text renderer for terminals, logs and tests.
///
/// Each cell is two characters wide. Markers, highest priority first:
/// `@@` current DFS cell, `S ` start, ` E` end, `**` revealed path,
/// `..` visited while generating.
#[derive(Debug, Default)]
pub struct AsciiRenderer {
    /// Omit the header line.
    pub bare: bool,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bare() -> Self {
        Self { bare: true }
    }
}

impl Renderer for AsciiRenderer {
    type Output = String;

    fn render<R: RandomSource>(&self, maze: &MazeGenerator<R>, view: &MazeView) -> String {
        let grid = maze.grid();
        let state = maze.state();
        let current = maze.current();
        let path = maze.path();
        let revealed = &path[..view.revealed_path.min(path.len())];
        let last = GridCoord::new(grid.cols() - 1, grid.rows() - 1);

        let marker = |coord: GridCoord| -> &'static str {
            if current == Some(coord) {
                return "@@";
            }
            if state != GenerationState::NotStarted {
                if coord == GridCoord::new(0, 0) {
                    return "S ";
                }
                if coord == last {
                    return " E";
                }
            }
            if revealed.contains(&coord) {
                return "**";
            }
            let visited = grid.cell_at(coord).is_some_and(|c| c.visited);
            if view.show_visited && state == GenerationState::InProgress && visited {
                return "..";
            }
            "  "
        };
        let wall = |coord: GridCoord, side: Direction| {
            grid.cell_at(coord).is_some_and(|c| c.has_wall(side))
        };

        let mut out = String::new();
        if !self.bare {
            out.push_str(&format!(
                "=== Maze {}x{} (state={:?}, steps={}) ===\n",
                grid.cols(),
                grid.rows(),
                state,
                maze.steps()
            ));
        }

        for y in 0..grid.rows() {
            for x in 0..grid.cols() {
                out.push('+');
                out.push_str(if wall(GridCoord::new(x, y), Direction::Top) {
                    "--"
                } else {
                    "  "
                });
            }
            out.push_str("+\n");

            for x in 0..grid.cols() {
                let coord = GridCoord::new(x, y);
                out.push(if wall(coord, Direction::Left) { '|' } else { ' ' });
                out.push_str(marker(coord));
            }
            let edge = GridCoord::new(grid.cols() - 1, y);
            out.push(if wall(edge, Direction::Right) { '|' } else { ' ' });
            out.push('\n');
        }

        let bottom = grid.rows() - 1;
        for x in 0..grid.cols() {
            out.push('+');
            out.push_str(if wall(GridCoord::new(x, bottom), Direction::Bottom) {
                "--"
            } else {
                "  "
            });
        }
        out.push_str("+\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuropath_maze::MazeConfig;

    fn golden() -> MazeGenerator {
        let mut maze = MazeGenerator::with_seed(MazeConfig::cells(4, 3), 7).unwrap();
        maze.generate_to_completion();
        maze
    }

    #[test]
    fn closed_grid_before_start() {
        let maze = MazeGenerator::with_seed(MazeConfig::cells(2, 1), 0).unwrap();
        let output = AsciiRenderer::bare().render(&maze, &MazeView::default());
        assert_eq!(output, "+--+--+\n|  |  |\n+--+--+\n");
    }

    #[test]
    fn header_reports_state() {
        let maze = golden();
        let output = AsciiRenderer::new().render(&maze, &MazeView::default());
        assert!(output.starts_with("=== Maze 4x3 (state=Completed, steps=23) ===\n"));
    }

    #[test]
    fn completed_maze_with_full_path() {
        let maze = golden();
        let output = AsciiRenderer::bare().render(&maze, &MazeView::default());
        let expected = [
            "+--+--+--+--+",
            " S  **|** **|",
            "+--+  +  +  +",
            "|  |**|**|**|",
            "+  +  +  +  +",
            "|   ** **| E ",
            "+--+--+--+--+",
        ]
        .map(|line| format!("{line}\n"))
        .concat();
        assert_eq!(output, expected);
    }

    #[test]
    fn partial_path_reveal() {
        let maze = golden();
        let view = MazeView {
            revealed_path: 2,
            ..MazeView::default()
        };
        let output = AsciiRenderer::bare().render(&maze, &view);
        assert_eq!(output.matches("**").count(), 1);
    }

    #[test]
    fn in_progress_marks_current_and_visited() {
        let mut maze = MazeGenerator::with_seed(MazeConfig::cells(3, 3), 1).unwrap();
        maze.start_generation();
        maze.generate();
        maze.generate();
        let output = AsciiRenderer::bare().render(&maze, &MazeView::default());
        assert_eq!(output.matches("@@").count(), 1);
        assert_eq!(output.matches("S ").count(), 1);
        // three cells visited: start, one trail cell, current
        assert_eq!(output.matches("..").count(), 1);

        let hidden = MazeView {
            show_visited: false,
            ..MazeView::default()
        };
        let output = AsciiRenderer::bare().render(&maze, &hidden);
        assert_eq!(output.matches("..").count(), 0);
    }
}
